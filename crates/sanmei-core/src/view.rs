// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::catalog::Poi;
use crate::config::ViewConfig;
use crate::coords::LonLat;
use crate::Resolution;

/// Where the map is looking. Rendering is someone else's job.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: LonLat,
    pub zoom: u8,
    min_zoom: u8,
    max_zoom: u8,
    focus_zoom: u8,
}

impl MapView {
    pub fn new(config: &ViewConfig) -> Self {
        let min_zoom = config.min_zoom.min(config.max_zoom);
        let max_zoom = config.min_zoom.max(config.max_zoom);
        Self {
            center: LonLat::new(config.center_lon, config.center_lat),
            zoom: config.zoom.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            focus_zoom: config.focus_zoom.clamp(min_zoom, max_zoom),
        }
    }

    /// Moves the center only; zoom stays where the user left it.
    pub fn recenter(&mut self, target: LonLat) {
        self.center = target;
    }

    /// Jumps to a POI, zooming in far enough for its label to show.
    pub fn focus(&mut self, poi: &Poi) {
        self.center = poi.position();
        if self.zoom < self.focus_zoom {
            self.zoom = self.focus_zoom;
        }
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Applies a resolved search box entry. Returns false for searches,
    /// which leave the view alone until a result is picked.
    pub fn apply(&mut self, resolution: &Resolution) -> bool {
        match resolution {
            Resolution::Recenter(target) => {
                self.recenter(*target);
                true
            }
            Resolution::Search(_) => false,
        }
    }
}
