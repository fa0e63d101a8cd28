// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::SanmeiError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bump when a field's meaning changes; older files are migrated on load.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Zoom the view is raised to when jumping to a single POI.
    pub focus_zoom: u8,
    /// How many records a "0" search returns.
    pub recent_limit: usize,
    pub schema_version: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center_lon: 138.9853,
            center_lat: 36.5039,
            zoom: 10,
            min_zoom: 2,
            max_zoom: 18,
            focus_zoom: 13,
            recent_limit: 20,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }
}

impl ViewConfig {
    pub fn default_path() -> PathBuf {
        crate::get_config_root().join("config.json")
    }

    /// Loads from the per-user config directory, or defaults if absent.
    pub fn load() -> Result<Self, SanmeiError> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, SanmeiError> {
        if !path.exists() {
            log::debug!("[Config] No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        log::debug!("[Config] Loading view config from: {:?}", path);
        let content = fs::read_to_string(path)?;
        let mut config: ViewConfig = serde_json::from_str(&content).map_err(|e| {
            log::error!("[Config] JSON parse error for {:?}: {}", path, e);
            e
        })?;

        if config.schema_version < CURRENT_SCHEMA_VERSION {
            log::info!(
                "[Config] Migrating config.json from schema v{} to v{}",
                config.schema_version,
                CURRENT_SCHEMA_VERSION
            );

            // A schema 1 file with recent_limit 0 would make "0" searches
            // return nothing; give it the default.
            if config.schema_version <= 1 && config.recent_limit == 0 {
                config.recent_limit = Self::default().recent_limit;
                log::info!("[Config] recent_limit 0 replaced with default");
            }

            config.schema_version = CURRENT_SCHEMA_VERSION;
            if let Err(e) = config.save_to(path) {
                log::warn!("[Config] Could not write migrated config to {:?}: {}", path, e);
            }
        }

        config.normalize();
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SanmeiError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::debug!("[Config] Saved view config to {:?}", path);
        Ok(())
    }

    /// Keeps zoom bounds ordered and every zoom inside them.
    fn normalize(&mut self) {
        if self.min_zoom > self.max_zoom {
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
        self.focus_zoom = self.focus_zoom.clamp(self.min_zoom, self.max_zoom);
    }
}
