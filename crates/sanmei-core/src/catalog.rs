// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::angle::format_deg;
use crate::coords::LonLat;
use crate::search_intent::SearchIntent;
use crate::SanmeiError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Altitude placeholder for records without a surveyed elevation.
pub const NO_ALTITUDE: i32 = -9999;
/// Records without a zoom threshold only show up at this zoom and above.
pub const DEFAULT_ZMIN: u8 = 13;

/// Another name a POI is known by, with its reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub name: String,
    #[serde(default)]
    pub kana: String,
}

impl Alias {
    pub fn new(name: &str, kana: &str) -> Self {
        Self {
            name: name.to_string(),
            kana: kana.to_string(),
        }
    }
}

impl std::fmt::Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kana.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}（{}）", self.name, self.kana)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: u64,
    pub name: String,
    pub kana: String,
    pub lat: f64,
    pub lon: f64,
    pub alt: i32,
    pub zmin: u8,
    /// Administrative areas, broadest first (e.g. "長野県松本市").
    #[serde(default)]
    pub address: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<Alias>,
    /// Survey point name when the summit carries a triangulation point.
    #[serde(default)]
    pub gcp_name: Option<String>,
    /// Where the record came from.
    #[serde(default)]
    pub auth: Option<String>,
}

impl Poi {
    pub fn position(&self) -> LonLat {
        LonLat::new(self.lon, self.lat)
    }

    fn matches_name(&self, fragment: &str) -> bool {
        self.name.contains(fragment) || self.kana.contains(fragment)
    }

    fn in_region(&self, prefix: &str) -> bool {
        self.address.iter().any(|a| a.starts_with(prefix))
    }

    /// Labelled rows for the detail popup. Coordinates are shown as DMS.
    ///
    /// 別名, 点名 and 所在 are left out when there is nothing to show; 出典
    /// is always present, empty when unknown.
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![("よみ", self.kana.clone())];
        if !self.aliases.is_empty() {
            let aliases: Vec<String> = self.aliases.iter().map(|a| a.to_string()).collect();
            rows.push(("別名", aliases.join("\n")));
        }
        rows.push(("標高", format!("{} m", self.alt)));
        if let Some(gcp) = self.gcp_name.as_deref().filter(|g| !g.is_empty()) {
            rows.push(("点名", gcp.to_string()));
        }
        rows.push(("緯度", format_deg(self.lat)));
        rows.push(("経度", format_deg(self.lon)));
        if !self.address.is_empty() {
            rows.push(("所在", self.address.join("\n")));
        }
        rows.push(("出典", self.auth.clone().unwrap_or_default()));
        rows.push(("ID", self.id.to_string()));
        rows
    }
}

// GeoJSON wire shapes, as served by the POI endpoint.

#[derive(Debug, Serialize, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(rename = "type")]
    kind: String,
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Serialize, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Properties {
    #[serde(default)]
    name: String,
    #[serde(default)]
    kana: String,
    #[serde(default)]
    alt: Option<i32>,
    #[serde(default)]
    zmin: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    address: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<Alias>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gcp_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth: Option<String>,
}

/// In-memory POI store that can answer a [`SearchIntent`].
#[derive(Debug, Clone, Default)]
pub struct PoiCatalog {
    pois: Vec<Poi>,
}

impl PoiCatalog {
    pub fn new(mut pois: Vec<Poi>) -> Self {
        pois.sort_by_key(|p| p.id);
        Self { pois }
    }

    pub fn load_geojson<P: AsRef<Path>>(path: P) -> Result<Self, SanmeiError> {
        let path = path.as_ref();
        log::debug!("[Catalog] Loading POIs from {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::from_geojson_str(&content)
    }

    /// Reads a FeatureCollection of Point features. Other geometry types are
    /// skipped; a feature without an id is an error.
    pub fn from_geojson_str(content: &str) -> Result<Self, SanmeiError> {
        let collection: FeatureCollection = serde_json::from_str(content)?;
        let mut pois = Vec::with_capacity(collection.features.len());
        let mut skipped = 0usize;

        for (index, feature) in collection.features.into_iter().enumerate() {
            let Some((lon, lat)) = feature.geometry.as_ref().and_then(point_lon_lat) else {
                skipped += 1;
                continue;
            };
            let id = feature.id.ok_or_else(|| SanmeiError::InvalidFeature {
                index,
                reason: "missing id".to_string(),
            })?;
            let props = feature.properties;
            pois.push(Poi {
                id,
                name: props.name,
                kana: props.kana,
                lat,
                lon,
                alt: props.alt.unwrap_or(NO_ALTITUDE),
                zmin: props.zmin.unwrap_or(DEFAULT_ZMIN),
                address: props.address,
                aliases: props.aliases,
                gcp_name: props.gcp_name,
                auth: props.auth,
            });
        }

        if skipped > 0 {
            log::debug!("[Catalog] Skipped {} non-point features", skipped);
        }
        log::debug!("[Catalog] Loaded {} POIs", pois.len());
        Ok(Self::new(pois))
    }

    pub fn to_geojson(&self) -> Result<String, SanmeiError> {
        let collection = FeatureCollection {
            kind: "FeatureCollection".to_string(),
            features: self
                .pois
                .iter()
                .map(|p| Feature {
                    id: Some(p.id),
                    kind: "Feature".to_string(),
                    geometry: Some(Geometry {
                        kind: "Point".to_string(),
                        coordinates: serde_json::json!([p.lon, p.lat]),
                    }),
                    properties: Properties {
                        name: p.name.clone(),
                        kana: p.kana.clone(),
                        alt: Some(p.alt),
                        zmin: Some(p.zmin),
                        address: p.address.clone(),
                        aliases: p.aliases.clone(),
                        gcp_name: p.gcp_name.clone(),
                        auth: p.auth.clone(),
                    },
                })
                .collect(),
        };
        Ok(serde_json::to_string(&collection)?)
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Poi> {
        self.pois.iter()
    }

    pub fn get(&self, id: u64) -> Option<&Poi> {
        self.pois
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|i| &self.pois[i])
    }

    pub fn require(&self, id: u64) -> Result<&Poi, SanmeiError> {
        self.get(id).ok_or(SanmeiError::NotFound(id))
    }

    /// Runs an intent against the catalog.
    ///
    /// Recent-id results come newest (highest id) first and stop at
    /// `recent_limit`; everything else is in ascending id order.
    pub fn search(&self, intent: &SearchIntent, recent_limit: usize) -> Vec<&Poi> {
        let results: Vec<&Poi> = match intent {
            SearchIntent::ByRecentId => self.pois.iter().rev().take(recent_limit).collect(),
            SearchIntent::ById(id) => self.get(*id).into_iter().collect(),
            SearchIntent::ByName(name) => {
                self.pois.iter().filter(|p| p.matches_name(name)).collect()
            }
            SearchIntent::ByRegionAndName {
                region_prefix,
                name_substring,
            } => self
                .pois
                .iter()
                .filter(|p| p.in_region(region_prefix) && p.matches_name(name_substring))
                .collect(),
        };
        log::debug!("[Catalog] {:?} -> {} results", intent, results.len());
        results
    }
}

fn point_lon_lat(geometry: &Geometry) -> Option<(f64, f64)> {
    if geometry.kind != "Point" {
        return None;
    }
    let coords = geometry.coordinates.as_array()?;
    let lon = coords.first()?.as_f64()?;
    let lat = coords.get(1)?.as_f64()?;
    Some((lon, lat))
}
