// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::Result;
use sanmei_core::catalog::PoiCatalog;
use sanmei_core::config::ViewConfig;
use sanmei_core::export::write_csv;
use sanmei_core::view::MapView;
use sanmei_core::{resolve, Resolution};
use std::fs;
use tempfile::tempdir;

const POIS_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"id": 101, "type": "Feature",
     "geometry": {"type": "Point", "coordinates": [137.5536, 36.1064]},
     "properties": {"name": "乗鞍岳", "kana": "のりくらだけ", "alt": 3026, "zmin": 8,
                    "address": ["長野県松本市", "岐阜県高山市"]}},
    {"id": 102, "type": "Feature",
     "geometry": {"type": "Point", "coordinates": [137.6478, 36.3419]},
     "properties": {"name": "槍ヶ岳", "kana": "やりがたけ", "alt": 3180, "zmin": 8,
                    "address": ["長野県松本市", "岐阜県高山市"]}},
    {"id": 103, "type": "Feature",
     "geometry": {"type": "Point", "coordinates": [138.7274, 35.3606]},
     "properties": {"name": "富士山", "kana": "ふじさん", "alt": 3776, "zmin": 8,
                    "address": ["静岡県富士宮市", "山梨県富士吉田市"]}},
    {"id": 104, "type": "Feature",
     "geometry": {"type": "Point", "coordinates": [138.9853, 36.5039]},
     "properties": {"name": "白砂山", "kana": "しらすなやま", "alt": 2140}}
  ]
}"#;

fn load_fixture() -> Result<PoiCatalog> {
    let dir = tempdir()?;
    let path = dir.path().join("pois.geojson");
    fs::write(&path, POIS_GEOJSON)?;
    Ok(PoiCatalog::load_geojson(&path)?)
}

fn search_ids(catalog: &PoiCatalog, input: &str) -> Vec<u64> {
    match resolve(input) {
        Resolution::Search(intent) => catalog.search(&intent, 2).iter().map(|p| p.id).collect(),
        Resolution::Recenter(p) => panic!("{:?} resolved to coordinates {:?}", input, p),
    }
}

#[test]
fn test_search_box_end_to_end() -> Result<()> {
    let catalog = load_fixture()?;
    assert_eq!(catalog.len(), 4);

    assert_eq!(search_ids(&catalog, "0"), vec![104, 103]);
    assert_eq!(search_ids(&catalog, "102"), vec![102]);
    assert_eq!(search_ids(&catalog, "岳@岐阜"), vec![101, 102]);
    assert_eq!(search_ids(&catalog, "岳@静岡"), Vec::<u64>::new());
    assert_eq!(search_ids(&catalog, "ふじ"), vec![103]);
    assert_eq!(search_ids(&catalog, "  富士山 "), vec![103]);
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = PoiCatalog::load_geojson(dir.path().join("nope.geojson")).unwrap_err();
    assert!(matches!(err, sanmei_core::SanmeiError::Io(_)));
}

#[test]
fn test_export_search_results_to_file() -> Result<()> {
    let catalog = load_fixture()?;
    let dir = tempdir()?;
    let out = dir.path().join("result.csv");

    let intent = sanmei_core::classify_search_term("岳@長野");
    let results = catalog.search(&intent, 20);
    write_csv(fs::File::create(&out)?, results, true)?;

    let bytes = fs::read(&out)?;
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    let text = String::from_utf8(bytes[3..].to_vec())?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "ID,山名,よみ,標高,緯度,経度,備考");
    assert_eq!(lines[1], "101,乗鞍岳,のりくらだけ,3026,36.1064,137.5536,");
    assert_eq!(lines[2], "102,槍ヶ岳,やりがたけ,3180,36.3419,137.6478,");
    assert_eq!(lines.len(), 3);
    Ok(())
}

#[test]
fn test_pick_result_then_type_coordinates() -> Result<()> {
    let catalog = load_fixture()?;
    let mut view = MapView::new(&ViewConfig::default());

    view.focus(catalog.require(103)?);
    assert_eq!(view.center, catalog.require(103)?.position());
    assert_eq!(view.zoom, 13);

    assert!(view.apply(&resolve("362000 1385900")));
    assert!((view.center.lat - (36.0 + 20.0 / 60.0)).abs() < 1e-9);
    assert_eq!(view.zoom, 13);
    Ok(())
}

#[test]
fn test_detail_of_unsurveyed_defaults() -> Result<()> {
    let catalog = load_fixture()?;
    let shirasuna = catalog.require(104)?;
    assert_eq!(shirasuna.zmin, sanmei_core::catalog::DEFAULT_ZMIN);
    let rows = shirasuna.detail_rows();
    assert!(rows.contains(&("緯度", "36°30′14″".to_string())));
    assert!(rows.iter().all(|(label, _)| *label != "所在"));
    Ok(())
}
