use std::{fs, path::Path};

use railmap::{
    config::{StaticMapConfig, WebMapConfig},
    render::raster::RasterStyle,
    Error,
};

fn kml(placemarks: &[&str]) -> String {
    let placemarks: String = placemarks
        .iter()
        .map(|coords| {
            format!(
                "<Placemark><LineString><coordinates>{coords}</coordinates></LineString></Placemark>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2"><Document>{placemarks}</Document></kml>"#
    )
}

fn write_routes(dir: &Path) {
    fs::write(
        dir.join("Beijing-Shanghai(2011).kml"),
        kml(&["116.40,39.90,0 117.20,39.13,0 121.47,31.23,0"]),
    )
    .unwrap();
    fs::write(
        dir.join("Guangzhou.KML"),
        kml(&[
            "113.26,23.13 114.06,22.54",
            "104.07,30.67 106.55,29.56",
            "100.0,30.0",
        ]),
    )
    .unwrap();
    fs::write(dir.join("notes.txt"), "not a route").unwrap();
}

#[test]
fn routes_of_every_file_are_collected() {
    let dir = tempfile::tempdir().unwrap();
    write_routes(dir.path());

    let routes = railmap::loader::load_routes(dir.path()).unwrap();

    assert_eq!(routes.len(), 3);
    let names: Vec<_> = routes.sources().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Beijing-Shanghai", "Guangzhou.KML"]);
    let points: Vec<_> = routes.lines().map(|line| line.num_points()).collect();
    assert_eq!(points, [3, 2, 2]);
}

#[test]
fn empty_directory_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("short.kml"), kml(&["116.40,39.90"])).unwrap();
    let output = dir.path().join("map.html");

    let result = railmap::kml2html(&WebMapConfig {
        kml_dir: dir.path().to_path_buf(),
        output: output.clone(),
        ..WebMapConfig::default()
    });

    assert!(matches!(result, Err(Error::NoRoutes { .. })));
    assert!(!output.exists());
}

#[test]
fn degenerate_routes_draw_no_picture() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("short.kml"), kml(&["116.40,39.90", ""])).unwrap();
    let output = dir.path().join("map.png");

    let result = railmap::kml2png(&StaticMapConfig {
        kml_dir: dir.path().to_path_buf(),
        backgrounds: vec![],
        output: output.clone(),
        ..StaticMapConfig::default()
    });

    assert!(matches!(result, Err(Error::NoRoutes { dir: d }) if d == dir.path()));
    assert!(!output.exists());

    let empty = tempfile::tempdir().unwrap();
    let result = railmap::kml2png(&StaticMapConfig {
        kml_dir: empty.path().to_path_buf(),
        output: empty.path().join("map.png"),
        ..StaticMapConfig::default()
    });
    assert!(matches!(result, Err(Error::NoRoutes { .. })));
    assert!(!empty.path().join("map.png").exists());
}

#[test]
fn web_map_is_written() {
    let dir = tempfile::tempdir().unwrap();
    write_routes(dir.path());
    let output = dir.path().join("map.html");

    railmap::kml2html(&WebMapConfig {
        kml_dir: dir.path().to_path_buf(),
        output: output.clone(),
        ..WebMapConfig::default()
    })
    .unwrap();

    let html = fs::read_to_string(output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(html.matches("L.polyline(").count(), 3 * 2 * 7);
    assert!(html.contains("[[39.9,116.4],[39.13,117.2],[31.23,121.47]]"));
    assert!(html.contains("bindTooltip(\"Beijing-Shanghai\""));
}

#[test]
fn static_map_is_written() {
    let dir = tempfile::tempdir().unwrap();
    write_routes(dir.path());
    let background = dir.path().join("land.json");
    fs::write(
        &background,
        r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[98, 20], [125, 20], [125, 42], [98, 42], [98, 20]]]
                }
            }]
        }"#,
    )
    .unwrap();
    let output = dir.path().join("map.png");

    railmap::kml2png(&StaticMapConfig {
        kml_dir: dir.path().to_path_buf(),
        backgrounds: vec![background],
        output: output.clone(),
        style: RasterStyle {
            title: None,
            width_inches: 2.0,
            dpi: 100.0,
            ..RasterStyle::default()
        },
    })
    .unwrap();

    let png = fs::read(output).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn missing_background_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write_routes(dir.path());
    let output = dir.path().join("map.png");

    let result = railmap::kml2png(&StaticMapConfig {
        kml_dir: dir.path().to_path_buf(),
        backgrounds: vec![dir.path().join("CHN.json")],
        output: output.clone(),
        ..StaticMapConfig::default()
    });

    assert!(matches!(result, Err(Error::Io(_))));
    assert!(!output.exists());
}
