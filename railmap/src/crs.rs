use std::str::FromStr;

use geo::{Coord, MapCoordsInPlace};
use geojson::{GeoJson, JsonObject, JsonValue};

/// WGS84 semi major axis used by spherical web mercator.
const EARTH_RADIUS: f64 = 6_378_137.0;

const WEB_MERCATOR_CODES: [&str; 5] = ["3857", "900913", "3785", "102100", "102113"];

/// Geographic lon/lat systems on GRS80-class datums, within a meter or two of
/// WGS84: CGCS2000, NAD83, NAD83(CSRS), ETRS89, GDA94, GDA2020, NZGD2000,
/// JGD2000, JGD2011, SIRGAS 2000.
const GEOGRAPHIC_CODES: [&str; 10] = [
    "4490", "4269", "4617", "4258", "4283", "7844", "4167", "4612", "6668", "4674",
];

/// Coordinate reference systems a background file may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crs {
    /// EPSG:4326 and OGC:CRS84, longitude/latitude in degrees.
    Wgs84,
    /// Another geographic system from [`GEOGRAPHIC_CODES`], degrees read as
    /// WGS84 ones.
    Geographic { epsg: u16 },
    /// EPSG:3857 and its legacy aliases, meters.
    WebMercator,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CrsError {
    #[error("unsupported coordinate reference system `{name}`, expected EPSG:4326 or EPSG:3857")]
    Unsupported { name: String },
    #[error("malformed crs member: {reason}")]
    Malformed { reason: &'static str },
}

impl FromStr for Crs {
    type Err = CrsError;

    /// Accepts `AUTHORITY:CODE` as well as the `urn:ogc:def:crs:` forms,
    /// versioned or not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let short = trimmed
            .strip_prefix("urn:ogc:def:crs:")
            .unwrap_or(trimmed);
        let authority = short.split(':').next().unwrap_or_default();
        let code = short.rsplit(':').next().unwrap_or_default();

        match (authority.to_ascii_uppercase().as_str(), code) {
            ("EPSG", "4326") | ("OGC", "CRS84") => Ok(Crs::Wgs84),
            ("EPSG", code) if GEOGRAPHIC_CODES.contains(&code) => code
                .parse()
                .map(|epsg| Crs::Geographic { epsg })
                .map_err(|_| CrsError::Unsupported { name: s.to_owned() }),
            ("EPSG", code) if WEB_MERCATOR_CODES.contains(&code) => Ok(Crs::WebMercator),
            _ => Err(CrsError::Unsupported { name: s.to_owned() }),
        }
    }
}

impl Crs {
    /// Reads the legacy `crs` member of a geojson document. Documents without
    /// one are WGS84.
    pub fn from_geojson(geojson: &GeoJson) -> Result<Self, CrsError> {
        let members = match geojson {
            GeoJson::Geometry(geometry) => geometry.foreign_members.as_ref(),
            GeoJson::Feature(feature) => feature.foreign_members.as_ref(),
            GeoJson::FeatureCollection(collection) => collection.foreign_members.as_ref(),
        };

        match members.and_then(|members| members.get("crs")) {
            None | Some(JsonValue::Null) => Ok(Crs::Wgs84),
            Some(JsonValue::Object(crs)) => Self::from_crs_member(crs),
            Some(_) => Err(CrsError::Malformed {
                reason: "`crs` is not an object",
            }),
        }
    }

    fn from_crs_member(crs: &JsonObject) -> Result<Self, CrsError> {
        if crs.get("type").and_then(JsonValue::as_str) != Some("name") {
            return Err(CrsError::Malformed {
                reason: "only named crs members are supported",
            });
        }

        crs.get("properties")
            .and_then(|properties| properties.get("name"))
            .and_then(JsonValue::as_str)
            .ok_or(CrsError::Malformed {
                reason: "missing `properties.name`",
            })?
            .parse()
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, Crs::Wgs84 | Crs::Geographic { .. })
    }

    pub fn to_wgs84(&self, coord: Coord<f64>) -> Coord<f64> {
        match self {
            Crs::Wgs84 | Crs::Geographic { .. } => coord,
            Crs::WebMercator => Coord {
                x: (coord.x / EARTH_RADIUS).to_degrees(),
                y: (2.0 * (coord.y / EARTH_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2)
                    .to_degrees(),
            },
        }
    }

    /// Rewrites every coordinate of `geometry` into WGS84.
    pub fn reproject<G>(&self, geometry: &mut G)
    where
        G: MapCoordsInPlace<f64>,
    {
        if self.is_geographic() {
            return;
        }
        let crs = *self;
        geometry.map_coords_in_place(move |coord| crs.to_wgs84(coord));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::{coord, point};

    #[test]
    fn names() {
        for name in [
            "EPSG:4326",
            "urn:ogc:def:crs:EPSG::4326",
            "urn:ogc:def:crs:OGC:1.3:CRS84",
            "OGC:CRS84",
        ] {
            assert_eq!(name.parse::<Crs>(), Ok(Crs::Wgs84), "{name}");
        }
        for name in ["EPSG:3857", "urn:ogc:def:crs:EPSG:6.18:3:3857", "epsg:900913"] {
            assert_eq!(name.parse::<Crs>(), Ok(Crs::WebMercator), "{name}");
        }
        assert_eq!(
            "EPSG:4490".parse::<Crs>(),
            Ok(Crs::Geographic { epsg: 4490 })
        );
        for code in [4269, 4258, 4167] {
            let name = format!("urn:ogc:def:crs:EPSG::{code}");
            assert_eq!(name.parse::<Crs>(), Ok(Crs::Geographic { epsg: code }));
        }
        assert_eq!(
            "EPSG:32650".parse::<Crs>(),
            Err(CrsError::Unsupported {
                name: "EPSG:32650".to_string()
            })
        );
    }

    #[test]
    fn crs_member() {
        let doc: GeoJson = r#"{
            "type": "FeatureCollection",
            "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::3857" } },
            "features": []
        }"#
        .parse()
        .unwrap();
        assert_eq!(Crs::from_geojson(&doc), Ok(Crs::WebMercator));

        let plain: GeoJson = r#"{ "type": "FeatureCollection", "features": [] }"#
            .parse()
            .unwrap();
        assert_eq!(Crs::from_geojson(&plain), Ok(Crs::Wgs84));

        let linked: GeoJson = r#"{
            "type": "FeatureCollection",
            "crs": { "type": "link", "properties": { "href": "http://example.com/crs" } },
            "features": []
        }"#
        .parse()
        .unwrap();
        assert!(matches!(
            Crs::from_geojson(&linked),
            Err(CrsError::Malformed { .. })
        ));
    }

    #[test]
    fn web_mercator_inverse() {
        let origin = Crs::WebMercator.to_wgs84(coord! { x: 0.0, y: 0.0 });
        assert!(origin.x.abs() < 1e-9 && origin.y.abs() < 1e-9);

        // Beijing
        let beijing = Crs::WebMercator.to_wgs84(coord! { x: 12_958_367.96, y: 4_852_001.61 });
        assert!((beijing.x - 116.407).abs() < 1e-3, "{beijing:?}");
        assert!((beijing.y - 39.904).abs() < 1e-3, "{beijing:?}");

        let mut p = point! { x: 20_037_508.342789244, y: 0.0 };
        Crs::WebMercator.reproject(&mut p);
        assert!((p.x() - 180.0).abs() < 1e-9);
    }
}
