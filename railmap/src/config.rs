use std::path::PathBuf;

use crate::render::{raster::RasterStyle, web::WebStyle};

/// Inputs and output of the static map.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMapConfig {
    pub kml_dir: PathBuf,
    /// GeoJSON files drawn under the routes, in order.
    pub backgrounds: Vec<PathBuf>,
    pub output: PathBuf,
    pub style: RasterStyle,
}

impl Default for StaticMapConfig {
    fn default() -> Self {
        Self {
            kml_dir: PathBuf::from("./"),
            backgrounds: vec![PathBuf::from("CHN.json")],
            output: PathBuf::from("railway_trace_map.png"),
            style: RasterStyle::default(),
        }
    }
}

/// Inputs and output of the interactive map.
#[derive(Debug, Clone, PartialEq)]
pub struct WebMapConfig {
    pub kml_dir: PathBuf,
    pub output: PathBuf,
    pub style: WebStyle,
}

impl Default for WebMapConfig {
    fn default() -> Self {
        Self {
            kml_dir: PathBuf::from("./"),
            output: PathBuf::from("railway_trace_map.html"),
            style: WebStyle::default(),
        }
    }
}
