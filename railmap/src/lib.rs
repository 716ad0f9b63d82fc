#[macro_use]
extern crate tracing;

use std::path::PathBuf;

pub mod background;
pub mod config;
pub mod crs;
pub mod kml;
pub mod loader;
pub mod pipe;
pub mod render;
pub mod route;
pub mod style;

pub use route::{RouteCollection, RouteLine, RouteSource};

use crate::config::{StaticMapConfig, WebMapConfig};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error(transparent)]
    Kml(#[from] kml::KmlError),
    #[error("geojson error: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error(transparent)]
    Crs(#[from] crs::CrsError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("nothing to draw, every background and route is empty")]
    EmptyExtent,
    #[error("no route was extracted from the kml files in `{}`", dir.display())]
    NoRoutes { dir: PathBuf },
}

/// Loads every route of the kml directory, draws them over the backgrounds and
/// saves the picture.
pub fn kml2png(config: &StaticMapConfig) -> Result<(), Error> {
    let routes = loader::load_routes(&config.kml_dir)?;
    let backgrounds = background::load_backgrounds(&config.backgrounds)?;

    render::raster::render_png(&config.output, &backgrounds, &routes, &config.style)
}

/// Loads every route of the kml directory and saves them as an interactive
/// web page.
pub fn kml2html(config: &WebMapConfig) -> Result<(), Error> {
    let routes = loader::load_routes(&config.kml_dir)?;

    render::web::render_html(&config.output, &routes, &config.style)
}
