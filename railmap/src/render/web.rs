use std::{fs, path::Path};

use askama::Template;
use serde::Serialize;

use crate::{
    style::{RGB, ROUTE_COLORS},
    Error, RouteCollection,
};

/// Class of the narrow colored lines, the ones the slider resizes.
pub const REAL_LINE: &str = "real-line";
/// Class of the wide invisible lines that widen the hover target.
pub const TRANSPARENT_LINE: &str = "transparent-line";

const CARTO_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";
const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileOptions {
    pub attribution: String,
    pub max_zoom: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomains: Option<String>,
}

/// Base layer offered in the layer control.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub name: String,
    pub url: String,
    pub options: TileOptions,
}

impl TileLayer {
    fn carto(name: &str, style: &str) -> Self {
        Self {
            name: name.to_string(),
            url: format!("https://{{s}}.basemaps.cartocdn.com/{style}/{{z}}/{{x}}/{{y}}{{r}}.png"),
            options: TileOptions {
                attribution: CARTO_ATTRIBUTION.to_string(),
                max_zoom: 20,
                subdomains: Some("abcd".to_string()),
            },
        }
    }

    fn openstreetmap() -> Self {
        Self {
            name: "OpenStreetMap".to_string(),
            url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            options: TileOptions {
                attribution: OSM_ATTRIBUTION.to_string(),
                max_zoom: 19,
                subdomains: None,
            },
        }
    }
}

/// Range of the line width control, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebStyle {
    /// (latitude, longitude)
    pub center: [f64; 2],
    pub zoom: u8,
    pub tiles: Vec<TileLayer>,
    /// Feature groups by display name, in layer control order.
    pub groups: Vec<(String, RGB)>,
    pub line_weight: u32,
    pub hover_weight: u32,
    pub slider: Slider,
}

impl Default for WebStyle {
    fn default() -> Self {
        Self {
            center: [35.0, 105.0],
            zoom: 4,
            tiles: vec![
                TileLayer::carto("Positron", "light_all"),
                TileLayer::carto("Voyager", "rastertiles/voyager"),
                TileLayer::carto("Dark_matter", "dark_all"),
                TileLayer::openstreetmap(),
            ],
            groups: ROUTE_COLORS
                .iter()
                .map(|(name, color)| (name.to_string(), *color))
                .collect(),
            line_weight: 4,
            hover_weight: 15,
            slider: Slider {
                min: 2,
                max: 8,
                step: 1,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineOptions {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub class_name: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// (latitude, longitude) pairs.
    pub coords: Vec<[f64; 2]>,
    pub options: PolylineOptions,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGroup {
    pub name: String,
    pub color: RGB,
    pub polylines: Vec<Polyline>,
}

#[derive(Debug, Serialize)]
struct MapOptions {
    center: [f64; 2],
    zoom: u8,
}

#[derive(Debug, Serialize)]
struct TooltipOptions {
    sticky: bool,
}

/// Document model of the interactive page.
#[derive(Debug, Clone, PartialEq)]
pub struct WebMap {
    pub center: [f64; 2],
    pub zoom: u8,
    pub tiles: Vec<TileLayer>,
    pub groups: Vec<FeatureGroup>,
    pub line_weight: u32,
    pub hover_weight: u32,
    pub slider: Slider,
}

impl WebMap {
    /// Every group gets every line twice, a wide invisible hover target
    /// followed by the visible line.
    pub fn from_routes(routes: &RouteCollection, style: &WebStyle) -> Self {
        let groups = style
            .groups
            .iter()
            .map(|(name, color)| {
                let polylines = routes
                    .sources()
                    .iter()
                    .flat_map(|source| source.lines.iter().map(move |line| (source, line)))
                    .flat_map(|(source, line)| {
                        let coords = line.lat_lon();
                        let hover = Polyline {
                            coords: coords.clone(),
                            options: PolylineOptions {
                                color: RGB::BLACK.to_string(),
                                weight: style.hover_weight,
                                opacity: 0.0,
                                class_name: TRANSPARENT_LINE,
                            },
                            tooltip: source.name.clone(),
                        };
                        let visible = Polyline {
                            coords,
                            options: PolylineOptions {
                                color: color.to_string(),
                                weight: style.line_weight,
                                opacity: 1.0,
                                class_name: REAL_LINE,
                            },
                            tooltip: source.name.clone(),
                        };
                        [hover, visible]
                    })
                    .collect();

                FeatureGroup {
                    name: name.clone(),
                    color: *color,
                    polylines,
                }
            })
            .collect();

        Self {
            center: style.center,
            zoom: style.zoom,
            tiles: style.tiles.clone(),
            groups,
            line_weight: style.line_weight,
            hover_weight: style.hover_weight,
            slider: style.slider,
        }
    }

    pub fn polyline_count(&self) -> usize {
        self.groups.iter().map(|group| group.polylines.len()).sum()
    }

    pub fn to_html(&self) -> Result<String, Error> {
        let page = WebMapPage {
            map: self,
            options: MapOptions {
                center: self.center,
                zoom: self.zoom,
            },
            tooltip: TooltipOptions { sticky: true },
        };
        Ok(page.render()?)
    }
}

#[derive(Template)]
#[template(path = "web_map.html", escape = "html")]
struct WebMapPage<'a> {
    map: &'a WebMap,
    options: MapOptions,
    tooltip: TooltipOptions,
}

mod filters {
    use std::fmt;

    use serde::Serialize;

    fn custom(error: serde_json::Error) -> askama::Error {
        askama::Error::Custom(Box::new(error))
    }

    /// JSON literal safe to embed in a `<script>` element.
    pub fn script_json<T: Serialize + ?Sized>(value: &T) -> askama::Result<String> {
        Ok(serde_json::to_string(value)
            .map_err(custom)?
            .replace("</", "<\\/"))
    }

    /// Already escaped markup as a script string literal.
    pub fn script_text<T: fmt::Display>(value: &T) -> askama::Result<String> {
        script_json(&value.to_string())
    }
}

pub fn render_html(
    path: impl AsRef<Path>,
    routes: &RouteCollection,
    style: &WebStyle,
) -> Result<(), Error> {
    let path = path.as_ref();
    let map = WebMap::from_routes(routes, style);
    debug!(
        "{} polylines in {} groups",
        map.polyline_count(),
        map.groups.len()
    );

    fs::write(path, map.to_html()?)?;

    info!("web map saved to {}", path.display());
    Ok(())
}
