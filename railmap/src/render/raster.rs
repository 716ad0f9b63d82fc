use std::path::Path;

use extent::Extent;
use geo::{Geometry, LineString};
use plotters::{
    coord::Shift,
    drawing::DrawingAreaErrorKind,
    prelude::{
        BitMapBackend, ChartBuilder, Color, DrawingArea, DrawingBackend, IntoDrawingArea,
        IntoFont, PathElement, Polygon as FilledArea, RGBColor,
    },
};

use crate::{
    background::Background,
    style::{ROUTE_ORANGE, RGB},
    Error, RouteCollection,
};

/// Points per inch, line widths and font sizes are given in points.
const POINTS_PER_INCH: f64 = 72.0;

/// Fixed look of the static map.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterStyle {
    pub canvas: RGB,
    pub background_fill: RGB,
    pub background_edge: RGB,
    pub edge_width: f64,
    pub route_color: RGB,
    pub route_width: f64,
    pub title: Option<String>,
    pub title_color: RGB,
    pub title_size: f64,
    pub width_inches: f64,
    pub dpi: f64,
    /// Share of the data span left empty around the plot.
    pub margin: f64,
    /// Share of the vertical span cut from the bottom of the plot.
    pub crop_bottom: f64,
}

impl Default for RasterStyle {
    fn default() -> Self {
        Self {
            canvas: RGB::WHITE,
            background_fill: RGB::new(0x22, 0x22, 0x22),
            background_edge: RGB::WHITE,
            edge_width: 1.0,
            route_color: ROUTE_ORANGE,
            route_width: 4.0,
            title: Some("Railway Footprint".to_string()),
            title_color: RGB::new(0x22, 0x22, 0x22),
            title_size: 20.0,
            width_inches: 20.0,
            dpi: 300.0,
            margin: 0.05,
            crop_bottom: 0.25,
        }
    }
}

impl RasterStyle {
    fn px(&self, points: f64) -> u32 {
        (points * self.dpi / POINTS_PER_INCH).round().max(1.0) as u32
    }

    fn title_height(&self) -> u32 {
        self.title
            .as_ref()
            .map_or(0, |_| self.px(self.title_size) * 3 / 2)
    }

    /// Pixel size of the picture: fixed width, height following the extent
    /// so a degree of latitude keeps its ground length.
    pub fn canvas_size(&self, extent: &Extent) -> (u32, u32) {
        let width = (self.width_inches * self.dpi).round().max(1.0);
        let height = width * extent.height() * extent.geographic_aspect() / extent.width();
        let height = height.round().clamp(1.0, width * 4.0);

        (width as u32, height as u32 + self.title_height())
    }
}

enum Shape {
    Area {
        exterior: Vec<(f64, f64)>,
        holes: Vec<Vec<(f64, f64)>>,
    },
    Path(Vec<(f64, f64)>),
}

fn points(line: &LineString<f64>) -> Vec<(f64, f64)> {
    line.coords().map(|c| c.x_y()).collect()
}

fn area(polygon: &geo::Polygon<f64>) -> Shape {
    Shape::Area {
        exterior: points(polygon.exterior()),
        holes: polygon.interiors().iter().map(points).collect(),
    }
}

fn shapes(geometry: &Geometry<f64>, out: &mut Vec<Shape>) {
    match geometry {
        Geometry::Polygon(polygon) => out.push(area(polygon)),
        Geometry::MultiPolygon(polygons) => out.extend(polygons.0.iter().map(area)),
        Geometry::Rect(rect) => out.push(area(&rect.to_polygon())),
        Geometry::Triangle(triangle) => out.push(area(&triangle.to_polygon())),
        Geometry::LineString(line) => out.push(Shape::Path(points(line))),
        Geometry::MultiLineString(lines) => {
            out.extend(lines.0.iter().map(|line| Shape::Path(points(line))))
        }
        Geometry::Line(line) => out.push(Shape::Path(vec![line.start.x_y(), line.end.x_y()])),
        Geometry::GeometryCollection(collection) => {
            collection.0.iter().for_each(|geometry| shapes(geometry, out))
        }
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
    }
}

fn draw_error<E>(error: DrawingAreaErrorKind<E>) -> Error
where
    E: std::error::Error + Send + Sync,
{
    Error::Draw(error.to_string())
}

/// Extent of everything drawn, with margins, after the bottom crop.
pub fn plot_extent(
    backgrounds: &[Background],
    routes: &RouteCollection,
    style: &RasterStyle,
) -> Option<Extent> {
    let backgrounds = backgrounds.iter().filter_map(Background::extent);
    let routes = routes.lines().filter_map(|line| Extent::of(line.line_string()));

    Extent::union(backgrounds.chain(routes))
        .map(|extent| extent.with_margin(style.margin).crop_bottom(style.crop_bottom))
}

/// Draws backgrounds then routes, x being the longitude and y the latitude.
///
/// Backgrounds are opaque layers painted in order. A polygon hole is painted
/// in the canvas color, so it shows the canvas even where an earlier
/// background lies under it.
pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    extent: &Extent,
    backgrounds: &[Background],
    routes: &RouteCollection,
    style: &RasterStyle,
) -> Result<(), Error> {
    let canvas = RGBColor::from(style.canvas);
    root.fill(&canvas).map_err(draw_error)?;

    let mut builder = ChartBuilder::on(root);
    builder.margin(0);
    if let Some(title) = &style.title {
        let font = ("sans-serif", style.px(style.title_size) as f64)
            .into_font()
            .color(&RGBColor::from(style.title_color));
        builder.caption(title, font);
    }
    let mut chart = builder
        .build_cartesian_2d(extent.x_range(), extent.y_range())
        .map_err(draw_error)?;

    let fill = RGBColor::from(style.background_fill);
    let edge = RGBColor::from(style.background_edge).stroke_width(style.px(style.edge_width));
    for background in backgrounds {
        let mut parts = vec![];
        background
            .geometries()
            .0
            .iter()
            .for_each(|geometry| shapes(geometry, &mut parts));
        trace!(background = %background.name, shapes = parts.len());

        for shape in parts {
            match shape {
                Shape::Area { exterior, holes } => {
                    chart
                        .draw_series(std::iter::once(FilledArea::new(
                            exterior.clone(),
                            fill.filled(),
                        )))
                        .map_err(draw_error)?;
                    chart
                        .draw_series(
                            holes
                                .iter()
                                .map(|hole| FilledArea::new(hole.clone(), canvas.filled())),
                        )
                        .map_err(draw_error)?;
                    chart
                        .draw_series(
                            std::iter::once(exterior)
                                .chain(holes)
                                .map(|ring| PathElement::new(ring, edge)),
                        )
                        .map_err(draw_error)?;
                }
                Shape::Path(line) => {
                    chart
                        .draw_series(std::iter::once(PathElement::new(
                            line,
                            fill.stroke_width(style.px(style.edge_width)),
                        )))
                        .map_err(draw_error)?;
                }
            }
        }
    }

    let route = RGBColor::from(style.route_color).stroke_width(style.px(style.route_width));
    chart
        .draw_series(
            routes
                .lines()
                .map(|line| PathElement::new(line.lon_lat().collect::<Vec<_>>(), route)),
        )
        .map_err(draw_error)?;

    Ok(())
}

pub fn render_png(
    path: impl AsRef<Path>,
    backgrounds: &[Background],
    routes: &RouteCollection,
    style: &RasterStyle,
) -> Result<(), Error> {
    let path = path.as_ref();
    let extent = plot_extent(backgrounds, routes, style).ok_or(Error::EmptyExtent)?;
    let size = style.canvas_size(&extent);
    debug!(
        ?size,
        "drawing {} routes over {} backgrounds",
        routes.len(),
        backgrounds.len()
    );

    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw(&root, &extent, backgrounds, routes, style)?;
    root.present().map_err(draw_error)?;

    info!("map saved to {}", path.display());
    Ok(())
}
