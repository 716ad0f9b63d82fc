use geo::{Coord, LineString};

/// One railway polyline extracted from a kml `LineString`, stored as
/// (longitude, latitude) and never shorter than [`RouteLine::MIN_POINTS`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLine(LineString<f64>);

impl RouteLine {
    pub const MIN_POINTS: usize = 2;

    /// Returns `None` for degenerate lines.
    pub fn new(coords: Vec<Coord<f64>>) -> Option<Self> {
        (coords.len() >= Self::MIN_POINTS).then(|| Self(LineString::new(coords)))
    }

    pub fn num_points(&self) -> usize {
        self.0.0.len()
    }

    pub fn line_string(&self) -> &LineString<f64> {
        &self.0
    }

    /// Points in plotting order, x = longitude and y = latitude.
    pub fn lon_lat(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.0.coords().map(|c| (c.x, c.y))
    }

    /// Points in web map order, latitude first.
    pub fn lat_lon(&self) -> Vec<[f64; 2]> {
        self.0.coords().map(|c| [c.y, c.x]).collect()
    }
}

/// Lines of a single kml file.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSource {
    pub file_name: String,
    /// Display name, see [`clean_file_name`].
    pub name: String,
    pub lines: Vec<RouteLine>,
}

impl RouteSource {
    pub fn new(file_name: impl Into<String>, lines: Vec<RouteLine>) -> Self {
        let file_name = file_name.into();
        Self {
            name: clean_file_name(&file_name),
            file_name,
            lines,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteCollection {
    sources: Vec<RouteSource>,
}

impl RouteCollection {
    pub fn new(sources: Vec<RouteSource>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[RouteSource] {
        &self.sources
    }

    pub fn lines(&self) -> impl Iterator<Item = &RouteLine> + '_ {
        self.sources.iter().flat_map(|source| source.lines.iter())
    }

    pub fn len(&self) -> usize {
        self.sources.iter().map(|source| source.lines.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drops the first parenthesized segment and the `.kml` suffix,
/// `"Beijing-Shanghai(2024).kml"` becomes `"Beijing-Shanghai"`.
pub fn clean_file_name(name: &str) -> String {
    let mut name = name.to_owned();
    if let Some(left) = name.find('(') {
        if let Some(right) = name[left..].find(')') {
            name.replace_range(left..=left + right, "");
        }
    }
    name.replace(".kml", "")
}
