use std::{fs::File, io::BufReader, path::Path};

use extent::Extent;
use geo::GeometryCollection;
use geojson::GeoJson;

use crate::{crs::Crs, Error};

/// Backdrop geometries of the static map, always in WGS84 lon/lat.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub name: String,
    geometries: GeometryCollection<f64>,
}

impl Background {
    pub fn from_geojson(name: impl Into<String>, geojson: &GeoJson) -> Result<Self, Error> {
        let crs = Crs::from_geojson(geojson)?;
        let mut geometries = GeometryCollection::<f64>::try_from(geojson)?;
        crs.reproject(&mut geometries);

        Ok(Self {
            name: name.into(),
            geometries,
        })
    }

    pub fn geometries(&self) -> &GeometryCollection<f64> {
        &self.geometries
    }

    pub fn extent(&self) -> Option<Extent> {
        Extent::of(&self.geometries)
    }
}

pub fn load_background(path: impl AsRef<Path>) -> Result<Background, Error> {
    let path = path.as_ref();
    let geojson = GeoJson::from_reader(BufReader::new(File::open(path)?))?;
    let background = Background::from_geojson(path.display().to_string(), &geojson)?;

    info!(
        "loaded {} background geometries from {}",
        background.geometries.len(),
        path.display()
    );
    Ok(background)
}

pub fn load_backgrounds<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Background>, Error> {
    paths.iter().map(load_background).collect()
}
