mod assemble;
mod reader;
pub mod parse;

use std::{fs::File, io::BufRead, io::BufReader, path::Path};

pub use assemble::{CoordinateParser, LineAssembler};
pub use parse::parse_coordinates;
pub use reader::{KmlOperation, KmlReader, KML_NAMESPACE};

use crate::{
    pipe::{Pipe, Producer},
    Error, RouteLine,
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum KmlError {
    #[error("invalid coordinate tuple `{token}`, expected `longitude,latitude[,altitude]`")]
    InvalidCoordinate { token: String },
    #[error("document ends with {open} elements still open")]
    UnexpectedEof { open: usize },
    #[error("not a kml document, no root element")]
    NoRootElement,
}

/// Every `LineString` of the kml document with at least two points, in
/// document order.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<RouteLine>, Error> {
    KmlReader::new(reader)
        .feed(CoordinateParser.pipe(LineAssembler::default()))
        .drain()
        .collect()
}

#[tracing::instrument(skip_all, fields(file = %path.as_ref().display()))]
pub fn extract_lines(path: impl AsRef<Path>) -> Result<Vec<RouteLine>, Error> {
    let lines = read_lines(BufReader::new(File::open(path.as_ref())?))?;

    info!("extracted {} LineStrings", lines.len());
    Ok(lines)
}
