use geo::Coord;

use crate::{kml::parse_coordinates, pipe::Pipe, Error, RouteLine};

use super::KmlOperation;

/// Turns coordinate blocks into point lists, propagating reader errors.
#[derive(Debug, Default)]
pub struct CoordinateParser;

impl Pipe for CoordinateParser {
    type Input = Result<KmlOperation, Error>;
    type Output = Vec<Coord<f64>>;

    type Error = Error;

    fn process(&mut self, input: Self::Input) -> Result<Option<Self::Output>, Self::Error> {
        match input? {
            KmlOperation::Coordinates(text) => Ok(Some(parse_coordinates(&text)?)),
            KmlOperation::NotSupported => Ok(None),
        }
    }
}

/// Builds route lines and drops the degenerate ones.
#[derive(Debug, Default)]
pub struct LineAssembler {
    dropped: usize,
}

impl Pipe for LineAssembler {
    type Input = Vec<Coord<f64>>;
    type Output = RouteLine;

    type Error = Error;

    fn process(&mut self, input: Self::Input) -> Result<Option<Self::Output>, Self::Error> {
        let points = input.len();
        let line = RouteLine::new(input);
        if line.is_none() {
            trace!(points, "dropping degenerate LineString");
            self.dropped += 1;
        }
        Ok(line)
    }

    fn close(&mut self) {
        if self.dropped > 0 {
            debug!(
                "dropped {} LineStrings with fewer than {} points",
                self.dropped,
                RouteLine::MIN_POINTS
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pipe::Producer;

    #[test]
    fn degenerate_blocks_are_dropped() {
        let ops = vec![
            Ok(KmlOperation::NotSupported),
            Ok(KmlOperation::Coordinates("1,2 3,4".to_string())),
            Ok(KmlOperation::Coordinates("5,6".to_string())),
            Ok(KmlOperation::Coordinates("".to_string())),
        ];
        let mut lines = ops
            .into_iter()
            .feed(CoordinateParser.pipe(LineAssembler::default()));

        assert_eq!(lines.produce().unwrap().unwrap().num_points(), 2);
        assert!(lines.produce().is_none());
    }
}
