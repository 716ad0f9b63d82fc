use geo::Coord;
use nom::{
    branch::alt,
    character::complete::char,
    combinator::{eof, rest},
    number::complete::double,
    sequence::{preceded, separated_pair},
    IResult,
};

use super::KmlError;

/// `lon,lat` followed by nothing or by `,` and anything (altitude).
pub fn lon_lat(s: &str) -> IResult<&str, Coord<f64>> {
    let (s, (x, y)) = separated_pair(double, char(','), double)(s)?;
    let (s, _) = alt((eof, preceded(char(','), rest)))(s)?;
    Ok((s, Coord { x, y }))
}

/// Parses the text of a kml `coordinates` element. Whitespace separated
/// tokens without a comma are skipped.
pub fn parse_coordinates(text: &str) -> Result<Vec<Coord<f64>>, KmlError> {
    text.split_whitespace()
        .filter(|token| token.contains(','))
        .map(|token| {
            lon_lat(token)
                .map(|(_, coord)| coord)
                .map_err(|_| KmlError::InvalidCoordinate {
                    token: token.to_owned(),
                })
        })
        .collect()
}
