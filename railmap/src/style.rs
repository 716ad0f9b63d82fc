use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RGB {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RGB {
    pub const WHITE: RGB = RGB::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: RGB = RGB::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// `#RRGGBB`, the form leaflet options expect.
impl fmt::Display for RGB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<RGB> for plotters::style::RGBColor {
    fn from(rgb: RGB) -> Self {
        plotters::style::RGBColor(rgb.r, rgb.g, rgb.b)
    }
}

/// Color of every route line on the static map.
pub const ROUTE_ORANGE: RGB = RGB::new(0xFF, 0xA5, 0x00);

/// Display colors of the web map line groups, in layer control order.
pub const ROUTE_COLORS: [(&str, RGB); 7] = [
    ("Red routes", RGB::new(0xFF, 0x00, 0x00)),
    ("Green routes", RGB::new(0x3C, 0xB3, 0x71)),
    ("Blue routes", RGB::new(0x1E, 0x90, 0xFF)),
    ("Purple routes", RGB::new(0xFF, 0x00, 0xFF)),
    ("Black routes", RGB::BLACK),
    ("White routes", RGB::WHITE),
    ("Orange routes", ROUTE_ORANGE),
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_is_hex() {
        let hex: Vec<_> = ROUTE_COLORS.iter().map(|(_, c)| c.to_string()).collect();

        assert_eq!(
            hex,
            ["#FF0000", "#3CB371", "#1E90FF", "#FF00FF", "#000000", "#FFFFFF", "#FFA500"]
        );
        assert_eq!(RGB::new(0x0A, 0x0B, 0x0C).to_string(), "#0A0B0C");
    }

    #[test]
    fn plotters_color() {
        let plotters::style::RGBColor(r, g, b) = ROUTE_ORANGE.into();
        assert_eq!((r, g, b), (0xFF, 0xA5, 0x00));
    }
}
