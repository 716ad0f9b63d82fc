use std::ops::Range;

use geo::{BoundingRect, CoordFloat, Rect};

/// Axis aligned plotting extent over lon/lat (or any planar) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent<T: CoordFloat = f64> {
    rect: Rect<T>,
}

impl<T: CoordFloat> Extent<T> {
    pub fn from_corners(a: [T; 2], b: [T; 2]) -> Self {
        Self {
            rect: Rect::new(a, b),
        }
    }

    /// Extent of a single geometry, `None` when the geometry has no coordinates.
    pub fn of<G>(geometry: &G) -> Option<Self>
    where
        G: BoundingRect<T>,
    {
        geometry.bounding_rect().into().map(|rect| Self { rect })
    }

    /// Smallest extent covering every extent of the iterator.
    pub fn union<I>(extents: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        extents.into_iter().reduce(|a, b| a.merged(&b))
    }

    pub fn merged(&self, other: &Self) -> Self {
        let (a, b) = (self.rect.min(), other.rect.min());
        let (c, d) = (self.rect.max(), other.rect.max());
        Self::from_corners([a.x.min(b.x), a.y.min(b.y)], [c.x.max(d.x), c.y.max(d.y)])
    }

    /// Grows each axis by `fraction` of its span on both sides. A zero span is
    /// first widened to one unit so the result can always be plotted.
    pub fn with_margin(&self, fraction: T) -> Self {
        let one = T::one();
        let two = one + one;
        let (min, max) = (self.rect.min(), self.rect.max());

        let (min_x, max_x) = if self.width() > T::zero() {
            (min.x, max.x)
        } else {
            (min.x - one / two, max.x + one / two)
        };
        let (min_y, max_y) = if self.height() > T::zero() {
            (min.y, max.y)
        } else {
            (min.y - one / two, max.y + one / two)
        };

        let dx = (max_x - min_x) * fraction;
        let dy = (max_y - min_y) * fraction;
        Self::from_corners([min_x - dx, min_y - dy], [max_x + dx, max_y + dy])
    }

    /// Raises the lower vertical bound by `fraction` of the vertical span.
    /// The horizontal bounds are left untouched.
    pub fn crop_bottom(&self, fraction: T) -> Self {
        let (min, max) = (self.rect.min(), self.rect.max());
        let min_y = min.y + (max.y - min.y) * fraction;
        Self::from_corners([min.x, min_y], [max.x, max.y])
    }

    /// Horizontal stretch that keeps geographic shapes undistorted when
    /// degrees are drawn on a flat canvas, `1 / cos(mid latitude)`.
    pub fn geographic_aspect(&self) -> T {
        let two = T::one() + T::one();
        let mid = (self.rect.min().y + self.rect.max().y) / two;
        let cos = mid.to_radians().cos();
        if cos > T::epsilon() {
            T::one() / cos
        } else {
            T::one()
        }
    }

    pub fn x_range(&self) -> Range<T> {
        self.rect.min().x..self.rect.max().x
    }

    pub fn y_range(&self) -> Range<T> {
        self.rect.min().y..self.rect.max().y
    }

    pub fn width(&self) -> T {
        self.rect.width()
    }

    pub fn height(&self) -> T {
        self.rect.height()
    }
}
