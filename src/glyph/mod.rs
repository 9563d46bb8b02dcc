pub mod features;
pub mod font_file;
pub mod normalize;
pub mod outline;

/// A point of a glyph outline, in font units or normalized units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Angle of the segment `self -> other`, in radians within [-pi, pi].
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// One closed sub-path of a glyph. Never empty once collected.
pub type Contour = Vec<Point>;

/// Alternating (segment length, segment angle) values.
pub type FeatureVector = Vec<f64>;
