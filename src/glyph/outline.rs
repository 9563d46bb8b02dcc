use super::{Contour, Point};
use ttf_parser::OutlineBuilder;

/// Accumulates the contours of one glyph from its drawing instructions.
///
/// Curves are not evaluated: every control point and end point becomes a
/// vertex of the current contour. For TrueType outlines `ttf_parser` emits
/// the implied on-curve midpoint between two consecutive off-curve points as
/// an explicit end point, and closes each contour with a segment back to its
/// start, so those extra points become vertices too.
#[derive(Debug, Default)]
pub struct ContourCollector {
    contours: Vec<Contour>,
    current: Contour,
}

impl ContourCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new contour, implicitly closing an open one.
    pub fn move_to(&mut self, p: Point) {
        self.flush();
        self.current.push(p);
    }

    pub fn line_to(&mut self, p: Point) {
        self.current.push(p);
    }

    pub fn quad_to(&mut self, control: Point, p: Point) {
        self.current.extend([control, p]);
    }

    pub fn curve_to(&mut self, control1: Point, control2: Point, p: Point) {
        self.current.extend([control1, control2, p]);
    }

    pub fn close(&mut self) {
        self.flush();
    }

    /// Ends drawing; an open path without an explicit close is kept.
    pub fn end(&mut self) {
        self.flush();
    }

    pub fn finish(mut self) -> Vec<Contour> {
        self.end();
        self.contours
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.contours.push(std::mem::take(&mut self.current));
        }
    }
}

impl OutlineBuilder for ContourCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        ContourCollector::move_to(self, point(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        ContourCollector::line_to(self, point(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        ContourCollector::quad_to(self, point(x1, y1), point(x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        ContourCollector::curve_to(self, point(x1, y1), point(x2, y2), point(x, y));
    }

    fn close(&mut self) {
        ContourCollector::close(self);
    }
}

fn point(x: f32, y: f32) -> Point {
    Point::new(x as f64, y as f64)
}
