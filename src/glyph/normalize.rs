use super::{Contour, Point};

/// Rescales a contour so its bounding box maps onto the unit square.
///
/// Returns an empty contour for empty input or a bounding box with zero
/// width or height.
pub fn normalize_contour(contour: &[Point]) -> Contour {
    if contour.is_empty() {
        return vec![];
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in contour {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let width = max_x - min_x;
    let height = max_y - min_y;
    if width == 0.0 || height == 0.0 {
        return vec![];
    }

    contour
        .iter()
        .map(|p| Point::new((p.x - min_x) / width, (p.y - min_y) / height))
        .collect()
}
