use super::normalize::normalize_contour;
use super::outline::ContourCollector;
use super::{Contour, FeatureVector};
use crate::error::GlyphError;
use ttf_parser::Face;

/// Concatenates (length, angle) for every edge of every normalized contour,
/// including the edge closing each contour back to its first point.
/// Degenerate contours contribute nothing.
pub fn contour_features(contours: &[Contour]) -> FeatureVector {
    let mut features = Vec::new();
    for contour in contours {
        let normalized = normalize_contour(contour);
        let len = normalized.len();
        for (i, p1) in normalized.iter().enumerate() {
            let p2 = &normalized[(i + 1) % len];
            features.push(p1.distance(p2));
            features.push(p1.angle_to(p2));
        }
    }
    features
}

pub fn extract_contours(face: &Face, ch: char) -> Result<Vec<Contour>, GlyphError> {
    let glyph_id = face.glyph_index(ch).ok_or(GlyphError::MissingGlyph(ch))?;
    let mut collector = ContourCollector::new();
    face.outline_glyph(glyph_id, &mut collector)
        .ok_or(GlyphError::NoOutline(ch))?;
    let contours = collector.finish();
    if contours.is_empty() {
        return Err(GlyphError::NoOutline(ch));
    }
    Ok(contours)
}

/// Vectorizes the glyph `face` maps to `ch`.
pub fn glyph_to_vector(face: &Face, ch: char) -> Result<FeatureVector, GlyphError> {
    let contours = extract_contours(face, ch)?;
    let features = contour_features(&contours);
    if features.is_empty() {
        return Err(GlyphError::DegenerateContour(ch));
    }
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Point;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn square() -> Contour {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn square_edges_include_wrap_around() {
        let features = contour_features(&[square()]);
        assert_eq!(features.len(), 8);
        let lengths: Vec<f64> = features.iter().step_by(2).copied().collect();
        assert_eq!(lengths, vec![1.0, 1.0, 1.0, 1.0]);
        let angles: Vec<f64> = features.iter().skip(1).step_by(2).copied().collect();
        assert_eq!(angles, vec![0.0, FRAC_PI_2, PI, -FRAC_PI_2]);
    }

    #[test]
    fn length_is_twice_the_surviving_point_count() {
        let triangle = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
        ];
        let flat = vec![Point::new(0.0, 1.0), Point::new(5.0, 1.0)];
        let features = contour_features(&[square(), flat, triangle]);
        assert_eq!(features.len(), 2 * (4 + 3));
        assert_eq!(features.len() % 2, 0);
    }

    #[test]
    fn contour_order_is_preserved() {
        let triangle = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
        ];
        let features = contour_features(&[triangle.clone(), square()]);
        assert_eq!(features[..6], contour_features(&[triangle])[..]);
        assert_eq!(features[6..], contour_features(&[square()])[..]);
    }

    const HANGUL_TTF: &[u8] = include_bytes!("testdata/hangul.ttf");

    #[test]
    fn mapped_glyph_gives_even_vector() {
        let face = Face::parse(HANGUL_TTF, 0).unwrap();
        // square and triangle, each closed back to its start point
        let contours = extract_contours(&face, '가').unwrap();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].first(), contours[0].last());
        assert_eq!(contours[0][1], Point::new(100.0, 0.0));

        let vector = glyph_to_vector(&face, '가').unwrap();
        assert_eq!(vector.len(), 2 * (5 + 4));
        assert_eq!(vector[0], 1.0);
        assert_eq!(vector[1], 0.0);
        assert_eq!(glyph_to_vector(&face, '각').unwrap().len(), 8);
    }

    #[test]
    fn unmapped_code_point_is_missing() {
        let face = Face::parse(HANGUL_TTF, 0).unwrap();
        assert!(matches!(
            glyph_to_vector(&face, '다'),
            Err(GlyphError::MissingGlyph('다'))
        ));
    }

    #[test]
    fn space_has_no_outline() {
        let face = Face::parse(HANGUL_TTF, 0).unwrap();
        assert!(matches!(
            glyph_to_vector(&face, ' '),
            Err(GlyphError::NoOutline(' '))
        ));
    }

    #[test]
    fn flat_glyph_is_degenerate() {
        let face = Face::parse(HANGUL_TTF, 0).unwrap();
        assert!(matches!(
            glyph_to_vector(&face, '나'),
            Err(GlyphError::DegenerateContour('나'))
        ));
    }

    #[test]
    fn only_degenerate_contours_give_nothing() {
        let dot = vec![Point::new(3.0, 3.0)];
        assert!(contour_features(&[dot]).is_empty());
        assert!(contour_features(&[]).is_empty());
    }
}
