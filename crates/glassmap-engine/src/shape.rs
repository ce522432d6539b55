//! Defect shape classification and coordinate ingestion.
//!
//! Capture clients send coordinates in two representations, `[x, y]` arrays
//! and `{"x": .., "y": ..}` objects, sometimes mixed in one sequence. Both
//! are normalized into [`Point`] here, at the boundary, so nothing past this
//! module sees the representation variance.

use glassmap_core::Point;
use serde::Deserialize;
use serde_json::Value;

/// Closed classification of a defect's geometry. The string tag is folded
/// to lowercase exactly once, here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Point,
    Line,
    Region,
}

impl ShapeKind {
    /// Parse a shape tag case-insensitively. `line`/`curve` map to `Line`,
    /// `region`/`area` to `Region`. Unknown tags are `None`, not an error;
    /// the caller decides whether a missing kind is fatal.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "point" => Some(ShapeKind::Point),
            "line" | "curve" => Some(ShapeKind::Line),
            "region" | "area" => Some(ShapeKind::Region),
            _ => None,
        }
    }

    /// Line and region defects are always re-resolved from geometry, even
    /// when the caller already supplied a panel id.
    pub fn forces_resolution(self) -> bool {
        matches!(self, ShapeKind::Line | ShapeKind::Region)
    }

    /// Minimum coordinate count for a well-formed shape of this kind.
    pub fn min_arity(self) -> usize {
        match self {
            ShapeKind::Point => 1,
            ShapeKind::Line => 2,
            ShapeKind::Region => 3,
        }
    }
}

/// One raw coordinate as it arrives from capture. Extra array elements
/// beyond x and y are ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Pair(Vec<f64>),
    Xy { x: f64, y: f64 },
}

impl RawPoint {
    fn to_point(&self) -> Option<Point> {
        match self {
            RawPoint::Pair(values) if values.len() >= 2 => {
                Some(Point::new(values[0], values[1]))
            }
            RawPoint::Pair(_) => None,
            RawPoint::Xy { x, y } => Some(Point::new(*x, *y)),
        }
    }
}

/// Normalize a raw coordinate sequence into points, dropping entries that
/// fail arity or type checks. Returns the points and the dropped count.
/// Non-array input normalizes to an empty sequence.
pub fn normalize_points(coords: &Value) -> (Vec<Point>, usize) {
    let Some(entries) = coords.as_array() else {
        return (Vec::new(), 0);
    };

    let mut points = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for entry in entries {
        let parsed = serde_json::from_value::<RawPoint>(entry.clone())
            .ok()
            .and_then(|raw| raw.to_point());
        match parsed {
            Some(point) => points.push(point),
            None => skipped += 1,
        }
    }
    (points, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_parsing_is_case_insensitive() {
        assert_eq!(ShapeKind::parse("POINT"), Some(ShapeKind::Point));
        assert_eq!(ShapeKind::parse("Line"), Some(ShapeKind::Line));
        assert_eq!(ShapeKind::parse("curve"), Some(ShapeKind::Line));
        assert_eq!(ShapeKind::parse("Region"), Some(ShapeKind::Region));
        assert_eq!(ShapeKind::parse("AREA"), Some(ShapeKind::Region));
        assert_eq!(ShapeKind::parse("scratch"), None);
        assert_eq!(ShapeKind::parse(""), None);
    }

    #[test]
    fn test_force_resolution_set() {
        assert!(!ShapeKind::Point.forces_resolution());
        assert!(ShapeKind::Line.forces_resolution());
        assert!(ShapeKind::Region.forces_resolution());
    }

    #[test]
    fn test_normalize_mixed_representations() {
        let coords = json!([[100, 200], {"x": 300, "y": 400}, [500, 600, 999]]);
        let (points, skipped) = normalize_points(&coords);
        assert_eq!(skipped, 0);
        assert_eq!(
            points,
            vec![
                Point::new(100.0, 200.0),
                Point::new(300.0, 400.0),
                Point::new(500.0, 600.0),
            ]
        );
    }

    #[test]
    fn test_normalize_drops_malformed() {
        let coords = json!([["abc", 5], [1], {"x": 7}, null, [10, 20]]);
        let (points, skipped) = normalize_points(&coords);
        assert_eq!(points, vec![Point::new(10.0, 20.0)]);
        assert_eq!(skipped, 4);
    }

    #[test]
    fn test_normalize_non_list_input() {
        let (points, skipped) = normalize_points(&Value::Null);
        assert!(points.is_empty());
        assert_eq!(skipped, 0);
    }
}
