//! Shape-to-panel resolution.
//!
//! A point defect belongs to the panel it lies strictly inside
//! (boundary-exclusive). Line and region defects match every panel their
//! geometry touches, boundary included, and the result carries all matching
//! panel ids joined by commas in panel-list order.

use glassmap_core::{BBox, PanelIndex, PanelOutline, Point, Polygon};

use crate::shape::ShapeKind;

/// Resolve a raw shape tag against a product's panel outlines. Unknown
/// tags resolve to `None`; so does a shape that touches no panel.
pub fn resolve(tag: &str, points: &[Point], outlines: &[PanelOutline]) -> Option<String> {
    resolve_kind(ShapeKind::parse(tag)?, points, outlines)
}

/// Resolve an already-classified shape. Assumes the caller has enforced the
/// kind's minimum arity; shorter sequences simply match nothing.
pub fn resolve_kind(
    kind: ShapeKind,
    points: &[Point],
    outlines: &[PanelOutline],
) -> Option<String> {
    let result = match kind {
        ShapeKind::Point => resolve_point(points.first()?, outlines),
        ShapeKind::Line => resolve_line(points, outlines),
        ShapeKind::Region => resolve_region(points, outlines),
    };
    log::debug!(
        "resolved {:?} shape ({} coords) against {} panels: {:?}",
        kind,
        points.len(),
        outlines.len(),
        result
    );
    result
}

/// First panel, in panel-list order, that strictly contains the point.
fn resolve_point(point: &Point, outlines: &[PanelOutline]) -> Option<String> {
    let index = PanelIndex::build(outlines);
    index
        .candidates_at_point(point)
        .into_iter()
        .find(|&i| outlines[i].polygon.contains_point_strict(point))
        .map(|i| outlines[i].panel_id.clone())
}

/// Every panel the open polyline touches or crosses, comma-joined.
fn resolve_line(points: &[Point], outlines: &[PanelOutline]) -> Option<String> {
    if points.len() < 2 {
        return None;
    }
    collect_matches(points, outlines, |polygon| polygon.intersects_polyline(points))
}

/// Every panel the filled region overlaps or touches, comma-joined. The
/// sequence is closed first if its endpoints differ.
fn resolve_region(points: &[Point], outlines: &[PanelOutline]) -> Option<String> {
    if points.len() < 3 {
        return None;
    }
    let region = Polygon::closed(points.to_vec());
    collect_matches(points, outlines, |polygon| polygon.intersects_polygon(&region))
}

fn collect_matches<F>(points: &[Point], outlines: &[PanelOutline], touches: F) -> Option<String>
where
    F: Fn(&Polygon) -> bool,
{
    let query = BBox::from_points(points)?;
    let index = PanelIndex::build(outlines);
    let ids: Vec<&str> = index
        .candidates_in_bbox(&query)
        .into_iter()
        .filter(|&i| touches(&outlines[i].polygon))
        .map(|i| outlines[i].panel_id.as_str())
        .collect();

    if ids.is_empty() {
        None
    } else {
        Some(ids.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glassmap_core::{build_outlines, Corner, Panel};

    fn panel(id: &str, x0: i64, y0: i64, x1: i64, y1: i64) -> Panel {
        Panel::new(
            id,
            Corner::new(x0, y1),
            Corner::new(x1, y1),
            Corner::new(x1, y0),
            Corner::new(x0, y0),
        )
    }

    fn two_by_one_layout() -> Vec<PanelOutline> {
        build_outlines(&[
            panel("1", 0, 0, 1000, 1000),
            panel("2", 1000, 0, 2000, 1000),
        ])
    }

    #[test]
    fn test_point_inside_and_outside() {
        let outlines = two_by_one_layout();
        let inside = [Point::new(500.0, 500.0)];
        assert_eq!(
            resolve_kind(ShapeKind::Point, &inside, &outlines),
            Some("1".to_string())
        );
        let outside = [Point::new(2500.0, 500.0)];
        assert_eq!(resolve_kind(ShapeKind::Point, &outside, &outlines), None);
    }

    #[test]
    fn test_point_on_boundary_is_not_contained() {
        let outlines = two_by_one_layout();
        // The shared edge belongs to neither panel under strict containment.
        let edge = [Point::new(1000.0, 500.0)];
        assert_eq!(resolve_kind(ShapeKind::Point, &edge, &outlines), None);
    }

    #[test]
    fn test_line_collects_crossed_panels_in_order() {
        let outlines = two_by_one_layout();
        let line = [Point::new(-100.0, 500.0), Point::new(2500.0, 500.0)];
        assert_eq!(
            resolve_kind(ShapeKind::Line, &line, &outlines),
            Some("1,2".to_string())
        );
    }

    #[test]
    fn test_line_touching_boundary_matches() {
        let outlines = two_by_one_layout();
        // Grazes the right edge of panel 2 only.
        let line = [Point::new(2000.0, -100.0), Point::new(2000.0, 1100.0)];
        assert_eq!(
            resolve_kind(ShapeKind::Line, &line, &outlines),
            Some("2".to_string())
        );
    }

    #[test]
    fn test_line_missing_all_panels() {
        let outlines = two_by_one_layout();
        let line = [Point::new(0.0, 2000.0), Point::new(2000.0, 2000.0)];
        assert_eq!(resolve_kind(ShapeKind::Line, &line, &outlines), None);
    }

    #[test]
    fn test_region_sharing_one_edge_matches() {
        let outlines = build_outlines(&[panel("1", 0, 0, 1000, 1000)]);
        // Sits on top of the panel, sharing exactly its y = 1000 edge.
        let region = [
            Point::new(0.0, 1000.0),
            Point::new(1000.0, 1000.0),
            Point::new(1000.0, 1500.0),
            Point::new(0.0, 1500.0),
        ];
        assert_eq!(
            resolve_kind(ShapeKind::Region, &region, &outlines),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_open_region_is_closed_before_testing() {
        let outlines = two_by_one_layout();
        // Open triangle spanning both panels; the closing edge is implied.
        let region = [
            Point::new(500.0, 200.0),
            Point::new(1500.0, 200.0),
            Point::new(1000.0, 800.0),
        ];
        assert_eq!(
            resolve_kind(ShapeKind::Region, &region, &outlines),
            Some("1,2".to_string())
        );
    }

    #[test]
    fn test_unknown_tag_resolves_to_none() {
        let outlines = two_by_one_layout();
        let inside = [Point::new(500.0, 500.0)];
        assert_eq!(resolve("scratch", &inside, &outlines), None);
        assert_eq!(
            resolve("POINT", &inside, &outlines),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_region_engulfing_a_panel_matches() {
        let outlines = two_by_one_layout();
        let region = [
            Point::new(-100.0, -100.0),
            Point::new(1100.0, -100.0),
            Point::new(1100.0, 1100.0),
            Point::new(-100.0, 1100.0),
        ];
        assert_eq!(
            resolve_kind(ShapeKind::Region, &region, &outlines),
            Some("1,2".to_string())
        );
    }
}
