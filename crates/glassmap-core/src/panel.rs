use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Polygon};

/// One corner of a panel in storage coordinates (integer millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corner {
    pub x: i64,
    pub y: i64,
}

impl Corner {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// A panel layout row: one rectangular (possibly tilted) sub-region of a
/// glass substrate, identified within a product's layout. Layout rows are
/// reference data owned by upstream storage; the engine never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub panel_id: String,
    pub left_up: Corner,
    pub right_up: Corner,
    pub right_down: Corner,
    pub left_down: Corner,
}

impl Panel {
    pub fn new(
        panel_id: &str,
        left_up: Corner,
        right_up: Corner,
        right_down: Corner,
        left_down: Corner,
    ) -> Self {
        Self {
            panel_id: panel_id.to_string(),
            left_up,
            right_up,
            right_down,
            left_down,
        }
    }

    /// Closed outline in the fixed corner order
    /// left_up -> right_up -> right_down -> left_down -> left_up.
    /// No simplicity validation; a self-intersecting quad is a layout-data
    /// defect and gives undefined (but non-panicking) test results.
    pub fn outline(&self) -> Polygon {
        Polygon::closed(vec![
            self.left_up.to_point(),
            self.right_up.to_point(),
            self.right_down.to_point(),
            self.left_down.to_point(),
        ])
    }
}

/// A panel id paired with its ready-to-test outline polygon.
#[derive(Debug, Clone)]
pub struct PanelOutline {
    pub panel_id: String,
    pub polygon: Polygon,
}

/// Build test-ready outlines for a product's panel list, preserving order.
pub fn build_outlines(panels: &[Panel]) -> Vec<PanelOutline> {
    panels
        .iter()
        .map(|panel| PanelOutline {
            panel_id: panel.panel_id.clone(),
            polygon: panel.outline(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn axis_panel(id: &str, x0: i64, y0: i64, x1: i64, y1: i64) -> Panel {
        Panel::new(
            id,
            Corner::new(x0, y1),
            Corner::new(x1, y1),
            Corner::new(x1, y0),
            Corner::new(x0, y0),
        )
    }

    #[test]
    fn test_outline_is_closed_quad() {
        let panel = axis_panel("P1", 0, 0, 1000, 1000);
        let poly = panel.outline();
        assert_eq!(poly.vertices().len(), 5);
        assert!(poly.contains_point_strict(&Point::new(500.0, 500.0)));
    }

    #[test]
    fn test_build_outlines_preserves_order() {
        let panels = vec![
            axis_panel("1", 0, 0, 100, 100),
            axis_panel("2", 100, 0, 200, 100),
            axis_panel("3", 200, 0, 300, 100),
        ];
        let outlines = build_outlines(&panels);
        let ids: Vec<&str> = outlines.iter().map(|o| o.panel_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_tilted_panel_containment() {
        // Diamond: still a simple quad in corner order.
        let panel = Panel::new(
            "tilt",
            Corner::new(0, 10),
            Corner::new(10, 20),
            Corner::new(20, 10),
            Corner::new(10, 0),
        );
        let poly = panel.outline();
        assert!(poly.contains_point_strict(&Point::new(10.0, 10.0)));
        assert!(!poly.contains_point_strict(&Point::new(1.0, 1.0)));
    }
}
