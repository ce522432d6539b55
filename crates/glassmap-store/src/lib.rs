//! # Glassmap Store
//!
//! In-memory implementations of the engine's storage seams: the panel
//! layout provider and the defect record sink, plus the read views that
//! convert stored millimeter coordinates back to the capture grid. JSON
//! snapshots stand in for whatever persistence the deployment uses.

pub mod layout;
pub mod records;

pub use layout::LayoutStore;
pub use records::{DefectView, PathPoint, RecordStore};

#[cfg(test)]
mod tests {
    use super::*;
    use glassmap_core::{Corner, Panel};
    use glassmap_engine::{AssignEngine, SaveRequest};
    use serde_json::json;

    /// Full save-then-read flow across the engine and both stores.
    #[test]
    fn test_save_and_read_round_trip() {
        let mut layout = LayoutStore::new();
        layout.set_product(
            "P1",
            vec![Panel::new(
                "11",
                Corner::new(0, 1000),
                Corner::new(1000, 1000),
                Corner::new(1000, 0),
                Corner::new(0, 0),
            )],
        );
        let mut records = RecordStore::new();
        let engine = AssignEngine::default();

        let request = SaveRequest {
            uuid: Some("defect-1".to_string()),
            glass_id: Some("G100".to_string()),
            lot_name: Some("L5".to_string()),
            product_id: "P1".to_string(),
            defect_code: "C01".to_string(),
            defect_type: "point".to_string(),
            geom_data: Some(json!([[250000, 750000]])),
            ..Default::default()
        };
        let outcome = engine.save(&request, &layout, &mut records).unwrap();
        assert_eq!(outcome.panel_id, "11");

        let stored = records.get("defect-1").unwrap();
        assert_eq!(stored.geom_data, "[[250,750]]");

        let view = DefectView::from_record(stored);
        // Read side converts back to micrometers; the sub-millimeter part
        // of the original input would already have been rounded away.
        assert_eq!(view.path, vec![PathPoint { x: 250000, y: 750000 }]);
        assert_eq!(view.panel_ids, vec!["11".to_string()]);

        // Saving the same uuid again replaces, never duplicates.
        engine.save(&request, &layout, &mut records).unwrap();
        assert_eq!(records.len(), 1);
    }
}
