use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use glassmap_engine::{to_compute_unit, DefectRecord, DefectSink};

/// In-memory defect record storage keyed by record uuid. A save is always
/// insert-or-replace; two saves for the same uuid leave one record.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RecordStore {
    records: HashMap<String, DefectRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, uuid: &str) -> Option<&DefectRecord> {
        self.records.get(uuid)
    }

    pub fn remove(&mut self, uuid: &str) -> Option<DefectRecord> {
        self.records.remove(uuid)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records for one glass substrate, optionally narrowed to a process
    /// operation (inspection station).
    pub fn by_glass(&self, glass_id: &str, process_operation: Option<&str>) -> Vec<&DefectRecord> {
        self.filtered(|r| r.glass_id == glass_id, process_operation)
    }

    /// Records for every glass in a lot, optionally narrowed to a process
    /// operation.
    pub fn by_lot(&self, lot_name: &str, process_operation: Option<&str>) -> Vec<&DefectRecord> {
        self.filtered(|r| r.lot_name == lot_name, process_operation)
    }

    fn filtered<F>(&self, pred: F, process_operation: Option<&str>) -> Vec<&DefectRecord>
    where
        F: Fn(&DefectRecord) -> bool,
    {
        let mut matches: Vec<&DefectRecord> = self
            .records
            .values()
            .filter(|r| pred(r))
            .filter(|r| process_operation.is_none_or(|op| r.process_operation == op))
            .collect();
        // HashMap iteration order is arbitrary; present oldest first.
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.uuid.cmp(&b.uuid)));
        matches
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl DefectSink for RecordStore {
    fn put(&mut self, record: DefectRecord) {
        self.records.insert(record.uuid.clone(), record);
    }
}

/// A capture-grid coordinate in a read view, micrometers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: i64,
    pub y: i64,
}

/// Read model of a stored defect with coordinates converted back to the
/// capture grid — the symmetric counterpart of the save-side conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefectView {
    pub uuid: String,
    pub glass_id: String,
    pub defect_code: String,
    pub defect_type: String,
    /// The comma-joined assignment split back into individual ids.
    pub panel_ids: Vec<String>,
    pub panel_count: usize,
    /// Defect trace in micrometers.
    pub path: Vec<PathPoint>,
    /// First trace coordinate, when any point survived conversion.
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub created_at: String,
}

impl DefectView {
    pub fn from_record(record: &DefectRecord) -> Self {
        let parsed: Value = serde_json::from_str(&record.geom_data).unwrap_or_else(|e| {
            log::debug!("defect {}: unreadable geom_data ({})", record.uuid, e);
            Value::Null
        });
        let (points, _stats) = to_compute_unit(&parsed);
        let path: Vec<PathPoint> = points
            .into_iter()
            .map(|[x, y]| PathPoint { x, y })
            .collect();

        let panel_ids: Vec<String> = record
            .panel_id
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            uuid: record.uuid.clone(),
            glass_id: record.glass_id.clone(),
            defect_code: record.defect_code.clone(),
            defect_type: record.defect_type.clone(),
            panel_count: panel_ids.len(),
            panel_ids,
            x: path.first().map(|p| p.x),
            y: path.first().map(|p| p.y),
            path,
            created_at: record.created_at.clone(),
        }
    }
}
