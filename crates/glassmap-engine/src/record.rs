use serde::{Deserialize, Serialize};

/// A persisted defect record, keyed by `uuid`. Exactly one record is
/// written per save request (insert-or-replace).
///
/// `geom_data` holds the defect's coordinate sequence in the storage unit
/// (integer millimeters) as a JSON string; `panel_id` is the comma-joined
/// resolution result, empty when the defect carries the no-defect sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectRecord {
    pub uuid: String,
    /// Glass (substrate) identifier the defect was found on.
    pub glass_id: String,
    pub lot_name: String,
    /// Product model whose layout the defect was resolved against.
    pub product_spec: String,
    pub defect_code: String,
    pub defect_type: String,
    pub panel_id: String,
    /// Number of comma-separated ids in `panel_id`, 0 when empty.
    pub panel_count: usize,
    pub geom_data: String,
    /// Record produced by mask-symmetry mirroring rather than observation.
    pub is_symmetry: bool,
    pub machine: String,
    pub operator_id: String,
    pub process_operation: String,
    pub inspection_type: String,
    pub remark: String,
    /// RFC 3339 timestamp set when the record is built.
    pub created_at: String,
}
