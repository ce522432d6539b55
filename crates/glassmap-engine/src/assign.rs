//! Defect assignment orchestration: the save-flow state machine that ties
//! unit conversion, shape resolution, and persistence together.
//!
//! Per request: bypass on the no-defect sentinel, decide whether geometry
//! resolution is mandatory, load the product's panel layout, resolve (with
//! one point-based fallback), then issue exactly one record write. A defect
//! that cannot be placed is rejected; no partial assignment is persisted.

use chrono::Utc;
use glassmap_core::{build_outlines, Panel, Point};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AssignError;
use crate::record::DefectRecord;
use crate::resolve::resolve_kind;
use crate::shape::{normalize_points, ShapeKind};
use crate::units::{to_storage_unit, RoundingMode};

/// Read seam to the layout store.
pub trait LayoutProvider {
    /// Ordered panel layout rows for a product, in storage millimeters.
    /// Empty means no layout is registered.
    fn panels_for_product(&self, product: &str) -> Vec<Panel>;
}

/// Write seam to the defect record store. Insert-or-replace keyed by the
/// record's uuid.
pub trait DefectSink {
    fn put(&mut self, record: DefectRecord);
}

/// Engine policy knobs. Both affect correctness silently, so they are
/// explicit configuration rather than hidden defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rounding applied when converting micrometer input to storage
    /// millimeters, on the persisted coordinates and the resolution input
    /// alike.
    pub rounding: RoundingMode,
    /// Defect code marking a "no defect found" record; resolution is
    /// bypassed entirely and the panel assignment stays empty.
    pub no_defect_code: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::default(),
            no_defect_code: "NORMAL".to_string(),
        }
    }
}

/// A defect-save request as handed over by the capture layer. Coordinates
/// in `geom_data` are micrometers, as `[x, y]` pairs or `{x, y}` objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Caller-generated record id; a v4 uuid is generated when absent.
    pub uuid: Option<String>,
    pub glass_id: Option<String>,
    pub lot_name: Option<String>,
    /// Product model, used to look up the panel layout.
    pub product_id: String,
    pub defect_code: String,
    /// Shape tag: point, line, curve, region, or area (any case).
    pub defect_type: String,
    pub geom_data: Option<Value>,
    /// Caller-supplied panel assignment. Trusted for point defects only;
    /// line and region defects are always re-resolved.
    pub panel_id: Option<String>,
    pub is_symmetry: bool,
    pub machine: Option<String>,
    pub operator_id: Option<String>,
    pub process_operation: Option<String>,
    pub inspection_type: Option<String>,
    pub remark: Option<String>,
}

/// What a successful save produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub uuid: String,
    /// Comma-joined resolved panel ids, empty for sentinel records.
    pub panel_id: String,
    pub panel_count: usize,
}

/// The defect assignment orchestrator. Stateless apart from configuration;
/// panel polygons and shapes are built fresh per call, so one engine can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct AssignEngine {
    config: EngineConfig,
}

impl AssignEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the save flow for one defect. On success exactly one record has
    /// been written to `sink`; on error nothing has been persisted.
    pub fn save(
        &self,
        request: &SaveRequest,
        layout: &dyn LayoutProvider,
        sink: &mut dyn DefectSink,
    ) -> Result<SaveOutcome, AssignError> {
        let uuid = request
            .uuid
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let raw_coords = request.geom_data.clone().unwrap_or(Value::Null);
        let (um_points, skipped) = normalize_points(&raw_coords);
        if skipped > 0 {
            log::warn!(
                "defect {}: skipped {} malformed coordinate point(s)",
                uuid,
                skipped
            );
        }

        let panel_id = if request.defect_code == self.config.no_defect_code {
            String::new()
        } else {
            self.assign_panels(request, &um_points, layout)?
        };
        let panel_count = if panel_id.is_empty() {
            0
        } else {
            panel_id.split(',').count()
        };

        let geom_json = match &request.geom_data {
            None => "[]".to_string(),
            Some(coords) => {
                let (stored, _) = to_storage_unit(coords, self.config.rounding);
                serde_json::to_string(&stored).unwrap_or_else(|_| "[]".to_string())
            }
        };

        log::info!(
            "defect {} on product {}: panel assignment '{}' ({} panel(s))",
            uuid,
            request.product_id,
            panel_id,
            panel_count
        );

        sink.put(DefectRecord {
            uuid: uuid.clone(),
            glass_id: request.glass_id.clone().unwrap_or_default(),
            lot_name: request.lot_name.clone().unwrap_or_default(),
            product_spec: request.product_id.clone(),
            defect_code: request.defect_code.clone(),
            defect_type: request.defect_type.clone(),
            panel_id: panel_id.clone(),
            panel_count,
            geom_data: geom_json,
            is_symmetry: request.is_symmetry,
            machine: request.machine.clone().unwrap_or_default(),
            operator_id: request.operator_id.clone().unwrap_or_default(),
            process_operation: request.process_operation.clone().unwrap_or_default(),
            inspection_type: request.inspection_type.clone().unwrap_or_default(),
            remark: request.remark.clone().unwrap_or_default(),
            created_at: Utc::now().to_rfc3339(),
        });

        Ok(SaveOutcome {
            uuid,
            panel_id,
            panel_count,
        })
    }

    /// Steps 2-5 of the save flow: decide, load, resolve, fall back.
    fn assign_panels(
        &self,
        request: &SaveRequest,
        um_points: &[Point],
        layout: &dyn LayoutProvider,
    ) -> Result<String, AssignError> {
        let kind = ShapeKind::parse(&request.defect_type);
        let has_coords = !um_points.is_empty();
        let supplied = request
            .panel_id
            .clone()
            .filter(|id| !id.trim().is_empty());
        let forced = kind.is_some_and(ShapeKind::forces_resolution);

        // Point defects trust a caller-supplied panel id; line and region
        // defects never do.
        if !forced && (supplied.is_some() || !has_coords) {
            return Ok(supplied.unwrap_or_default());
        }

        let panels = layout.panels_for_product(&request.product_id);
        if panels.is_empty() {
            return Err(AssignError::LayoutNotFound {
                product: request.product_id.to_string(),
            });
        }
        let outlines = build_outlines(&panels);

        // Geometry tests run in the storage unit, like the panel corners.
        let mm_points: Vec<Point> = um_points
            .iter()
            .map(|p| {
                Point::new(
                    self.config.rounding.um_to_mm(p.x) as f64,
                    self.config.rounding.um_to_mm(p.y) as f64,
                )
            })
            .collect();

        let shape_points = match kind {
            // A point defect is located by its first coordinate only.
            Some(ShapeKind::Point) => &mm_points[..mm_points.len().min(1)],
            _ => &mm_points[..],
        };

        let mut resolved = kind.and_then(|k| resolve_kind(k, shape_points, &outlines));

        // Off-boundary line/region defects: the first coordinate is still
        // diagnostically useful, so retry once as a point.
        if resolved.is_none() && has_coords {
            resolved = resolve_kind(ShapeKind::Point, &mm_points[..1], &outlines);
        }

        resolved.ok_or(AssignError::NoPanelMatch)
    }
}
