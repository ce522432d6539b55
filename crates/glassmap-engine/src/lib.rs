//! # Glassmap Engine
//!
//! Maps inspection defects onto the panels of a glass substrate: coordinate
//! unit conversion between the capture grid (micrometers) and the storage
//! grid (integer millimeters), shape classification and normalization,
//! geometric panel resolution, and the defect-save orchestration that ties
//! them together.
//!
//! All geometry is synchronous and pure; the engine's only side effects are
//! the layout read and single record write delegated through the
//! [`LayoutProvider`] and [`DefectSink`] seams.

pub mod assign;
pub mod error;
pub mod record;
pub mod resolve;
pub mod shape;
pub mod units;

pub use assign::{AssignEngine, DefectSink, EngineConfig, LayoutProvider, SaveOutcome, SaveRequest};
pub use error::AssignError;
pub use record::DefectRecord;
pub use resolve::{resolve, resolve_kind};
pub use shape::{normalize_points, ShapeKind};
pub use units::{to_compute_unit, to_storage_unit, ConvertStats, RoundingMode};
