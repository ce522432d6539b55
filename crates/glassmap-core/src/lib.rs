//! # Glassmap Core
//!
//! Panel layout model and geometry predicates for mapping inspection
//! defects onto the panels of a glass substrate: closed outline polygons
//! from four-corner layout rows, strict and inclusive containment,
//! polyline/polygon intersection, and an R-tree candidate prefilter.

pub mod geometry;
pub mod panel;
pub mod spatial;

pub use geometry::{segments_intersect, BBox, Point, Polygon};
pub use panel::{build_outlines, Corner, Panel, PanelOutline};
pub use spatial::PanelIndex;
