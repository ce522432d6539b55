use thiserror::Error;

/// Failure reasons a defect-save request can surface to its caller.
///
/// Geometric "no match" inside the resolver is an `Option`, never an error;
/// these variants exist only at the orchestration boundary, where an
/// unresolved defect means the save must be rejected rather than persisted
/// with a wrong panel assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    /// No panel layout rows are registered for the product. Hard failure,
    /// not an empty match.
    #[error("no panel layout found for product '{product}'")]
    LayoutNotFound { product: String },

    /// Geometry resolved to zero panels even after the point fallback.
    #[error("defect coordinates do not fall within any panel")]
    NoPanelMatch,
}
