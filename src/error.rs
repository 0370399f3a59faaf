use thiserror::Error;

use crate::part::Handle;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MergeError {
    #[error("Open and closed parts are empty")]
    EmptyInput,

    #[error("Degenerate entity {handle}: {reason}")]
    DegenerateEntity { handle: Handle, reason: String },

    #[error("Unresolvable open parts left over: {}", join_handles(.handles))]
    UnresolvableGeometry { handles: Vec<Handle> },

    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(f64),

    #[error("Invalid nested coverage ratio: {0} (expected 0 < ratio <= 1)")]
    InvalidCoverageRatio(f64),

    #[error("Merge did not settle within {0} iterations")]
    IterationLimit(usize),

    #[error("GeoJSON error: {0}")]
    GeoJson(String),
}

fn join_handles(handles: &[Handle]) -> String {
    handles.iter().map(Handle::as_str).collect::<Vec<_>>().join(", ")
}

pub type Result<T> = std::result::Result<T, MergeError>;
