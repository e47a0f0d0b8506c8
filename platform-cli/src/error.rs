//! Error types for graduation runs

use crate::api::operations::Method;
use crate::org::EntityKind;

/// Errors raised while loading, diffing or applying configuration.
///
/// `Batch` values are collected into per-batch outcomes by the applier
/// rather than propagated across a verb group, so a failing batch never
/// hides its siblings.
#[derive(Debug, Clone, PartialEq)]
pub enum GraduateError {
    /// A page retrieval failed. Fatal to the whole load: graduating against
    /// a partially loaded organization would produce false deletions.
    Fetch {
        org_id: String,
        kind: EntityKind,
        page: usize,
        message: String,
    },
    /// Empty or invalid input where a non-empty collection is required.
    Validation { reason: String },
    /// One batch's remote call failed.
    Batch {
        verb: Method,
        kind: EntityKind,
        batch_index: usize,
        message: String,
    },
    /// A blacklist pattern failed to compile. The entry is skipped, the
    /// diff keeps going.
    Filter { pattern: String, message: String },
}

impl std::fmt::Display for GraduateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraduateError::Fetch {
                org_id,
                kind,
                page,
                message,
            } => write!(
                f,
                "failed to fetch {} page {} from organization {}: {}",
                kind.label(),
                page,
                org_id,
                message
            ),
            GraduateError::Validation { reason } => write!(f, "validation failed: {}", reason),
            GraduateError::Batch {
                verb,
                kind,
                batch_index,
                message,
            } => write!(
                f,
                "{} batch {} of {} failed: {}",
                verb,
                batch_index,
                kind.label(),
                message
            ),
            GraduateError::Filter { pattern, message } => {
                write!(f, "ignoring malformed blacklist pattern '{}': {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for GraduateError {}
