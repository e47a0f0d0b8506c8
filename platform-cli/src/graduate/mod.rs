//! Graduation engine: paginated loading, diffing, batched application

pub mod apply;
pub mod diff;
pub mod fetch;
pub mod options;

pub use apply::{apply, ApplyReport, BatchOutcome};
pub use diff::{compute, DiffResult, DiffSummary};
pub use fetch::{load_all, LoadReport};
pub use options::{AllowedMethods, GraduateOptions, DEFAULT_BATCH_SIZE};
