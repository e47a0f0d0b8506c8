//! Progress reporting capability
//!
//! The fetcher and applier receive a [`Reporter`] explicitly instead of
//! writing to a process-global spinner, so callers decide how progress is
//! surfaced and tests can stay silent.

use log::{debug, info};

use crate::api::Method;
use crate::graduate::apply::BatchOutcome;
use crate::org::EntityKind;

pub trait Reporter: Send + Sync {
    fn page_loading(&self, _org_id: &str, _kind: EntityKind, _page: usize) {}

    fn load_done(&self, _org_id: &str, _kind: EntityKind, _items: usize, _pages: usize) {}

    fn batch_done(&self, _outcome: &BatchOutcome) {}

    fn group_skipped(&self, _verb: Method, _kind: EntityKind, _count: usize) {}
}

/// Default reporter backed by the `log` macros.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn page_loading(&self, org_id: &str, kind: EntityKind, page: usize) {
        debug!("fetching {} page {} from {}", kind.label(), page, org_id);
    }

    fn load_done(&self, org_id: &str, kind: EntityKind, items: usize, pages: usize) {
        info!(
            "loaded {} {}(s) from {} across {} page(s)",
            items,
            kind.label(),
            org_id,
            pages
        );
    }

    fn batch_done(&self, outcome: &BatchOutcome) {
        match &outcome.result {
            Ok(()) => info!(
                "{} batch {} ({} items) applied",
                outcome.verb, outcome.index, outcome.size
            ),
            Err(err) => info!("{}", err),
        }
    }

    fn group_skipped(&self, verb: Method, kind: EntityKind, count: usize) {
        info!(
            "{} not in the allowed methods, skipping {} {} operation(s)",
            verb,
            count,
            kind.label()
        );
    }
}

/// Reporter that swallows everything. Used by tests.
pub struct NullReporter;

impl Reporter for NullReporter {}
