//! Batch application of a diff's operation list
//!
//! Operations are grouped by verb, chunked into size-bounded batches, and
//! all batches of one verb group are dispatched concurrently. Outcomes are
//! captured per batch: a failing batch is collected next to its successful
//! siblings, never propagated eagerly, so partial application stays visible
//! and reportable.

use futures::future::join_all;
use serde_json::Value;

use crate::api::{EntityApi, Method, Operation};
use crate::error::GraduateError;
use crate::org::{EntityKind, Organization};
use crate::reporter::Reporter;

use super::options::GraduateOptions;

/// Result of one remote batch call.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub verb: Method,
    pub kind: EntityKind,
    /// Index of the batch within its verb group.
    pub index: usize,
    pub size: usize,
    /// Names of the entities the batch carried, for reporting exactly what
    /// was (or was not) graduated.
    pub names: Vec<String>,
    pub result: Result<(), GraduateError>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// A verb group that was never dispatched because its verb is not in the
/// allowed-methods set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedGroup {
    pub verb: Method,
    pub kind: EntityKind,
    pub count: usize,
}

/// Per-batch results of one apply call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    pub outcomes: Vec<BatchOutcome>,
    pub skipped: Vec<SkippedGroup>,
}

impl ApplyReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(BatchOutcome::is_success)
    }

    pub fn failed(&self) -> Vec<&BatchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success()).collect()
    }

    /// Entities that were not graduated because their batch failed.
    pub fn failed_names(&self) -> Vec<&str> {
        self.failed()
            .iter()
            .flat_map(|o| o.names.iter().map(String::as_str))
            .collect()
    }
}

/// Apply `operations` to `org` in batches of at most `options.batch_size`.
///
/// Verb groups run in the fixed CREATE, UPDATE, DELETE order; the batches
/// inside one group run concurrently.
pub async fn apply(
    api: &dyn EntityApi,
    org: &Organization,
    operations: &[Operation],
    options: &GraduateOptions,
    reporter: &dyn Reporter,
) -> Result<ApplyReport, GraduateError> {
    if options.batch_size == 0 {
        return Err(GraduateError::Validation {
            reason: "batch size must be positive".to_string(),
        });
    }
    if operations.is_empty() {
        return Err(GraduateError::Validation {
            reason: "no operations to apply".to_string(),
        });
    }

    let mut report = ApplyReport::default();

    for verb in Method::ALL {
        let group: Vec<&Operation> = operations.iter().filter(|op| op.method() == verb).collect();
        if group.is_empty() {
            continue;
        }
        if !options.methods.allows(verb) {
            for kind in EntityKind::ALL {
                let count = group.iter().filter(|op| op.kind() == kind).count();
                if count > 0 {
                    reporter.group_skipped(verb, kind, count);
                    report.skipped.push(SkippedGroup { verb, kind, count });
                }
            }
            continue;
        }
        let outcomes =
            dispatch_verb_group(api, org, verb, &group, options.batch_size, reporter).await?;
        report.outcomes.extend(outcomes);
    }

    Ok(report)
}

/// Dispatch every batch of one verb group concurrently, capturing one
/// outcome per batch.
async fn dispatch_verb_group(
    api: &dyn EntityApi,
    org: &Organization,
    verb: Method,
    group: &[&Operation],
    batch_size: usize,
    reporter: &dyn Reporter,
) -> Result<Vec<BatchOutcome>, GraduateError> {
    if group.is_empty() {
        return Err(GraduateError::Validation {
            reason: format!("empty {} group handed to dispatch", verb),
        });
    }

    let mut batches: Vec<(EntityKind, Vec<&Operation>)> = Vec::new();
    for kind in EntityKind::ALL {
        let of_kind: Vec<&Operation> = group
            .iter()
            .filter(|op| op.kind() == kind)
            .copied()
            .collect();
        for chunk in of_kind.chunks(batch_size) {
            batches.push((kind, chunk.to_vec()));
        }
    }

    let requests: Vec<_> = batches
        .into_iter()
        .enumerate()
        .map(|(index, (kind, chunk))| {
            let names: Vec<String> = chunk.iter().map(|op| op.name().to_string()).collect();
            let payloads: Vec<Value> = chunk
                .iter()
                .filter_map(|op| op.payload().cloned())
                .collect();
            async move {
                let call = match verb {
                    Method::Post => api.create_batch(org, kind, &payloads).await,
                    Method::Put => api.update_batch(org, kind, &payloads).await,
                    Method::Delete => api.delete_batch(org, kind, &names).await,
                };
                let outcome = BatchOutcome {
                    verb,
                    kind,
                    index,
                    size: names.len(),
                    names,
                    result: call.map_err(|err| GraduateError::Batch {
                        verb,
                        kind,
                        batch_index: index,
                        message: format!("{:#}", err),
                    }),
                };
                reporter.batch_done(&outcome);
                outcome
            }
        })
        .collect();

    Ok(join_all(requests).await)
}
