//! Paginated entity loading
//!
//! Loads every page of one entity kind into an organization store. The
//! merge is all-or-nothing: a single failing page fails the whole load and
//! leaves the collection empty, because a partially loaded entity set would
//! make the diff engine emit false deletions.

use futures::future::join_all;
use log::{debug, warn};
use serde_json::Value;

use crate::api::EntityApi;
use crate::error::GraduateError;
use crate::org::{Entity, EntityKind, Organization};
use crate::reporter::Reporter;

/// Aggregate counts of one successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Entities merged into the organization store.
    pub item_count: usize,
    /// Pages observed for the listing.
    pub page_count: usize,
}

/// Fetch all pages of `kind` for `org` and merge them into its collection.
///
/// Page 0 is fetched first to learn the page count; the remaining pages are
/// fetched concurrently with per-page outcome capture, so a failing page is
/// reported with its index instead of whichever error happened to win the
/// race.
pub async fn load_all(
    api: &dyn EntityApi,
    org: &mut Organization,
    kind: EntityKind,
    reporter: &dyn Reporter,
) -> Result<LoadReport, GraduateError> {
    org.clear_collection(kind);

    let org_ref: &Organization = org;
    reporter.page_loading(org_ref.id(), kind, 0);
    let first = api
        .get_page(org_ref, kind, 0)
        .await
        .map_err(|err| fetch_error(org_ref, kind, 0, err))?;

    let page_count = first.total_pages.max(1);
    let mut pages: Vec<Vec<Value>> = Vec::with_capacity(page_count);
    pages.push(first.items);

    if page_count > 1 {
        let requests: Vec<_> = (1..page_count)
            .map(|page| async move {
                reporter.page_loading(org_ref.id(), kind, page);
                (page, api.get_page(org_ref, kind, page).await)
            })
            .collect();

        // join-all with per-page outcomes: every page finishes before the
        // first failure is surfaced
        let mut failed: Option<GraduateError> = None;
        for (page, outcome) in join_all(requests).await {
            match outcome {
                Ok(response) => pages.push(response.items),
                Err(err) => {
                    if failed.is_none() {
                        failed = Some(fetch_error(org_ref, kind, page, err));
                    }
                }
            }
        }
        if let Some(err) = failed {
            return Err(err);
        }
    }

    let mut item_count = 0;
    for items in pages {
        for raw in items {
            let Some(name) = raw.get("name").and_then(Value::as_str).map(str::to_string) else {
                warn!(
                    "skipping {} document without a name in organization {}",
                    kind.label(),
                    org.id()
                );
                continue;
            };
            if org.blacklist().is_blacklisted(kind, &name) {
                debug!("skipping blacklisted {} '{}'", kind.label(), name);
                continue;
            }
            org.add_entity(kind, Entity::new(name, raw));
            item_count += 1;
        }
    }

    reporter.load_done(org.id(), kind, item_count, page_count);
    Ok(LoadReport {
        item_count,
        page_count,
    })
}

fn fetch_error(
    org: &Organization,
    kind: EntityKind,
    page: usize,
    err: anyhow::Error,
) -> GraduateError {
    GraduateError::Fetch {
        org_id: org.id().to_string(),
        kind,
        page,
        message: format!("{:#}", err),
    }
}
