//! Endpoint construction for the platform's organization-scoped routes

use crate::org::EntityKind;

pub const DEFAULT_PLATFORM_URL: &str = "https://platform.searchcloud.dev";

/// Listing page for one entity kind of one organization.
pub fn page_url(base: &str, org_id: &str, kind: EntityKind, page: usize) -> String {
    format!(
        "{}/rest/organizations/{}/{}/pages?page={}",
        base.trim_end_matches('/'),
        urlencoding::encode(org_id),
        kind.route(),
        page
    )
}

/// Batch create/update endpoint for one entity kind.
pub fn batch_url(base: &str, org_id: &str, kind: EntityKind) -> String {
    format!(
        "{}/rest/organizations/{}/{}/batch",
        base.trim_end_matches('/'),
        urlencoding::encode(org_id),
        kind.route()
    )
}

/// Batch delete endpoint; entity names travel in the query string.
pub fn delete_url(base: &str, org_id: &str, kind: EntityKind, names: &[String]) -> String {
    let joined = names
        .iter()
        .map(|n| urlencoding::encode(n).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{}/rest/organizations/{}/{}/batch?names={}",
        base.trim_end_matches('/'),
        urlencoding::encode(org_id),
        kind.route(),
        joined
    )
}
