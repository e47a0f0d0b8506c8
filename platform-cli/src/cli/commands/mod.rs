//! Command handlers

pub mod diff;
pub mod graduate;

use anyhow::{Context, Result};

use crate::api::{urls, EntityApi};
use crate::cli::DiffArgs;
use crate::org::{Blacklist, EntityKind, Organization};
use crate::reporter::Reporter;
use crate::settings::Settings;
use crate::graduate::fetch;

pub(crate) fn resolve_platform_url(args: &DiffArgs, settings: &Settings) -> String {
    args.platform_url
        .clone()
        .or_else(|| settings.graduate.platform_url.clone())
        .unwrap_or_else(|| urls::DEFAULT_PLATFORM_URL.to_string())
}

/// Build the origin and destination stores with a shared blacklist.
pub(crate) fn build_organizations(
    args: &DiffArgs,
    settings: &Settings,
) -> (Organization, Organization) {
    let mut entries = settings.blacklist_entries();
    entries
        .entry(args.kind)
        .or_default()
        .extend(args.ignore_entities.iter().cloned());
    let blacklist = Blacklist::with_defaults(entries);

    let origin = Organization::new(
        args.origin.as_str(),
        args.origin_api_key.as_str(),
        blacklist.clone(),
    );
    let destination_key = args
        .destination_api_key
        .as_deref()
        .unwrap_or(args.origin_api_key.as_str());
    let destination = Organization::new(args.destination.as_str(), destination_key, blacklist);
    (origin, destination)
}

/// Load one entity kind for both organizations concurrently. Either failing
/// load aborts the whole command: diffing against incomplete data would
/// produce false operations.
pub(crate) async fn load_pair(
    api: &dyn EntityApi,
    origin: &mut Organization,
    destination: &mut Organization,
    kind: EntityKind,
    reporter: &dyn Reporter,
) -> Result<()> {
    let (origin_load, destination_load) = tokio::join!(
        fetch::load_all(api, origin, kind, reporter),
        fetch::load_all(api, destination, kind, reporter),
    );
    origin_load.context("loading the origin organization failed")?;
    destination_load.context("loading the destination organization failed")?;
    Ok(())
}
