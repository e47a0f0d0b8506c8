//! `diff` command: show what a graduation would change

use anyhow::Result;

use crate::api::PlatformClient;
use crate::cli::DiffArgs;
use crate::graduate::{self, AllowedMethods, GraduateOptions};
use crate::reporter::LogReporter;
use crate::settings::Settings;

pub async fn handle(args: DiffArgs, settings: &Settings) -> Result<()> {
    let kind = args.kind;
    let options = GraduateOptions {
        key_whitelist: args.only_keys.clone(),
        key_blacklist: args.ignore_keys.clone(),
        // show the full diff: every verb is considered allowed here
        methods: AllowedMethods::all(),
        ..Default::default()
    };

    let client = PlatformClient::new(super::resolve_platform_url(&args, settings));
    let (mut origin, mut destination) = super::build_organizations(&args, settings);
    let reporter = LogReporter;

    super::load_pair(&client, &mut origin, &mut destination, kind, &reporter).await?;

    let result = graduate::compute(&origin, &destination, kind, &options);
    println!("{}", result.summary.render());
    if !result.summary.has_changes() {
        println!("Organizations are aligned, nothing to graduate.");
    }
    Ok(())
}
