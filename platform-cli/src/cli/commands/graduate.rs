//! `graduate` command: align a destination organization with its origin

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Confirm;
use log::info;

use crate::api::PlatformClient;
use crate::cli::GraduateArgs;
use crate::graduate::{self, AllowedMethods, GraduateOptions, DEFAULT_BATCH_SIZE};
use crate::reporter::LogReporter;
use crate::settings::Settings;

pub async fn handle(args: GraduateArgs, settings: &Settings) -> Result<()> {
    let kind = args.diff.kind;
    let options = GraduateOptions {
        key_whitelist: args.diff.only_keys.clone(),
        key_blacklist: args.diff.ignore_keys.clone(),
        methods: AllowedMethods::from_methods(&args.methods),
        batch_size: args
            .batch_size
            .or(settings.graduate.batch_size)
            .unwrap_or(DEFAULT_BATCH_SIZE),
    };

    let client = PlatformClient::new(super::resolve_platform_url(&args.diff, settings));
    let (mut origin, mut destination) = super::build_organizations(&args.diff, settings);
    let reporter = LogReporter;

    super::load_pair(&client, &mut origin, &mut destination, kind, &reporter).await?;

    let result = graduate::compute(&origin, &destination, kind, &options);
    println!("{}", result.summary.render());

    if result.operations.is_empty() {
        if result.summary.skipped.is_empty() {
            println!("Organizations are aligned, nothing to graduate.");
        } else {
            println!(
                "Nothing to apply: {} change(s) held back by the allowed methods.",
                result.summary.skipped.len()
            );
        }
        return Ok(());
    }

    if args.dry_run {
        info!("dry run requested, not applying {} operation(s)", result.operations.len());
        return Ok(());
    }

    if !args.force {
        let prompt = format!(
            "Apply {} operation(s) to {}?",
            result.operations.len(),
            destination.id()
        );
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            println!("Graduation aborted.");
            return Ok(());
        }
    }

    let report = graduate::apply(&client, &destination, &result.operations, &options, &reporter)
        .await
        .context("graduation could not be applied")?;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => println!(
                "  {} {} batch {} ({} entities)",
                "ok".green(),
                outcome.verb,
                outcome.index,
                outcome.size
            ),
            Err(err) => println!("  {} {}", "failed".red(), err),
        }
    }
    for skipped in &report.skipped {
        println!(
            "  {} {} {} operation(s) skipped: method not allowed",
            "--".dimmed(),
            skipped.count,
            skipped.verb
        );
    }

    if report.all_succeeded() {
        println!("Graduation complete.");
        Ok(())
    } else {
        anyhow::bail!(
            "graduation incomplete; entities not graduated: {}",
            report.failed_names().join(", ")
        )
    }
}
