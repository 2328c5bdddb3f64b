//! `queuebuild watch` — Wait for a queued build to complete.

use queuebuild_core::{Error, Result};
use queuebuild_launcher::{BuildLauncher, BuildWatcher};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub async fn run(explicit: Option<&Path>, build_id: u64) -> Result<()> {
    let config = super::load_config(explicit)?;
    let launcher = Arc::new(BuildLauncher::new(config.launcher_config())?);
    let watcher = BuildWatcher::new(launcher, super::poll_schedule(&config));

    wait(watcher, build_id, &super::cancel_on_ctrl_c()).await
}

/// Poll until done and report the outcome.
pub async fn wait(watcher: BuildWatcher, build_id: u64, cancel: &CancellationToken) -> Result<()> {
    println!(
        "⏳ Waiting for build {build_id} (polling every {}s, Ctrl-C to stop)",
        watcher.schedule().interval.as_secs()
    );

    let record = watcher
        .watch_with(build_id, cancel, |record| {
            println!(
                "   status: {}",
                record
                    .status
                    .map(|s| format!("{s:?}"))
                    .unwrap_or_else(|| "unknown".into())
            );
        })
        .await
        .inspect_err(super::report_launch_error)?;

    let outcome = record.result.as_deref().unwrap_or("unknown");
    let icon = if outcome == "succeeded" { "✅" } else { "❌" };
    println!("{icon} Build {build_id} completed: {outcome}");
    super::print_build(&record);

    if outcome == "succeeded" {
        Ok(())
    } else {
        Err(Error::BuildFailed {
            build_id,
            result: outcome.to_string(),
        })
    }
}
