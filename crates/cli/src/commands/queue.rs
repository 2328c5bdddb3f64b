//! `queuebuild queue` — Queue a build definition.

use queuebuild_core::{BuildRequest, BuildServer, LaunchError, Result};
use queuebuild_launcher::{BuildLauncher, BuildWatcher};
use std::path::Path;
use std::sync::Arc;

pub async fn run(
    explicit: Option<&Path>,
    definition_id: String,
    branch: Option<String>,
    watch: bool,
) -> Result<()> {
    let config = super::load_config(explicit)?;
    let launcher = Arc::new(BuildLauncher::new(config.launcher_config())?);
    let cancel = super::cancel_on_ctrl_c();

    // An explicit --branch wins over the one from the build context.
    let request = match branch {
        Some(branch) => BuildRequest::new(&definition_id).with_source_branch(Some(branch)),
        None => launcher.request_for(&definition_id),
    };

    println!("🏗️  Queueing definition {definition_id} on {}", launcher.name());
    if let Some(branch) = &request.source_branch {
        println!("   Branch: {branch}");
    }

    if !watch {
        let response = launcher
            .submit_with_cancel(request, &cancel)
            .await
            .inspect_err(super::report_launch_error)?;
        match response {
            Some(record) => {
                println!("✅ Build queued");
                super::print_build(&record);
            }
            None => println!("✅ Build queued (server returned no details)"),
        }
        return Ok(());
    }

    // Watching needs the id of the build the server created.
    let queued = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LaunchError::Cancelled),
        queued = launcher.queue_expecting_id(request) => queued,
    };
    let (build_id, record) = queued.inspect_err(super::report_launch_error)?;

    println!("✅ Build queued");
    super::print_build(&record);

    super::watch::wait(
        BuildWatcher::new(launcher, super::poll_schedule(&config)),
        build_id,
        &cancel,
    )
    .await
}
