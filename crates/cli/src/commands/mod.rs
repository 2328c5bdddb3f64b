pub mod onboard;
pub mod queue;
pub mod status;
pub mod uri;
pub mod watch;

use queuebuild_config::AppConfig;
use queuebuild_core::{LaunchError, QueueResponse, Result, describe_status};
use queuebuild_launcher::PollSchedule;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Config file path: the `--config` flag or the default location.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"))
}

/// Load the config file with environment overrides applied.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = config_path(explicit);
    let config = AppConfig::load_with_env(&path)?;
    Ok(config)
}

pub fn poll_schedule(config: &AppConfig) -> PollSchedule {
    PollSchedule {
        initial_delay: Duration::from_secs(config.watch.initial_delay_secs),
        interval: Duration::from_secs(config.watch.poll_interval_secs),
        max_polls: config.watch.max_polls,
    }
}

/// A token that fires on Ctrl-C.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling");
            token.cancel();
        }
    });
    cancel
}

/// Print a failed call with whatever hint we have for it.
pub fn report_launch_error(err: &LaunchError) {
    eprintln!("❌ {err}");
    if let Some(code) = err.status_code() {
        if let Some(text) = describe_status(code) {
            eprintln!("   {code}: {text}");
        }
    }
    if err.is_unauthorized() {
        eprintln!(
            "   If you get unauthorized 401, make sure your server (IIS) has basic authentication on"
        );
    }
    if let LaunchError::MissingParameter(_) = err {
        eprintln!("   Set [target] in the config file or pass --collection/--project");
    }
}

pub fn print_build(record: &QueueResponse) {
    let field = |v: Option<&str>| v.unwrap_or("-").to_string();

    println!(
        "  Build:      {}",
        record.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into())
    );
    println!("  Number:     {}", field(record.build_number.as_deref()));
    println!(
        "  Definition: {}",
        field(record.definition.as_ref().and_then(|d| d.name.as_deref()))
    );
    println!(
        "  Status:     {}",
        record
            .status
            .map(|s| format!("{s:?}"))
            .unwrap_or_else(|| "-".into())
    );
    if let Some(result) = &record.result {
        println!("  Result:     {result}");
    }
    println!("  Branch:     {}", field(record.source_branch.as_deref()));
    println!(
        "  Queued:     {}",
        record
            .queue_time()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| field(record.queue_time.as_deref()))
    );
    if let Some(finished) = record.finish_time() {
        println!("  Finished:   {}", finished.to_rfc3339());
    }
    println!("  Requester:  {}", field(record.requester()));
    if let Some(url) = record.web_url() {
        println!("  Web:        {url}");
    }
}
