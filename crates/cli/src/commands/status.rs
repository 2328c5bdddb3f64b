//! `queuebuild status` — Show the effective configuration.

use queuebuild_config::ModeKind;
use queuebuild_core::context::{COLLECTION_URI_VAR, SOURCE_BRANCH_VAR, TEAM_PROJECT_VAR};
use queuebuild_core::{ConnectionMode, Result};
use queuebuild_launcher::UriResolver;
use std::path::Path;

pub async fn run(explicit: Option<&Path>) -> Result<()> {
    let config_path = super::config_path(explicit);
    let config = super::load_config(explicit)?;
    let launcher = config.launcher_config();

    println!("🏗️  queuebuild Status");
    println!("====================");
    println!("  Config file:  {}", config_path.display());
    println!("  Mode:         {:?}", config.mode);
    println!("  API version:  {}", config.api_version);
    println!("  Timeout:      {}s", config.timeout_secs);

    match config.mode {
        ModeKind::Explicit => {
            println!(
                "  Server:       {}://{}:{}",
                if config.server.https { "https" } else { "http" },
                config.server.host,
                config.server.port
            );
            println!("  Collection:   {}", config.target.collection);
            println!(
                "  Project:      {}",
                if config.target.team_project.is_empty() {
                    "(not set)"
                } else {
                    config.target.team_project.as_str()
                }
            );
        }
        ModeKind::Context => {
            if let ConnectionMode::Context(context) = &launcher.mode {
                for (var, value) in [
                    (COLLECTION_URI_VAR, &context.collection_uri),
                    (TEAM_PROJECT_VAR, &context.team_project),
                    (SOURCE_BRANCH_VAR, &context.source_branch),
                ] {
                    println!("  {var:<36} {}", value.as_deref().unwrap_or("(not set)"));
                }
                if context.is_empty() {
                    println!("  ⚠️  No build agent variables found; run inside a build step");
                }
            }
        }
    }

    println!(
        "  Credentials:  {}",
        match &launcher.credentials {
            Some(c) => format!("basic ({})", c.username),
            None => "none".into(),
        }
    );
    println!(
        "  Watch:        first poll after {}s, then every {}s{}",
        config.watch.initial_delay_secs,
        config.watch.poll_interval_secs,
        match config.watch.max_polls {
            0 => String::new(),
            n => format!(", at most {n} polls"),
        }
    );

    let resolver = UriResolver::new(launcher.mode, launcher.api_version);
    match resolver.queue_request_uri() {
        Ok(uri) => println!("\n  ✅ Queue URI: {uri}"),
        Err(e) => println!("\n  ⚠️  Queue URI unresolved: {e}"),
    }

    if !config_path.exists() {
        println!("  ⚠️  No config file — run `queuebuild onboard` first");
    }

    Ok(())
}
