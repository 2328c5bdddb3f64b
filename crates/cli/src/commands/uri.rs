//! `queuebuild uri` — Print the resolved queue URI.

use queuebuild_core::Result;
use queuebuild_launcher::UriResolver;
use std::path::Path;

pub async fn run(
    explicit: Option<&Path>,
    collection: Option<String>,
    project: Option<String>,
) -> Result<()> {
    let config = super::load_config(explicit)?;
    let launcher = config.launcher_config();
    let resolver = UriResolver::new(launcher.mode, launcher.api_version);

    let resolved = if collection.is_some() || project.is_some() {
        let collection = collection.unwrap_or_else(|| config.target.collection.clone());
        let project = project.unwrap_or_else(|| config.target.team_project.clone());
        resolver.resolve(&collection, &project)
    } else {
        resolver.queue_request_uri()
    };

    match resolved {
        Ok(uri) => {
            println!("{uri}");
            Ok(())
        }
        Err(e) => {
            super::report_launch_error(&e);
            tracing::debug!(partial = %resolver.base_uri(), "Unresolved template");
            Err(e.into())
        }
    }
}
