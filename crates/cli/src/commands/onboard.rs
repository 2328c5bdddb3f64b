//! `queuebuild onboard` — First-time setup.

use queuebuild_config::AppConfig;
use queuebuild_core::Result;
use std::path::Path;

pub async fn run(explicit: Option<&Path>) -> Result<()> {
    let config_path = super::config_path(explicit);

    println!("🏗️  queuebuild — First-Time Setup");
    println!("================================\n");

    if let Some(dir) = config_path.parent() {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            println!("✅ Created config directory: {}", dir.display());
        } else {
            println!("  Config directory exists: {}", dir.display());
        }
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Set [server] host/port and [target] team_project");
    println!("   2. Add [credentials] or export QUEUEBUILD_USERNAME / QUEUEBUILD_PASSWORD");
    println!("   3. Run: queuebuild uri");
    println!("   4. Run: queuebuild queue <definition-id>");
    println!("\n   Inside a build step, set mode = \"context\" to pick the server,");
    println!("   project and branch up from the build agent's environment.");

    Ok(())
}
