use anyhow::Result;

use sleuth_core::project::{load_config, WorkspaceLayout};
use sleuth_core::store::{keys, JsonFileStore};

use crate::canonicalize_or_current;
use crate::commands::util::{print_artifact_status, print_dir_status};

/// Show configuration and artifact status of an existing workspace.
pub fn info_command(root: &str) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = WorkspaceLayout::new(&root_path);
    let config = load_config(&layout)?;

    println!("Investigation Workspace");
    println!("=======================");
    println!("Root: {}", layout.root.display());
    println!("Config file: {}", layout.config_path.display());
    println!("Config version: {}", config.config_version);
    println!("Product: {} ({})", config.product, config.release_channel);
    println!("Builds: >={} on {}", config.min_build_id, config.platform);
    println!("Module: {}", config.module);
    println!("Marker: {}", config.marker);
    println!("Crash-report API: {}", config.crash_stats_url);
    println!("Symbol store: {}", config.symbols_url);
    println!();

    println!("Directories:");
    print_dir_status("Meta dir (.sleuth)", &layout.meta_dir);
    print_dir_status("Artifacts dir", &layout.artifacts_dir);
    println!();

    let store = JsonFileStore::new(layout.artifacts_dir.clone());
    println!("Artifacts:");
    for key in [
        keys::DEBUG_IDS,
        keys::BOUNDARY,
        keys::BAD_SYMBOLS,
        keys::GOOD_SYMBOLS,
        keys::CANDIDATES,
    ] {
        print_artifact_status(&store, key);
    }

    Ok(())
}
