use std::fs;

use anyhow::{Context, Result};

use sleuth_core::project::{save_config, InvestigationConfig, WorkspaceLayout};

use crate::canonicalize_or_current;

/// Optional overrides for the generated investigation config.
#[derive(Debug, Default)]
pub struct InitOverrides {
    pub product: Option<String>,
    pub channel: Option<String>,
    pub min_build_id: Option<String>,
    pub platform: Option<String>,
    pub module: Option<String>,
    pub marker: Option<String>,
    pub crash_stats_url: Option<String>,
    pub symbols_url: Option<String>,
}

impl InitOverrides {
    fn apply(self, config: &mut InvestigationConfig) {
        if let Some(product) = self.product {
            config.product = product;
        }
        if let Some(channel) = self.channel {
            config.release_channel = channel;
        }
        if let Some(min_build_id) = self.min_build_id {
            config.min_build_id = min_build_id;
        }
        if let Some(platform) = self.platform {
            config.platform = platform;
        }
        if let Some(module) = self.module {
            config.module = module;
        }
        if let Some(marker) = self.marker {
            config.marker = marker;
        }
        if let Some(crash_stats_url) = self.crash_stats_url {
            config.crash_stats_url = crash_stats_url;
        }
        if let Some(symbols_url) = self.symbols_url {
            config.symbols_url = symbols_url;
        }
    }
}

/// Initialize a new investigation workspace at `root`.
pub fn init_command(root: &str, overrides: InitOverrides) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = WorkspaceLayout::new(&root_path);

    let mut config = InvestigationConfig::default();
    overrides.apply(&mut config);

    save_config(&layout, &config)?;
    fs::create_dir_all(&layout.artifacts_dir).with_context(|| {
        format!("Failed to create artifacts dir: {}", layout.artifacts_dir.display())
    })?;

    println!("Initialized investigation workspace:");
    println!("  Root: {}", layout.root.display());
    println!("  Config: {}", layout.config_path.display());
    println!("  Product: {} ({})", config.product, config.release_channel);
    println!("  Builds: >={} on {}", config.min_build_id, config.platform);
    println!("  Module: {}", config.module);
    println!("  Marker: {}", config.marker);

    Ok(())
}
