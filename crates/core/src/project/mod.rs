//! Investigation workspace: config file, on-disk layout, and context.
//!
//! A workspace is a directory holding one investigation: a JSON config
//! describing what to search for, and an artifacts directory where the
//! phase outputs (build map, boundary listings, candidates) are persisted
//! between invocations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::crashes::{SearchFilters, DEFAULT_DETAIL_BATCH};
use crate::store::JsonFileStore;

/// Default crash-report API base URL.
pub const DEFAULT_CRASH_STATS_URL: &str = "https://crash-stats.mozilla.org/api";

/// Default symbol-store base URL.
pub const DEFAULT_SYMBOLS_URL: &str =
    "https://s3-us-west-2.amazonaws.com/org.mozilla.crash-stats.symbols-public/v1";

/// Serializable configuration describing one investigation.
///
/// This lives at `.sleuth/investigation.json` under the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationConfig {
    pub product: String,
    pub release_channel: String,
    /// Inclusive lower bound on build ids considered.
    pub min_build_id: String,
    pub platform: String,
    /// Debug file name of the module under investigation.
    pub module: String,
    /// Marker substring unique to the regressed code path.
    pub marker: String,
    /// Crash-report API base URL.
    pub crash_stats_url: String,
    /// Symbol-store base URL.
    pub symbols_url: String,
    /// Report ids per detail request when sampling a build's reports.
    pub detail_batch_size: usize,
    /// Config format version.
    pub config_version: String,
}

impl Default for InvestigationConfig {
    fn default() -> Self {
        Self {
            product: "Firefox".to_string(),
            release_channel: "nightly".to_string(),
            min_build_id: "20180201000000".to_string(),
            platform: "Windows NT".to_string(),
            module: "xul.pdb".to_string(),
            marker: "static bool mozilla::SpinEventLoopUntil".to_string(),
            crash_stats_url: DEFAULT_CRASH_STATS_URL.to_string(),
            symbols_url: DEFAULT_SYMBOLS_URL.to_string(),
            detail_batch_size: DEFAULT_DETAIL_BATCH,
            config_version: "0.1.0".to_string(),
        }
    }
}

impl InvestigationConfig {
    /// The grouping-search filters encoded by this config.
    pub fn search_filters(&self) -> SearchFilters {
        SearchFilters {
            product: self.product.clone(),
            release_channel: self.release_channel.clone(),
            min_build_id: self.min_build_id.clone(),
            platform: self.platform.clone(),
        }
    }
}

/// Logical layout of an investigation workspace on disk.
///
/// Derived from a chosen root path; performs no IO itself. The CLI is
/// responsible for actually creating directories and files.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    /// Root directory of the workspace.
    pub root: PathBuf,
    /// Directory for internal metadata (.sleuth).
    pub meta_dir: PathBuf,
    /// Path to the investigation config file (JSON).
    pub config_path: PathBuf,
    /// Directory holding persisted artifacts (one JSON file per key).
    pub artifacts_dir: PathBuf,
}

impl WorkspaceLayout {
    /// Compute the default layout for a workspace rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let meta_dir = root.join(".sleuth");
        let config_path = meta_dir.join("investigation.json");
        let artifacts_dir = meta_dir.join("artifacts");
        Self { root, meta_dir, config_path, artifacts_dir }
    }
}

/// Load the investigation config for a layout.
pub fn load_config(layout: &WorkspaceLayout) -> Result<InvestigationConfig> {
    let json = fs::read_to_string(&layout.config_path).with_context(|| {
        format!("Failed to read investigation config at {}", layout.config_path.display())
    })?;
    serde_json::from_str(&json).context("Failed to parse investigation config JSON")
}

/// Write the investigation config for a layout, creating the meta dir.
pub fn save_config(layout: &WorkspaceLayout, config: &InvestigationConfig) -> Result<()> {
    fs::create_dir_all(&layout.meta_dir)
        .with_context(|| format!("Failed to create meta dir: {}", layout.meta_dir.display()))?;
    let json = serde_json::to_string_pretty(config)?;
    fs::write(&layout.config_path, json).with_context(|| {
        format!("Failed to write investigation config: {}", layout.config_path.display())
    })?;
    Ok(())
}

/// Convenience wrapper bundling layout, config, and the artifact store.
#[derive(Debug)]
pub struct InvestigationContext {
    pub layout: WorkspaceLayout,
    pub config: InvestigationConfig,
    pub store: JsonFileStore,
}

impl InvestigationContext {
    /// Load the config and set up the artifact store for a given root.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self> {
        let layout = WorkspaceLayout::new(root);
        let config = load_config(&layout)?;
        let store = JsonFileStore::new(layout.artifacts_dir.clone());
        Ok(Self { layout, config, store })
    }
}
