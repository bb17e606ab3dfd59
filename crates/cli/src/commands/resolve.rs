use anyhow::{Context, Result};

use sleuth_core::crashes::{CrashSearch, DebugIdResolver, SocorroClient};
use sleuth_core::model::BuildDebugMap;
use sleuth_core::project::InvestigationContext;
use sleuth_core::store::{keys, put_json};

use crate::canonicalize_or_current;

/// Resolve each build's debug identifier and persist the build map.
///
/// Builds where no sampled crash report carries the module are reported and
/// skipped; they do not enter the persisted map.
pub fn resolve_command(root: &str) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = InvestigationContext::from_root(&root_path)?;

    let client = SocorroClient::new(&ctx.config.crash_stats_url)
        .context("Failed to build crash-report client")?;
    let groups = client
        .reports_by_build(&ctx.config.search_filters())
        .context("Crash-report grouping query failed")?;
    println!("Found {} builds with crash reports", groups.len());

    let resolver = DebugIdResolver::new(&client, ctx.config.module.clone())
        .with_batch_size(ctx.config.detail_batch_size);

    let mut map = BuildDebugMap::new();
    let mut unresolved = Vec::new();
    for (build_id, report_ids) in &groups {
        println!("Get debug id for build {build_id}");
        let found = resolver
            .find_debug_id(report_ids)
            .with_context(|| format!("Crash-detail query failed for build {build_id}"))?;
        match found {
            Some(debug_id) => {
                map.insert(build_id.clone(), debug_id);
            }
            None => {
                println!("No debug id for build {build_id}");
                unresolved.push(build_id.clone());
            }
        }
    }

    put_json(&ctx.store, keys::DEBUG_IDS, &map).context("Failed to persist build map")?;

    println!("Resolved {} of {} builds", map.len(), groups.len());
    if !unresolved.is_empty() {
        println!("Unresolved builds: {}", unresolved.join(", "));
    }

    Ok(())
}
