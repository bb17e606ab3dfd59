use anyhow::{anyhow, Context, Result};

use sleuth_core::project::InvestigationContext;
use sleuth_core::store::{get_json, keys, put_json};
use sleuth_core::symbols::visibility_diff;

use crate::canonicalize_or_current;

/// Diff the persisted boundary listings into candidate function names.
///
/// Requires the listings persisted by `bisect`. The candidate set is
/// persisted alongside the other artifacts and printed.
pub fn diff_command(root: &str, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = InvestigationContext::from_root(&root_path)?;

    let bad: Vec<String> = get_json(&ctx.store, keys::BAD_SYMBOLS)
        .context("Failed to load bad listing")?
        .ok_or_else(|| anyhow!("No bad listing found; run `bisect` first"))?;
    let good: Vec<String> = get_json(&ctx.store, keys::GOOD_SYMBOLS)
        .context("Failed to load good listing")?
        .ok_or_else(|| anyhow!("No good listing found; run `bisect` first"))?;

    let names: Vec<String> = visibility_diff(&bad, &good).into_iter().collect();
    put_json(&ctx.store, keys::CANDIDATES, &names).context("Failed to persist candidate set")?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&names).context("Failed to serialize candidates")?;
        println!("{serialized}");
    } else {
        println!("Candidates ({}):", names.len());
        if names.is_empty() {
            println!("  (none)");
        } else {
            for name in &names {
                println!("  - {name}");
            }
        }
    }

    Ok(())
}
