use anyhow::{anyhow, Context, Result};

use sleuth_core::bisect::{bisect, spot_check, MarkerProbe};
use sleuth_core::fetch::{HttpSymbolSource, SymbolSource};
use sleuth_core::model::{identities, BisectionRecord, BuildDebugMap};
use sleuth_core::project::InvestigationContext;
use sleuth_core::store::{get_json, keys, put_json};

use crate::canonicalize_or_current;

/// Bisect the resolved build series and persist the boundary listings.
///
/// Requires the build map persisted by `resolve`. Any fetch failure during
/// the search aborts the command; a failed probe is never treated as either
/// outcome.
pub fn bisect_command(root: &str, check: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = InvestigationContext::from_root(&root_path)?;

    let map: BuildDebugMap = get_json(&ctx.store, keys::DEBUG_IDS)
        .context("Failed to load build map")?
        .ok_or_else(|| anyhow!("No build map found; run `resolve` first"))?;
    let entries = identities(&map);
    if entries.is_empty() {
        return Err(anyhow!("Build map is empty; nothing to bisect"));
    }
    println!("Bisecting {} builds for marker: {}", entries.len(), ctx.config.marker);

    let source = HttpSymbolSource::new(&ctx.config.symbols_url, &ctx.config.module)
        .context("Failed to build symbol-store client")?;
    let probe = MarkerProbe::new(&source, ctx.config.marker.clone());

    let outcome = bisect(&entries, &probe).context("Bisection aborted")?;
    let (bad, good) = outcome.boundary(&entries).ok_or_else(|| {
        anyhow!(
            "No boundary: the marker is {} across the whole series",
            if outcome.first_bad.is_some() { "present" } else { "absent" }
        )
    })?;

    println!("Good {} ({})", good.build_id, good.debug_id);
    println!("Bad  {} ({})", bad.build_id, bad.debug_id);

    if check {
        let mismatches =
            spot_check(&entries, &probe, outcome).context("Boundary spot check aborted")?;
        if mismatches.is_empty() {
            println!("Spot check: boundary-adjacent builds agree with a monotonic flip");
        } else {
            for mismatch in &mismatches {
                println!(
                    "Spot check mismatch: build {} expected marker {}",
                    mismatch.build_id,
                    if mismatch.expected_present { "present" } else { "absent" }
                );
            }
        }
    }

    // Persist both boundary listings for the diff phase.
    let bad_lines = source
        .fetch(&bad.debug_id)
        .with_context(|| format!("Failed to fetch listing for bad build {}", bad.build_id))?;
    let good_lines = source
        .fetch(&good.debug_id)
        .with_context(|| format!("Failed to fetch listing for good build {}", good.build_id))?;
    put_json(&ctx.store, keys::BAD_SYMBOLS, &bad_lines)
        .context("Failed to persist bad listing")?;
    put_json(&ctx.store, keys::GOOD_SYMBOLS, &good_lines)
        .context("Failed to persist good listing")?;

    let record = BisectionRecord::new(bad.clone(), good.clone(), ctx.config.marker.clone());
    put_json(&ctx.store, keys::BOUNDARY, &record).context("Failed to persist boundary record")?;

    println!(
        "Saved boundary listings ({} bad lines, {} good lines)",
        bad_lines.len(),
        good_lines.len()
    );

    Ok(())
}
