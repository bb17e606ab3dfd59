//! Binary search over an ordered build series using a regression probe.

use thiserror::Error;

use crate::fetch::{FetchError, SymbolSource};
use crate::model::DebugIdentity;
use crate::symbols;

/// Error type for a bisection run.
#[derive(Debug, Error)]
pub enum BisectError {
    /// The probe failed on a build. The search aborts rather than treating
    /// the failure as either outcome, which would corrupt the boundary.
    #[error("Probe failed on build {build_id}: {source}")]
    Probe {
        build_id: String,
        #[source]
        source: FetchError,
    },
}

/// Answers whether a given build already exhibits the regression marker.
///
/// Monotonicity is a precondition of [`bisect`]: once the marker appears in
/// build order it must remain present in every later build. The search does
/// not verify this; [`spot_check`] offers an advisory diagnostic.
pub trait BuildProbe {
    fn is_present(&self, entry: &DebugIdentity) -> Result<bool, FetchError>;
}

/// Probe that fetches a build's symbol listing and scans it for a marker
/// substring. Every evaluation is a fresh fetch; there is no caching at
/// this layer.
pub struct MarkerProbe<'a> {
    source: &'a dyn SymbolSource,
    marker: String,
}

impl<'a> MarkerProbe<'a> {
    pub fn new(source: &'a dyn SymbolSource, marker: impl Into<String>) -> Self {
        Self { source, marker: marker.into() }
    }
}

impl BuildProbe for MarkerProbe<'_> {
    fn is_present(&self, entry: &DebugIdentity) -> Result<bool, FetchError> {
        let lines = self.source.fetch(&entry.debug_id)?;
        Ok(symbols::contains_marker(&lines, &self.marker))
    }
}

/// Result of a bisection: boundary indices into the searched slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BisectOutcome {
    /// Index of the first build confirmed to exhibit the marker, or `None`
    /// when no searched build exhibited it.
    pub first_bad: Option<usize>,
    /// Index of the last build confirmed to lack the marker, or `None` when
    /// every searched build exhibited it.
    pub last_good: Option<usize>,
}

impl BisectOutcome {
    /// The (bad, good) boundary pair, when the search found both sides.
    pub fn boundary<'a>(
        &self,
        entries: &'a [DebugIdentity],
    ) -> Option<(&'a DebugIdentity, &'a DebugIdentity)> {
        match (self.first_bad, self.last_good) {
            (Some(bad), Some(good)) => Some((&entries[bad], &entries[good])),
            _ => None,
        }
    }
}

/// Binary-search `entries` (ascending build order) for the point where the
/// probe flips from absent to present.
///
/// Precondition: the probe is monotonic over `entries` (false up to some
/// index, true from there on). When it holds, the returned indices satisfy
/// `first_bad == last_good + 1` and the search evaluates O(log n) builds.
/// A probe failure aborts the search.
pub fn bisect(
    entries: &[DebugIdentity],
    probe: &dyn BuildProbe,
) -> Result<BisectOutcome, BisectError> {
    let mut first: i64 = 0;
    let mut last: i64 = entries.len() as i64 - 1;

    while first <= last {
        let mid = ((first + last) / 2) as usize;
        let entry = &entries[mid];
        let present = probe.is_present(entry).map_err(|source| BisectError::Probe {
            build_id: entry.build_id.clone(),
            source,
        })?;
        if present {
            // Already regressed; look for an earlier bad build.
            last = mid as i64 - 1;
        } else {
            first = mid as i64 + 1;
        }
    }

    let first_bad = if (first as usize) < entries.len() { Some(first as usize) } else { None };
    let last_good = if last >= 0 { Some(last as usize) } else { None };
    Ok(BisectOutcome { first_bad, last_good })
}

/// A disagreement found by [`spot_check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryMismatch {
    pub index: usize,
    pub build_id: String,
    /// What a monotonic flip at the boundary would predict for this build.
    pub expected_present: bool,
}

/// Advisory monotonicity diagnostic: re-evaluate the builds at and next to
/// the boundary and report any that disagree with a monotonic flip.
///
/// An empty result does not prove monotonicity over the whole series; it
/// only rules out a violation at the sampled positions.
pub fn spot_check(
    entries: &[DebugIdentity],
    probe: &dyn BuildProbe,
    outcome: BisectOutcome,
) -> Result<Vec<BoundaryMismatch>, BisectError> {
    let mut samples = Vec::new();
    if let Some(good) = outcome.last_good {
        if good > 0 {
            samples.push((good - 1, false));
        }
        samples.push((good, false));
    }
    if let Some(bad) = outcome.first_bad {
        samples.push((bad, true));
        if bad + 1 < entries.len() {
            samples.push((bad + 1, true));
        }
    }

    let mut mismatches = Vec::new();
    for (index, expected_present) in samples {
        let entry = &entries[index];
        let present = probe.is_present(entry).map_err(|source| BisectError::Probe {
            build_id: entry.build_id.clone(),
            source,
        })?;
        if present != expected_present {
            mismatches.push(BoundaryMismatch {
                index,
                build_id: entry.build_id.clone(),
                expected_present,
            });
        }
    }
    Ok(mismatches)
}
