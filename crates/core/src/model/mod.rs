//! Core data model for builds, debug identities, and bisection results.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Map from build identifier to the debug identifier of the module of
/// interest for that build.
///
/// Build identifiers are timestamp-like strings (e.g. `20180201100326`), so
/// the map's lexicographic key order is also chronological order. The
/// bisector relies on consuming this map in ascending order.
pub type BuildDebugMap = BTreeMap<String, String>;

/// A build paired with the debug identifier of the module of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugIdentity {
    pub build_id: String,
    pub debug_id: String,
}

impl DebugIdentity {
    pub fn new(build_id: impl Into<String>, debug_id: impl Into<String>) -> Self {
        Self { build_id: build_id.into(), debug_id: debug_id.into() }
    }
}

/// Flatten a build map into an ascending list of identities.
pub fn identities(map: &BuildDebugMap) -> Vec<DebugIdentity> {
    map.iter()
        .map(|(build_id, debug_id)| DebugIdentity::new(build_id.clone(), debug_id.clone()))
        .collect()
}

/// The boundary pair produced by a bisection run: `bad` is the first build
/// confirmed to exhibit the regression marker, `good` the last confirmed
/// not to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BisectionRecord {
    pub bad: DebugIdentity,
    pub good: DebugIdentity,
    /// Marker substring the bisection searched for.
    pub marker: String,
    /// When the boundary was found (RFC 3339).
    pub found_at: String,
}

impl BisectionRecord {
    pub fn new(bad: DebugIdentity, good: DebugIdentity, marker: impl Into<String>) -> Self {
        Self { bad, good, marker: marker.into(), found_at: Utc::now().to_rfc3339() }
    }
}
