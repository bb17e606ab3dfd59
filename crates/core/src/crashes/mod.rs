//! Crash-report collaborators and debug-identity resolution.
//!
//! The crash-report service is treated as two interfaces: a grouping search
//! that buckets report identifiers per build, and a detail endpoint exposing
//! the modules loaded by an individual report. Resolution samples the
//! reports of each build until one reveals the target module's debug
//! identifier.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::BuildDebugMap;

/// Default number of report ids queried per detail request.
pub const DEFAULT_DETAIL_BATCH: usize = 10;

/// Facet page size for the grouping search.
const FACETS_SIZE: usize = 1000;

/// Error type for crash-report API interactions.
#[derive(Debug, Error)]
pub enum CrashApiError {
    /// Transport-level failure (DNS, connect, read, TLS).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Crash API returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body did not match the expected payload shape.
    #[error("Unexpected crash API payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Convenience result type for crash API operations.
pub type CrashApiResult<T> = Result<T, CrashApiError>;

/// Filters for the grouping search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub product: String,
    pub release_channel: String,
    /// Inclusive lower bound on build ids (timestamp-like strings).
    pub min_build_id: String,
    pub platform: String,
}

/// A module entry reported by a processed crash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    #[serde(default)]
    pub debug_file: String,
    #[serde(default)]
    pub debug_id: String,
}

/// The slice of a processed crash report this crate cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedCrash {
    #[serde(default)]
    pub modules: Vec<ModuleInfo>,
}

/// Grouping search collaborator: report ids bucketed per build, ascending
/// by build id.
pub trait CrashSearch {
    fn reports_by_build(
        &self,
        filters: &SearchFilters,
    ) -> CrashApiResult<BTreeMap<String, Vec<String>>>;
}

/// Detail collaborator: per-report metadata for a batch of report ids.
pub trait CrashDetail {
    fn processed(&self, report_ids: &[String]) -> CrashApiResult<Vec<ProcessedCrash>>;
}

// Wire shapes for the grouping search response. `term` for the build facet
// arrives as a JSON number, so it is taken as a raw value and rendered.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    facets: SearchFacets,
}

#[derive(Debug, Default, Deserialize)]
struct SearchFacets {
    #[serde(default)]
    build_id: Vec<BuildFacet>,
}

#[derive(Debug, Deserialize)]
struct BuildFacet {
    term: serde_json::Value,
    #[serde(default)]
    facets: UuidFacets,
}

#[derive(Debug, Default, Deserialize)]
struct UuidFacets {
    #[serde(default)]
    uuid: Vec<TermFacet>,
}

#[derive(Debug, Deserialize)]
struct TermFacet {
    term: String,
}

#[derive(Debug, Deserialize)]
struct ProcessedCrashResponse {
    #[serde(default)]
    json_dump: JsonDump,
}

#[derive(Debug, Default, Deserialize)]
struct JsonDump {
    #[serde(default)]
    modules: Vec<ModuleInfo>,
}

fn facet_term_string(term: &serde_json::Value) -> String {
    match term {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Blocking client for the crash-report API, implementing both
/// collaborators.
pub struct SocorroClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl SocorroClient {
    pub fn new(base_url: &str) -> CrashApiResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("sleuth-core/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> CrashApiResult<T> {
        let response = self.client.get(url).query(query).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrashApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl CrashSearch for SocorroClient {
    fn reports_by_build(
        &self,
        filters: &SearchFilters,
    ) -> CrashApiResult<BTreeMap<String, Vec<String>>> {
        let url = format!("{}/SuperSearch/", self.base_url);
        let query = [
            ("product", filters.product.clone()),
            ("release_channel", filters.release_channel.clone()),
            ("build_id", format!(">={}", filters.min_build_id)),
            ("platform", format!("={}", filters.platform)),
            // Group report ids by build; no individual results.
            ("_aggs.build_id", "uuid".to_string()),
            ("_results_number", "0".to_string()),
            ("_facets", "product".to_string()),
            ("_facets_size", FACETS_SIZE.to_string()),
        ];
        let response: SearchResponse = self.get_json(&url, &query)?;

        let mut groups = BTreeMap::new();
        for facet in response.facets.build_id {
            let build_id = facet_term_string(&facet.term);
            let report_ids = facet.facets.uuid.into_iter().map(|f| f.term).collect();
            groups.insert(build_id, report_ids);
        }
        Ok(groups)
    }
}

impl CrashDetail for SocorroClient {
    fn processed(&self, report_ids: &[String]) -> CrashApiResult<Vec<ProcessedCrash>> {
        let url = format!("{}/ProcessedCrash/", self.base_url);
        let mut out = Vec::with_capacity(report_ids.len());
        for report_id in report_ids {
            let response: ProcessedCrashResponse =
                self.get_json(&url, &[("crash_id", report_id.clone())])?;
            out.push(ProcessedCrash { modules: response.json_dump.modules });
        }
        Ok(out)
    }
}

/// Result of a full resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOutcome {
    /// Builds whose debug identifier was found.
    pub map: BuildDebugMap,
    /// Builds where no sampled report carried the module. These never enter
    /// the map.
    pub unresolved: Vec<String>,
}

/// Resolves each build's debug identifier by sampling its crash reports.
pub struct DebugIdResolver<'a> {
    detail: &'a dyn CrashDetail,
    module: String,
    batch_size: usize,
}

impl<'a> DebugIdResolver<'a> {
    pub fn new(detail: &'a dyn CrashDetail, module: impl Into<String>) -> Self {
        Self { detail, module: module.into(), batch_size: DEFAULT_DETAIL_BATCH }
    }

    /// Override the detail request batch size (clamped to at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn debug_id_in(&self, crashes: &[ProcessedCrash]) -> Option<String> {
        for crash in crashes {
            for module in &crash.modules {
                if module.debug_file == self.module && !module.debug_id.is_empty() {
                    return Some(module.debug_id.clone());
                }
            }
        }
        None
    }

    /// Find the module's debug identifier among the given report ids.
    ///
    /// The first report is tried alone; the rest are queried in
    /// `batch_size` chunks, stopping at the first hit. `Ok(None)` means no
    /// sampled report carried the module. Transport errors propagate and
    /// abort the pass.
    pub fn find_debug_id(&self, report_ids: &[String]) -> CrashApiResult<Option<String>> {
        let (head, rest) = match report_ids.split_first() {
            Some(pair) => pair,
            None => return Ok(None),
        };
        let crashes = self.detail.processed(std::slice::from_ref(head))?;
        if let Some(debug_id) = self.debug_id_in(&crashes) {
            return Ok(Some(debug_id));
        }
        for chunk in rest.chunks(self.batch_size) {
            let crashes = self.detail.processed(chunk)?;
            if let Some(debug_id) = self.debug_id_in(&crashes) {
                return Ok(Some(debug_id));
            }
        }
        Ok(None)
    }

    /// Resolve every build in `groups`, partitioning into the resolved map
    /// and the unresolved build ids.
    pub fn resolve(
        &self,
        groups: &BTreeMap<String, Vec<String>>,
    ) -> CrashApiResult<ResolveOutcome> {
        let mut outcome = ResolveOutcome::default();
        for (build_id, report_ids) in groups {
            match self.find_debug_id(report_ids)? {
                Some(debug_id) => {
                    outcome.map.insert(build_id.clone(), debug_id);
                }
                None => outcome.unresolved.push(build_id.clone()),
            }
        }
        Ok(outcome)
    }
}
