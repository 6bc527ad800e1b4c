//! Load-time filter configuration (spec §4.1, §6 CLI table).

use rustc_hash::FxHashSet;

/// Structural and temporal filters applied during the adjacency edge
/// pass, plus the two behaviors the spec leaves as Open Questions
/// (resolved in SPEC_FULL §4 as configuration rather than hard-coded
/// constants).
#[derive(Debug, Clone)]
pub struct LoadFilterConfig {
    /// Substring filter on either endpoint identifier.
    pub match_substring: Option<String>,
    /// Restrict to these edge type names, if set.
    pub edge_types: Option<FxHashSet<String>>,
    /// Restrict both endpoints to these vertex kinds, if set. `file`
    /// implicitly admits `path` (spec §4.1 step 3).
    pub allowed_kinds: Option<FxHashSet<String>>,
    /// Reject edges strictly before this epoch once set. Unknown-timing
    /// edges are rejected too (matching the original loader's
    /// unconditional `if ts is None: continue` once a floor is given).
    pub start_ts: Option<f64>,
    /// Stop accepting edges once this many have been kept.
    pub limit: Option<usize>,
    /// Case-insensitive path prefixes that mark a `proc` vertex as a
    /// "system process" whose incident path/file edges are suppressed
    /// (spec §3 invariant; externalized per the Open Question in §9).
    pub system_process_prefixes: Vec<String>,
    /// When true, finding-derived edges are tagged with a single
    /// `{name: rule_id}` IOA tag. Default `false` matches spec.md
    /// exactly (the other Open Question in §9).
    pub synthesize_finding_ioa: bool,
}

impl Default for LoadFilterConfig {
    fn default() -> Self {
        Self {
            match_substring: None,
            edge_types: None,
            allowed_kinds: None,
            start_ts: None,
            limit: None,
            system_process_prefixes: vec![
                "c:\\windows\\system32\\".to_string(),
                "c:\\windows\\syswow64\\".to_string(),
            ],
            synthesize_finding_ioa: false,
        }
    }
}

impl LoadFilterConfig {
    /// Whether `allowed_kinds` (expanded for the implicit `file`→`path`
    /// rule) contains `kind`.
    pub fn kind_allowed(&self, kind: &str) -> bool {
        let Some(allowed) = &self.allowed_kinds else {
            return true;
        };
        if allowed.contains(kind) {
            return true;
        }
        kind == "path" && allowed.contains("file")
    }
}
