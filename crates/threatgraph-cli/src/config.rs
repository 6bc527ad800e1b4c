//! A typed configuration layer built once from parsed CLI args (SPEC_FULL
//! §4 "Config" addition), mirroring the teacher's pattern of a config
//! struct with a `Default` plus CLI overrides (`codegraph-core::cli_config`)
//! rather than threading raw `Args` fields through the pipeline.

use crate::cli::{Args, InputKindArg, LayoutArg, RankDirArg};
use rustc_hash::FxHashSet;
use threatgraph_core::{Result, ThreatGraphError};
use threatgraph_layout::{LayoutConfig, LayoutKind, RankDir};
use threatgraph_loader::{InputKindHint, LoadFilterConfig};

/// Everything the pipeline needs, derived once from `Args` so no
/// downstream module re-parses a raw flag.
pub struct EngineConfig {
    pub input_kind: InputKindHint,
    pub filters: LoadFilterConfig,
    pub start_ts_epoch: Option<f64>,
    pub through_edges: FxHashSet<String>,
    pub focus: Option<String>,
    pub proc_name: Option<String>,
    pub layout_kind: LayoutKind,
    pub layout: LayoutConfig,
    pub edge_label: bool,
}

impl EngineConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let start_ts_epoch = match &args.start_ts {
            Some(raw) => Some(parse_start_ts(raw)?),
            None => None,
        };

        let mut filters = LoadFilterConfig { start_ts: start_ts_epoch, ..LoadFilterConfig::default() };
        filters.match_substring = args.r#match.clone();
        filters.limit = args.limit;
        if !args.edge_types.is_empty() {
            filters.edge_types = Some(args.edge_types.iter().cloned().collect());
        }
        if !args.vertex_types.is_empty() {
            filters.allowed_kinds = Some(args.vertex_types.iter().cloned().collect());
        }

        let layout = LayoutConfig {
            iterations: args.iterations,
            seed: args.seed,
            layer_edges: args.layer_edge.iter().cloned().collect(),
            rankdir: match args.rankdir {
                RankDirArg::Tb => RankDir::TopToBottom,
                RankDirArg::Lr => RankDir::LeftToRight,
            },
            layer_gap: args.layer_gap,
            node_gap: args.node_gap,
            node_padding: args.node_padding,
            max_size: args.max_size,
            legend: args.legend,
            edge_curve: args.edge_curve,
        };

        Ok(Self {
            input_kind: match args.input_kind {
                InputKindArg::Auto => InputKindHint::Auto,
                InputKindArg::Adjacency => InputKindHint::Adjacency,
                InputKindArg::Finding => InputKindHint::Finding,
            },
            filters,
            start_ts_epoch,
            through_edges: args.through_edge.iter().cloned().collect(),
            focus: args.focus.clone(),
            proc_name: args.proc_name.clone(),
            layout_kind: match args.layout {
                LayoutArg::Force => LayoutKind::Force,
                LayoutArg::Circle => LayoutKind::Circle,
                LayoutArg::Layered => LayoutKind::Layered,
                LayoutArg::Tree => LayoutKind::Tree,
                LayoutArg::Time => LayoutKind::Time,
            },
            layout,
            edge_label: args.edge_label,
        })
    }
}

/// Parses `--start-ts` as either an ISO-8601 timestamp or an epoch
/// number, matching the loader's own `ts` parsing (spec §4.1). Failure
/// is `InvalidStartTime`, mapped by `main` to exit code 2 (spec §6).
fn parse_start_ts(raw: &str) -> Result<f64> {
    if let Ok(epoch) = raw.parse::<f64>() {
        return Ok(epoch);
    }
    threatgraph_core::parse_iso8601(raw).ok_or_else(|| ThreatGraphError::InvalidStartTime(raw.to_string()))
}
