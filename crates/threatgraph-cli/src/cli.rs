//! The flat `clap`-derived argument surface (spec §6). One struct, no
//! subcommands: the tool performs one extraction-and-layout action per
//! invocation, not a family of subcommands, so a single flag set —
//! rather than the teacher's `codegraph-cli` subcommand tree — is the
//! closer fit (see SPEC_FULL §6).

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "threatgraph")]
#[command(about = "Incident-graph extraction and layout engine", long_about = None)]
#[command(version)]
pub struct Args {
    /// Adjacency or finding JSONL input file.
    #[arg(long)]
    pub input: PathBuf,

    /// How to interpret `--input`.
    #[arg(long, value_enum, default_value = "auto")]
    pub input_kind: InputKindArg,

    /// A finding-format JSONL file supplying seed roots alongside `--input`.
    #[arg(long)]
    pub finding_input: Option<PathBuf>,

    /// Restrict `--finding-input` to the finding record at this 0-based index.
    #[arg(long)]
    pub finding_index: Option<usize>,

    /// Comma-separated edge type allowlist.
    #[arg(long, value_delimiter = ',')]
    pub edge_types: Vec<String>,

    /// Comma-separated vertex kind allowlist (`file` implicitly allows `path`).
    #[arg(long, value_delimiter = ',')]
    pub vertex_types: Vec<String>,

    /// Comma-separated edge types that anchor the paths-through filter.
    #[arg(long, value_delimiter = ',')]
    pub through_edge: Vec<String>,

    /// Substring filter applied to either endpoint identifier at load time.
    #[arg(long)]
    pub r#match: Option<String>,

    /// Cap the number of edges kept by the loader.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Reject edges with known timing strictly before this instant
    /// (ISO-8601 or epoch seconds). Malformed values are a fatal,
    /// distinct-exit-code error (spec §6/§7).
    #[arg(long)]
    pub start_ts: Option<String>,

    /// Seed vertex identifier.
    #[arg(long)]
    pub focus: Option<String>,

    /// Substring matched against `proc` vertices' `image` field to derive
    /// additional seeds.
    #[arg(long)]
    pub proc_name: Option<String>,

    /// Renderer sink.
    #[arg(long, value_enum, default_value = "none")]
    pub render: RenderArg,

    /// Output path for `--render` (svg/png/simple-svg).
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Output path for a Graphviz DOT sink, independent of `--render`.
    #[arg(long)]
    pub dot: Option<PathBuf>,

    /// Output path for the structured subgraph JSON sink (spec §6).
    #[arg(long)]
    pub json_out: Option<PathBuf>,

    /// Layout strategy.
    #[arg(long, value_enum, default_value = "force")]
    pub layout: LayoutArg,

    /// Force-layout iteration override (defaults to the node-count throttle, spec §4.6).
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Force-layout RNG seed (spec §5).
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Comma-separated edge types restricting layered-layout ranking.
    #[arg(long, value_delimiter = ',')]
    pub layer_edge: Vec<String>,

    /// Rank direction for layered/tree/time layouts.
    #[arg(long, value_enum, default_value = "tb")]
    pub rankdir: RankDirArg,

    /// Inter-layer spacing floor, in pixels.
    #[arg(long, default_value_t = 80.0)]
    pub layer_gap: f64,

    /// Intra-layer spacing floor, in pixels.
    #[arg(long, default_value_t = 30.0)]
    pub node_gap: f64,

    /// Padding added around a node's label box for overlap/routing math.
    #[arg(long, default_value_t = 10.0)]
    pub node_padding: f64,

    /// Annotate routed edges with their type in sinks that support it.
    #[arg(long)]
    pub edge_label: bool,

    /// Edge curvature multiplier (`0` selects the straight-line candidate).
    #[arg(long, default_value_t = 1.0)]
    pub edge_curve: f64,

    /// Scale the canvas down to fit this maximum dimension, in pixels.
    #[arg(long)]
    pub max_size: Option<f64>,

    /// Reserve a 260px right-side legend before `--max-size` scaling.
    #[arg(long)]
    pub legend: bool,

    /// Increase log verbosity (repeatable: `-v`, `-vv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputKindArg {
    Auto,
    Adjacency,
    Finding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderArg {
    None,
    Svg,
    Png,
    SimpleSvg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Force,
    Circle,
    Layered,
    Tree,
    Time,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RankDirArg {
    Tb,
    Lr,
}
