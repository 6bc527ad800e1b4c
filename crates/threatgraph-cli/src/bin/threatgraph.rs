//! CLI entry point: parses arguments, runs the pipeline, and dispatches
//! to whichever sinks were requested (spec §6, §7).

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use threatgraph_cli::cli::{Args, RenderArg};
use threatgraph_cli::config::EngineConfig;
use threatgraph_cli::{pipeline, sinks};
use threatgraph_core::ThreatGraphError;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::from(0),
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = EngineConfig::from_args(args).map_err(anyhow_from_engine)?;

    let extra_roots = match &args.finding_input {
        Some(path) => pipeline::load_finding_roots(path, &config.filters, args.finding_index).map_err(anyhow_from_engine)?,
        None => Vec::new(),
    };

    let output = pipeline::run(&args.input, &config, &extra_roots)
        .map_err(anyhow_from_engine)
        .with_context(|| format!("loading and extracting subgraph from {}", args.input.display()))?;

    if let Some(path) = &args.json_out {
        sinks::json_out::write(path, &output.graph, &output)
            .map_err(anyhow_from_engine)
            .with_context(|| format!("writing json-out sink to {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote json-out sink");
    }

    if let Some(path) = &args.dot {
        sinks::dot::write(path, &output.graph, &output)
            .map_err(anyhow_from_engine)
            .with_context(|| format!("writing dot sink to {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote dot sink");
    }

    render_if_requested(args, &output)?;

    println!(
        "{} {} nodes, {} edges, canvas {:.0}x{:.0}",
        "done:".green().bold(),
        output.vertices.len(),
        output.edges.len(),
        output.layout.width,
        output.layout.height
    );

    Ok(())
}

/// Handles `--render`. `svg`/`png` are not owned by this engine (spec §1
/// "SVG serialization format itself ... treated as a downstream sink");
/// per spec §7 `ExternalRendererMissing`, we fall back to the built-in
/// `simple-svg` vector sink whenever an output path was given, and treat
/// a missing `--image` path as nothing to do rather than fatal (no
/// renderer was actually requested to run against a target).
fn render_if_requested(args: &Args, output: &pipeline::PipelineOutput) -> anyhow::Result<()> {
    if args.render == RenderArg::None {
        return Ok(());
    }
    let Some(path) = &args.image else {
        tracing::warn!("--render requested without --image; nothing to write");
        return Ok(());
    };
    if matches!(args.render, RenderArg::Svg | RenderArg::Png) {
        tracing::warn!(
            requested = ?args.render,
            "external renderer for this format is out of scope; falling back to the built-in simple-svg sink"
        );
    }
    sinks::simple_svg::write(path, &output.graph, output, args.legend)
        .map_err(anyhow_from_engine)
        .with_context(|| format!("writing render sink to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote render sink");
    Ok(())
}

fn anyhow_from_engine(err: ThreatGraphError) -> anyhow::Error {
    anyhow::Error::new(err)
}

/// Exit codes per spec §6/§7: missing input, empty result, or sink
/// failure all map to `1`; a malformed `--start-ts` is the sole
/// distinct `2`.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ThreatGraphError>() {
        Some(ThreatGraphError::InvalidStartTime(_)) => 2,
        _ => 1,
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
