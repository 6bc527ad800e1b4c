//! End-to-end coverage of the `threatgraph_cli` library surface: a
//! temp-file adjacency fixture driven through `EngineConfig::from_args`
//! and `pipeline::run`, then through each sink.

use std::io::Write;
use threatgraph_cli::cli::{Args, InputKindArg, LayoutArg, RankDirArg, RenderArg};
use threatgraph_cli::config::EngineConfig;
use threatgraph_cli::{pipeline, sinks};

fn args_with(input: std::path::PathBuf, layout: LayoutArg) -> Args {
    Args {
        input,
        input_kind: InputKindArg::Auto,
        finding_input: None,
        finding_index: None,
        edge_types: vec![],
        vertex_types: vec![],
        through_edge: vec![],
        r#match: None,
        limit: None,
        start_ts: None,
        focus: Some("proc:parent".to_string()),
        proc_name: None,
        render: RenderArg::None,
        image: None,
        dot: None,
        json_out: None,
        layout,
        iterations: None,
        seed: 7,
        layer_edge: vec![],
        rankdir: RankDirArg::Tb,
        layer_gap: 80.0,
        node_gap: 30.0,
        node_padding: 10.0,
        edge_label: false,
        edge_curve: 1.0,
        max_size: None,
        legend: false,
        verbose: 0,
    }
}

fn write_incident_fixture() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"record_type":"edge","vertex_id":"proc:parent","adjacent_id":"proc:child","type":"ParentOfEdge","ts":1}}"#
    )
    .unwrap();
    writeln!(
        file,
        r#"{{"record_type":"edge","vertex_id":"proc:child","adjacent_id":"net:10.0.0.1:443","type":"ConnectEdge","ts":2,"ioa_tags":[{{"name":"SuspiciousConnect","severity":"high"}}]}}"#
    )
    .unwrap();
    writeln!(
        file,
        r#"{{"record_type":"edge","vertex_id":"proc:child","adjacent_id":"file:C:\\temp\\a.exe","type":"CreatedFileEdge","ts":3}}"#
    )
    .unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn force_layout_pipeline_produces_a_routed_subgraph_anchored_on_the_ioa_edge() {
    let fixture = write_incident_fixture();
    let args = args_with(fixture.path().to_path_buf(), LayoutArg::Force);
    let config = EngineConfig::from_args(&args).unwrap();
    let output = pipeline::run(fixture.path(), &config, &[]).unwrap();

    // the CreatedFileEdge carries no IOA tag and is pruned away; only the
    // connect edge (and the parent-of edge on its path from the seed) survive.
    assert!(output.edges.len() <= 2);
    assert!(!output.vertices.is_empty());
    assert_eq!(output.routed.len(), output.edges.len());
    assert!(output.layout.width > 0.0);
    assert!(output.layout.height > 0.0);
    for &v in &output.vertices {
        assert!(output.layout.positions.contains_key(&v));
    }
}

#[test]
fn tree_layout_skips_overlap_separation_but_still_normalizes() {
    let fixture = write_incident_fixture();
    let args = args_with(fixture.path().to_path_buf(), LayoutArg::Tree);
    let config = EngineConfig::from_args(&args).unwrap();
    let output = pipeline::run(fixture.path(), &config, &[]).unwrap();
    assert!(output.layout.width > 0.0 && output.layout.height > 0.0);
}

#[test]
fn missing_input_file_is_a_fatal_error() {
    let args = args_with(std::path::PathBuf::from("/nonexistent/incident.jsonl"), LayoutArg::Force);
    let config = EngineConfig::from_args(&args).unwrap();
    let result = pipeline::run(&args.input, &config, &[]);
    assert!(result.is_err());
}

#[test]
fn malformed_start_ts_is_rejected_before_the_pipeline_runs() {
    let fixture = write_incident_fixture();
    let mut args = args_with(fixture.path().to_path_buf(), LayoutArg::Force);
    args.start_ts = Some("not-a-timestamp".to_string());
    let result = EngineConfig::from_args(&args);
    assert!(matches!(result, Err(threatgraph_core::ThreatGraphError::InvalidStartTime(_))));
}

#[test]
fn json_out_and_dot_sinks_round_trip_through_atomic_writes() {
    let fixture = write_incident_fixture();
    let args = args_with(fixture.path().to_path_buf(), LayoutArg::Circle);
    let config = EngineConfig::from_args(&args).unwrap();
    let output = pipeline::run(fixture.path(), &config, &[]).unwrap();

    let json_path = tempfile::NamedTempFile::new().unwrap().into_temp_path();
    sinks::json_out::write(&json_path, &output.graph, &output).unwrap();
    let json_text = std::fs::read_to_string(&json_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json_text).unwrap();
    assert!(value["nodes"].as_array().unwrap().len() >= 2);

    let dot_path = tempfile::NamedTempFile::new().unwrap().into_temp_path();
    sinks::dot::write(&dot_path, &output.graph, &output).unwrap();
    let dot_text = std::fs::read_to_string(&dot_path).unwrap();
    assert!(dot_text.starts_with("digraph threatgraph"));
}

#[test]
fn simple_svg_sink_always_emits_well_formed_svg_regardless_of_layout() {
    let fixture = write_incident_fixture();
    let args = args_with(fixture.path().to_path_buf(), LayoutArg::Layered);
    let config = EngineConfig::from_args(&args).unwrap();
    let output = pipeline::run(fixture.path(), &config, &[]).unwrap();

    let svg_path = tempfile::NamedTempFile::new().unwrap().into_temp_path();
    sinks::simple_svg::write(&svg_path, &output.graph, &output, true).unwrap();
    let svg_text = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg_text.trim_start().starts_with("<svg"));
    assert!(svg_text.contains("<path"));
}
