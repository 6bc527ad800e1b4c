//! The built-in vector sink (`--render simple-svg`, and the fallback
//! target for `--render svg`/`--render png` per spec §7
//! "ExternalRendererMissing ... falls back to the built-in vector sink
//! when the requested format permits"). A minimal but real SVG writer:
//! label boxes by kind shape/fill, routed cubic-Bezier edges by type
//! color, and an optional legend strip.

use crate::pipeline::PipelineOutput;
use crate::sinks::colors::{edge_color, node_fill};
use std::fmt::Write as _;
use std::path::Path;
use threatgraph_core::{Graph, Result};
use threatgraph_layout::{build_label, label_size};

pub fn render(graph: &Graph, output: &PipelineOutput, legend: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.0} {:.0}\">",
        output.layout.width, output.layout.height, output.layout.width, output.layout.height
    );
    out.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

    for routed in &output.routed {
        let edge = graph.edge(routed.edge);
        let color = edge_color(&edge.edge_type);
        let _ = writeln!(
            out,
            "  <path d=\"M {:.1} {:.1} C {:.1} {:.1}, {:.1} {:.1}, {:.1} {:.1}\" stroke=\"{color}\" fill=\"none\"/>",
            routed.p0.x, routed.p0.y, routed.c1.x, routed.c1.y, routed.c2.x, routed.c2.y, routed.p3.x, routed.p3.y
        );
    }

    for &v in &output.vertices {
        let Some(pos) = output.layout.positions.get(&v) else { continue };
        let label = build_label(graph, v);
        let size = label_size(&label);
        let fill = node_fill(&graph.vertex(v).kind);
        let (x, y) = (pos.x - size.width / 2.0, pos.y - size.height / 2.0);
        let _ = writeln!(
            out,
            "  <rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"4\" fill=\"{fill}\" stroke=\"#2c3e50\"/>",
            size.width, size.height
        );
        for (i, line) in label.split('\n').enumerate() {
            let ly = y + 16.0 + i as f64 * 16.0;
            let _ = writeln!(
                out,
                "  <text x=\"{:.1}\" y=\"{ly:.1}\" font-size=\"11\" text-anchor=\"middle\">{}</text>",
                pos.x,
                escape_text(line)
            );
        }
    }

    if legend {
        render_legend(&mut out, output.layout.width, output.layout.height);
    }

    out.push_str("</svg>\n");
    out
}

fn render_legend(out: &mut String, width: f64, height: f64) {
    let x = width - 240.0;
    let mut y = 30.0;
    let entries = [
        ("#e74c3c", "access / remote thread"),
        ("#27ae60", "connect / dns query"),
        ("#f1c40f", "image-of"),
        ("#2980b9", "created-file / image-load"),
        ("#7f8c8d", "other"),
    ];
    for (color, label) in entries {
        if y > height - 20.0 {
            break;
        }
        let _ = writeln!(out, "  <rect x=\"{x:.1}\" y=\"{:.1}\" width=\"14\" height=\"14\" fill=\"{color}\"/>", y - 11.0);
        let _ = writeln!(out, "  <text x=\"{:.1}\" y=\"{y:.1}\" font-size=\"11\">{label}</text>", x + 20.0);
        y += 20.0;
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub fn write(path: &Path, graph: &Graph, output: &PipelineOutput, legend: bool) -> Result<()> {
    crate::sinks::write_atomic(path, &render(graph, output, legend))
}
