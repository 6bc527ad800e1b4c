//! Color and shape conventions shared by every renderer sink (spec
//! §4.10 "sink contract").

use threatgraph_core::VertexKind;

/// Edge stroke color by type (spec §4.10).
pub fn edge_color(edge_type: &str) -> &'static str {
    match edge_type {
        "ProcessAccessEdge" | "RemoteThreadEdge" => "#e74c3c",
        "ConnectEdge" | "DNSQueryEdge" => "#27ae60",
        "ImageOfEdge" => "#f1c40f",
        "CreatedFileEdge" | "ImageLoadEdge" => "#2980b9",
        _ => "#7f8c8d",
    }
}

/// Node fill color by kind (spec §4.10).
pub fn node_fill(kind: &VertexKind) -> &'static str {
    match kind {
        VertexKind::Proc => "#d6eaf8",
        VertexKind::Path => "#e5e7e9",
        VertexKind::File => "#f9e79f",
        VertexKind::Net => "#d5f5e3",
        VertexKind::Domain => "#fef9e7",
        VertexKind::Event => "#fdfefe",
        VertexKind::Unknown => "#ffffff",
    }
}

/// Node shape by kind (spec §4.10). `"roundrect"`/`"rect"`/`"ellipse"`/
/// `"diamond"`/`"hexagon"` are abstract shape names; a concrete renderer
/// maps them onto its own primitive set.
pub fn node_shape(kind: &VertexKind) -> &'static str {
    match kind {
        VertexKind::Proc => "roundrect",
        VertexKind::Path => "rect",
        VertexKind::File => "ellipse",
        VertexKind::Net => "diamond",
        VertexKind::Domain => "hexagon",
        VertexKind::Event => "ellipse",
        VertexKind::Unknown => "rect",
    }
}
