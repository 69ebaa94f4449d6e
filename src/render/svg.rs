use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use super::tooltip::build_path;
use crate::layout::{Layout, LayoutRect};
use crate::tree::arena::{NodeKind, StatTree};

/// Fill behind containers that carry an explicit total (free capacity shows through).
pub const CONTAINER_FILL: &str = "gainsboro";
/// Leaf fill when no index color was assigned.
pub const DEFAULT_LEAF_FILL: &str = "white";
pub const LEAF_STROKE: &str = "black";

/// Render a laid-out tree as a standalone SVG document.
///
/// Rects are emitted in layout order (parents before children). Containers with an
/// explicit total get a borderless background; leaves get a filled, bordered rect.
/// Every rect carries its breadcrumb as a `<title>`.
pub fn render_svg(tree: &StatTree, layout: &Layout) -> String {
    let mut out = String::with_capacity(256 + layout.rects.len() * 160);

    let view = layout
        .rects
        .first()
        .map(LayoutRect::rect)
        .unwrap_or(crate::layout::DEFAULT_CANVAS);

    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n");
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" baseProfile="full" width="100%" height="100%" viewBox="{} {} {} {}">"#,
        fmt_num(view.x),
        fmt_num(view.y),
        fmt_num(view.w),
        fmt_num(view.h)
    );

    for rect in &layout.rects {
        let node = tree.get(rect.node);
        let (fill, stroke) = match &node.kind {
            NodeKind::Container { total: Some(_), .. } => (CONTAINER_FILL.to_string(), "none"),
            NodeKind::Container { total: None, .. } => continue,
            NodeKind::Leaf { color, .. } => (
                color
                    .map(|c| c.to_hex())
                    .unwrap_or_else(|| DEFAULT_LEAF_FILL.to_string()),
                LEAF_STROKE,
            ),
        };

        let _ = writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}"><title>{}</title></rect>"#,
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.w),
            fmt_num(rect.h),
            fill,
            stroke,
            escape_xml(&build_path(tree, rect.node))
        );
    }

    out.push_str("</svg>\n");
    out
}

/// Render and write to `path`.
pub fn write_svg(path: &Path, tree: &StatTree, layout: &Layout) -> Result<()> {
    let svg = render_svg(tree, layout);
    std::fs::write(path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {} ({} rects)", path.display(), layout.rects.len());
    Ok(())
}

/// Coordinates with at most three decimals and no trailing zeros.
fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_layout, LayoutConfig, DEFAULT_CANVAS};
    use crate::render::colors::Rgb;
    use crate::tree::aggregate::aggregate_sizes;
    use crate::tree::arena::StatNode;

    fn sample() -> StatTree {
        let mut tree = StatTree::new("cluster");
        let node = tree.add_child(tree.root, StatNode::container("node<1>", None));
        let path = tree.add_child(node, StatNode::container("/data", Some(1000)));
        let shard = tree.add_child(path, StatNode::container("[logs][0]", None));
        tree.add_child(shard, StatNode::leaf("store", 300, Some(Rgb::new(1.0, 0.5, 0.5))));
        tree.add_child(shard, StatNode::leaf("translog", 100, None));
        aggregate_sizes(&mut tree);
        tree
    }

    fn render(tree: &StatTree) -> String {
        let layout = compute_layout(tree, DEFAULT_CANVAS, &LayoutConfig::disk());
        render_svg(tree, &layout)
    }

    #[test]
    fn document_has_root_viewbox() {
        let svg = render(&sample());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 1000 800""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn containers_without_total_are_not_drawn() {
        let svg = render(&sample());
        // One background (the path) plus two leaves.
        assert_eq!(svg.matches("<rect ").count(), 3);
        assert_eq!(svg.matches(r#"fill="gainsboro" stroke="none""#).count(), 1);
    }

    #[test]
    fn leaves_use_their_color_or_white() {
        let svg = render(&sample());
        assert!(svg.contains(r##"fill="#ff8080" stroke="black""##));
        assert!(svg.contains(r#"fill="white" stroke="black""#));
    }

    #[test]
    fn titles_are_escaped_breadcrumbs() {
        let svg = render(&sample());
        assert!(svg.contains(
            "<title>cluster -&gt; node&lt;1&gt; -&gt; /data -&gt; [logs][0] -&gt; translog</title>"
        ));
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(1000.0), "1000");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333");
        assert_eq!(fmt_num(-0.0001), "0");
    }
}
