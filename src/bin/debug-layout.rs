/// Diagnostic tool to verify stats → tree → layout pipeline
use shardmap_rs::layout::{Layout, DEFAULT_CANVAS};
use shardmap_rs::render::colors::{ColorAssigner, ColorSettings};
use shardmap_rs::render::tooltip::format_size;
use shardmap_rs::report::{self, TreeKind};
use shardmap_rs::stats;
use shardmap_rs::tree::arena::{NodeId, StatTree};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shardmap_rs=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let dir = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("usage: debug-layout DIR [disk|segments]"))?;
    let kinds: Vec<TreeKind> = match args.next().as_deref() {
        None => TreeKind::ALL.to_vec(),
        Some("disk") => vec![TreeKind::DiskSize],
        Some("segments") => vec![TreeKind::SegmentMemory],
        Some(other) => anyhow::bail!("unknown tree '{}', expected disk or segments", other),
    };

    println!("=== DIAGNOSTIC: Stats → Tree → Layout Pipeline ===");
    println!("Diagnostics: {}", dir.display());

    let diagnostics = stats::load(&dir)?;
    println!(
        "\n[1] Loaded {} nodes, {} shard copies",
        diagnostics.nodes.len(),
        diagnostics.shard_copies.len()
    );

    let mut colors = ColorAssigner::seeded(&ColorSettings::default());
    for kind in kinds {
        let positioned = report::position(kind, &diagnostics, &mut colors, DEFAULT_CANVAS)?;
        let tree = &positioned.tree;
        let layout = &positioned.layout;

        println!("\n[2] {}: {} tree nodes, {} rects", kind.file_name(), tree.len(), layout.rects.len());
        print_tree(tree, layout, tree.root, 0);

        // Leaf coverage of the canvas: what is not covered is slack or padding.
        let leaf_area: f64 = layout
            .rects
            .iter()
            .filter(|r| tree.get(r.node).is_leaf())
            .map(|r| r.w * r.h)
            .sum();
        let canvas_area = DEFAULT_CANVAS.area();
        println!("    Leaf area:   {:.0}", leaf_area);
        println!("    Canvas area: {:.0}", canvas_area);
        println!("    Coverage: {:.1}%", (leaf_area / canvas_area) * 100.0);
    }

    println!("\n[3] {} index families colored", colors.len());

    Ok(())
}

fn print_tree(tree: &StatTree, layout: &Layout, id: NodeId, indent: usize) {
    let node = tree.get(id);
    match layout.get(id) {
        Some(r) => println!(
            "{}{} ({}) {:.1} {:.1} {:.1} {:.1}",
            "  ".repeat(indent),
            node.label,
            format_size(node.size),
            r.x,
            r.y,
            r.w,
            r.h
        ),
        None => println!(
            "{}{} ({}) <no area>",
            "  ".repeat(indent),
            node.label,
            format_size(node.size)
        ),
    }
    for child in tree.children(id) {
        print_tree(tree, layout, child, indent + 1);
    }
}
