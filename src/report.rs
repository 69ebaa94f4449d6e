use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::layout::{self, Layout, LayoutConfig, Rect};
use crate::render::colors::{ColorAssigner, ColorSettings, HueSource};
use crate::render::svg;
use crate::render::tooltip::format_size;
use crate::stats::{self, Diagnostics};
use crate::tree::aggregate::aggregate_sizes;
use crate::tree::arena::StatTree;
use crate::tree::{build_disk_tree, build_segment_tree};

/// The two maps produced per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    DiskSize,
    SegmentMemory,
}

impl TreeKind {
    pub const ALL: [TreeKind; 2] = [TreeKind::DiskSize, TreeKind::SegmentMemory];

    pub fn file_name(self) -> &'static str {
        match self {
            TreeKind::DiskSize => "diskSize.svg",
            TreeKind::SegmentMemory => "segmentMemory.svg",
        }
    }

    pub fn layout_config(self) -> LayoutConfig {
        match self {
            TreeKind::DiskSize => LayoutConfig::disk(),
            TreeKind::SegmentMemory => LayoutConfig::segment_memory(),
        }
    }

    /// Build and size the tree for this map.
    pub fn build<H: HueSource>(
        self,
        diagnostics: &Diagnostics,
        colors: &mut ColorAssigner<H>,
    ) -> Result<StatTree> {
        let mut tree = match self {
            TreeKind::DiskSize => build_disk_tree(diagnostics, colors)?,
            TreeKind::SegmentMemory => build_segment_tree(diagnostics, colors)?,
        };
        aggregate_sizes(&mut tree);
        Ok(tree)
    }
}

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Unpacked diagnostics dump holding the two stats files
    pub diagnostics_dir: PathBuf,
    /// Where the SVGs are written
    pub out_dir: PathBuf,
    pub colors: ColorSettings,
    pub canvas: Rect,
}

impl RunConfig {
    pub fn new(diagnostics_dir: impl Into<PathBuf>) -> Self {
        Self {
            diagnostics_dir: diagnostics_dir.into(),
            out_dir: PathBuf::from("."),
            colors: ColorSettings::default(),
            canvas: layout::DEFAULT_CANVAS,
        }
    }
}

/// One rendered map.
#[derive(Debug, Clone)]
pub struct RenderedMap {
    pub kind: TreeKind,
    pub path: PathBuf,
    pub root_size: u64,
    pub rect_count: usize,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub maps: Vec<RenderedMap>,
    /// Distinct index families that received a color
    pub color_count: usize,
}

/// A built, sized and positioned map, ready to render.
pub struct PositionedMap {
    pub kind: TreeKind,
    pub tree: StatTree,
    pub layout: Layout,
}

/// Build, size and lay out one map.
pub fn position<H: HueSource>(
    kind: TreeKind,
    diagnostics: &Diagnostics,
    colors: &mut ColorAssigner<H>,
    canvas: Rect,
) -> Result<PositionedMap> {
    let tree = kind
        .build(diagnostics, colors)
        .with_context(|| format!("Failed to build the tree for {}", kind.file_name()))?;
    let layout = layout::compute_layout(&tree, canvas, &kind.layout_config());
    Ok(PositionedMap { kind, tree, layout })
}

/// Load the dump, then build, lay out and write both maps.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let diagnostics = stats::load(&config.diagnostics_dir)?;

    // One assigner for both maps, so an index keeps its color across them.
    let mut colors = ColorAssigner::seeded(&config.colors);
    let mut maps = Vec::with_capacity(TreeKind::ALL.len());

    for kind in TreeKind::ALL {
        let positioned = position(kind, &diagnostics, &mut colors, config.canvas)?;
        let root_size = positioned.tree.get(positioned.tree.root).size;
        tracing::info!(
            "{}: {} across {} nodes",
            kind.file_name(),
            format_size(root_size),
            positioned.tree.children(positioned.tree.root).count()
        );

        let path = config.out_dir.join(kind.file_name());
        svg::write_svg(&path, &positioned.tree, &positioned.layout)?;

        maps.push(RenderedMap {
            kind,
            path,
            root_size,
            rect_count: positioned.layout.rects.len(),
        });
    }

    Ok(RunSummary {
        maps,
        color_count: colors.len(),
    })
}
