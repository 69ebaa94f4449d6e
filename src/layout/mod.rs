pub mod band;
pub mod squarify;

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::tree::arena::{NodeId, StatNode, StatTree};

pub use self::squarify::Rect;

/// Canvas the two treemaps are drawn on.
pub const DEFAULT_CANVAS: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

/// A positioned rectangle in the treemap layout.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRect {
    pub node: NodeId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub depth: u16,
}

impl LayoutRect {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// The full layout result (rects in depth-first pre-order + lookup).
#[derive(Debug)]
pub struct Layout {
    /// Every placed node; a parent always precedes its children
    pub rects: Vec<LayoutRect>,
    /// node → index into `rects`. Nodes that got no area are absent.
    pub node_to_rect: HashMap<NodeId, usize>,
}

impl Layout {
    pub fn get(&self, node: NodeId) -> Option<&LayoutRect> {
        self.node_to_rect.get(&node).map(|&i| &self.rects[i])
    }
}

/// Configuration for treemap layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Subdivisions at depths below this are padded; at or above it they pack tightly
    pub padding_threshold: u16,
    /// Inset applied to each side of a padded rectangle
    pub padding: f64,
    /// Gap between neighbouring nodes in the top band
    pub band_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding_threshold: 2,
            padding: 1.0,
            band_gap: 5.0,
        }
    }
}

impl LayoutConfig {
    /// Paths and shards are padded, store / translog leaves are not.
    pub fn disk() -> Self {
        Self::default()
    }

    /// Shards pack tightly inside their node.
    pub fn segment_memory() -> Self {
        Self {
            padding_threshold: 1,
            ..Self::default()
        }
    }
}

/// Compute the layout of a sized tree inside `canvas`.
///
/// The tree must have been through `aggregate_sizes`.
pub fn compute_layout(tree: &StatTree, canvas: Rect, config: &LayoutConfig) -> Layout {
    let mut rects = Vec::with_capacity(tree.len());
    let mut node_to_rect = HashMap::with_capacity(tree.len());

    rects.push(LayoutRect {
        node: tree.root,
        x: canvas.x,
        y: canvas.y,
        w: canvas.w,
        h: canvas.h,
        depth: 0,
    });
    node_to_rect.insert(tree.root, 0);

    layout_children(tree, tree.root, canvas, 0, config, &mut rects, &mut node_to_rect);

    Layout { rects, node_to_rect }
}

/// The part of `bounds` the children may occupy. A container whose children fill
/// less than its total leaves the rest of its longer axis as slack.
pub fn occupied_area(node: &StatNode, bounds: Rect) -> Rect {
    match node.children_size {
        Some(children_size) if node.size > 0 && children_size < node.size => {
            bounds.shrink_longer_axis(children_size as f64 / node.size as f64)
        }
        _ => bounds,
    }
}

fn layout_children(
    tree: &StatTree,
    parent: NodeId,
    bounds: Rect,
    depth: u16,
    config: &LayoutConfig,
    rects: &mut Vec<LayoutRect>,
    node_to_rect: &mut HashMap<NodeId, usize>,
) {
    let parent_node = tree.get(parent);

    // Zero-sized children would have no area; drop them up front.
    let mut children: Vec<NodeId> = tree
        .children(parent)
        .filter(|&id| tree.get(id).size > 0)
        .collect();
    if depth == 0 {
        for id in tree.children(parent).filter(|&id| tree.get(id).size == 0) {
            tracing::warn!("Node '{}' has zero size and is left out", tree.get(id).label);
        }
    }
    if children.is_empty() {
        return;
    }

    let area = occupied_area(parent_node, bounds);

    let placed = if depth == 0 {
        // Stable alphabetical order so both maps line nodes up the same way.
        children.sort_by(|&a, &b| tree.get(a).label.cmp(&tree.get(b).label));
        let sizes: Vec<u64> = children.iter().map(|&id| tree.get(id).size).collect();
        tracing::info!(
            "Laying out {} nodes of '{}' in {:.0}x{:.0} band",
            children.len(),
            parent_node.label,
            area.w,
            area.h
        );
        band::band(&sizes, area, config.band_gap)
    } else {
        children.sort_by_key(|&id| Reverse(tree.get(id).size));
        let sizes: Vec<u64> = children.iter().map(|&id| tree.get(id).size).collect();
        let areas = squarify::normalize_sizes(&sizes, area);
        if depth < config.padding_threshold {
            squarify::padded_squarify(&areas, area, config.padding)
        } else {
            squarify::squarify(&areas, area)
        }
    };

    for (&child_id, pos) in children.iter().zip(placed) {
        if pos.area() <= 0.0 || !pos.area().is_finite() {
            tracing::debug!(
                "No area left for '{}' at depth {}",
                tree.get(child_id).label,
                depth + 1
            );
            continue;
        }

        let idx = rects.len();
        rects.push(LayoutRect {
            node: child_id,
            x: pos.x,
            y: pos.y,
            w: pos.w,
            h: pos.h,
            depth: depth + 1,
        });
        node_to_rect.insert(child_id, idx);

        if !tree.get(child_id).is_leaf() {
            layout_children(tree, child_id, pos, depth + 1, config, rects, node_to_rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::aggregate::aggregate_sizes;

    fn sized(mut tree: StatTree) -> StatTree {
        aggregate_sizes(&mut tree);
        tree
    }

    /// cluster → two nodes → paths with capacity → shards → store/translog.
    fn disk_like() -> StatTree {
        let mut tree = StatTree::new("cluster");
        let nodes = [
            ("zeta", [(4000, [900, 300]), (2000, [500, 120])]),
            ("alpha", [(1000, [50, 10]), (3000, [700, 0])]),
        ];
        for (name, paths) in nodes {
            let node = tree.add_child(tree.root, StatNode::container(name, None));
            for (i, (capacity, components)) in paths.into_iter().enumerate() {
                let label = format!("/data/{i}");
                let path = tree.add_child(node, StatNode::container(&label, Some(capacity)));
                for s in 0..3u64 {
                    let label = format!("[idx][{s}]");
                    let shard = tree.add_child(path, StatNode::container(&label, None));
                    tree.add_child(shard, StatNode::leaf("store", components[0] + s * 40, None));
                    if components[1] > 0 {
                        tree.add_child(shard, StatNode::leaf("translog", components[1], None));
                    }
                }
            }
        }
        sized(tree)
    }

    fn children_rects(tree: &StatTree, layout: &Layout, id: NodeId) -> Vec<Rect> {
        tree.children(id)
            .filter_map(|c| layout.get(c).map(|r| r.rect()))
            .collect()
    }

    #[test]
    fn root_covers_canvas() {
        let tree = disk_like();
        let layout = compute_layout(&tree, DEFAULT_CANVAS, &LayoutConfig::disk());
        assert_eq!(layout.rects[0].rect(), DEFAULT_CANVAS);
        assert_eq!(layout.rects[0].node, tree.root);
    }

    #[test]
    fn top_band_is_alphabetical_with_gap() {
        let tree = disk_like();
        let layout = compute_layout(&tree, DEFAULT_CANVAS, &LayoutConfig::disk());

        let alpha = layout.get(tree.find_child(tree.root, "alpha").unwrap()).unwrap();
        let zeta = layout.get(tree.find_child(tree.root, "zeta").unwrap()).unwrap();

        // zeta is larger but alpha comes first.
        assert!(tree.get(zeta.node).size > tree.get(alpha.node).size);
        assert_eq!(alpha.x, 0.0);
        assert!((zeta.x - (alpha.x + alpha.w + 5.0)).abs() < 1e-9);
        assert!((zeta.x + zeta.w - 1000.0).abs() < 1e-9);
        assert_eq!(alpha.h, 800.0);
        assert_eq!(zeta.h, 800.0);

        let ratio = alpha.w / zeta.w;
        let expected = tree.get(alpha.node).size as f64 / tree.get(zeta.node).size as f64;
        assert!((ratio - expected).abs() < 1e-9);
    }

    #[test]
    fn deeper_levels_are_ordered_by_size() {
        let tree = disk_like();
        let layout = compute_layout(&tree, DEFAULT_CANVAS, &LayoutConfig::disk());

        // Pre-order: after a parent, its placed children follow in layout order.
        let zeta = tree.find_child(tree.root, "zeta").unwrap();
        let first_path = layout.rects[layout.node_to_rect[&zeta] + 1];
        assert_eq!(tree.get(first_path.node).label, "/data/0");
        assert_eq!(tree.get(first_path.node).size, 4000);
    }

    #[test]
    fn children_stay_inside_parents() {
        let tree = disk_like();
        let layout = compute_layout(&tree, DEFAULT_CANVAS, &LayoutConfig::disk());
        for r in &layout.rects {
            if let Some(parent) = tree.get(r.node).parent {
                let p = layout.get(parent).unwrap().rect();
                assert!(p.contains(&r.rect(), 1e-6), "{:?} outside {:?}", r, p);
            }
        }
    }

    #[test]
    fn tight_levels_tile_the_occupied_area() {
        let tree = disk_like();
        let config = LayoutConfig::disk();
        let layout = compute_layout(&tree, DEFAULT_CANVAS, &config);

        let mut checked = 0;
        for r in &layout.rects {
            let node = tree.get(r.node);
            if r.depth < config.padding_threshold || node.is_leaf() {
                continue;
            }
            let occupied = occupied_area(node, r.rect());
            let kids = children_rects(&tree, &layout, r.node);
            let covered: f64 = kids.iter().map(|k| k.area()).sum();
            assert!((covered - occupied.area()).abs() < 1e-6);
            for (i, a) in kids.iter().enumerate() {
                assert!(occupied.contains(a, 1e-6));
                for b in &kids[i + 1..] {
                    assert!(a.overlap_area(b) < 1e-6);
                }
            }
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn padded_levels_leave_gaps() {
        let tree = disk_like();
        let layout = compute_layout(&tree, DEFAULT_CANVAS, &LayoutConfig::disk());

        let zeta = tree.find_child(tree.root, "zeta").unwrap();
        let node_rect = layout.get(zeta).unwrap().rect();
        let covered: f64 = children_rects(&tree, &layout, zeta).iter().map(|k| k.area()).sum();
        assert!(covered < node_rect.area());
    }

    #[test]
    fn unused_capacity_shrinks_longer_axis() {
        let mut tree = StatTree::new("cluster");
        let node = tree.add_child(tree.root, StatNode::container("n", Some(1000)));
        let shard = tree.add_child(node, StatNode::leaf("[i][0]", 100, None));
        let tree = sized(tree);

        let layout = compute_layout(&tree, DEFAULT_CANVAS, &LayoutConfig::segment_memory());
        let n = layout.get(node).unwrap().rect();
        let s = layout.get(shard).unwrap().rect();
        assert_eq!(n, DEFAULT_CANVAS);
        // 1000 wide > 800 high: width shrinks to a tenth.
        assert!(s.x.abs() < 1e-9 && s.y.abs() < 1e-9);
        assert!((s.w - 100.0).abs() < 1e-9);
        assert!((s.h - 800.0).abs() < 1e-9);
    }

    #[test]
    fn zero_sized_children_get_no_rect() {
        let mut tree = StatTree::new("cluster");
        let node = tree.add_child(tree.root, StatNode::container("n", None));
        let path = tree.add_child(node, StatNode::container("/d", Some(10)));
        let empty = tree.add_child(path, StatNode::container("[i][0]", None));
        let full = tree.add_child(path, StatNode::container("[i][1]", None));
        tree.add_child(full, StatNode::leaf("store", 5, None));
        let tree = sized(tree);

        let layout = compute_layout(&tree, DEFAULT_CANVAS, &LayoutConfig::disk());
        assert!(layout.get(empty).is_none());
        assert!(layout.get(full).is_some());
    }

    #[test]
    fn layout_is_deterministic() {
        let tree = disk_like();
        let a = compute_layout(&tree, DEFAULT_CANVAS, &LayoutConfig::disk());
        let b = compute_layout(&tree, DEFAULT_CANVAS, &LayoutConfig::disk());
        assert_eq!(a.rects.len(), b.rects.len());
        for (x, y) in a.rects.iter().zip(&b.rects) {
            assert_eq!(x.node, y.node);
            assert_eq!(x.rect(), y.rect());
        }
    }
}
