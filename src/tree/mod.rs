pub mod aggregate;
pub mod arena;
pub mod index_name;

use anyhow::{anyhow, Result};
use indexmap::IndexMap;

use self::arena::{NodeId, StatNode, StatTree};
use crate::render::colors::{ColorAssigner, HueSource};
use crate::stats::types::{NodeInfo, ShardCopy};
use crate::stats::Diagnostics;

pub const ROOT_LABEL: &str = "cluster";

/// Shard copies grouped node id → data path → copies, in first-seen order.
/// Nodes without shards never appear here.
type ShardsByNode<'a> = IndexMap<&'a str, IndexMap<&'a str, Vec<&'a ShardCopy>>>;

fn group_shards(diagnostics: &Diagnostics) -> ShardsByNode<'_> {
    let mut by_node: ShardsByNode<'_> = IndexMap::new();
    for copy in &diagnostics.shard_copies {
        by_node
            .entry(copy.node_id.as_str())
            .or_default()
            .entry(copy.data_path.as_str())
            .or_default()
            .push(copy);
    }
    by_node
}

fn node_info<'a>(diagnostics: &'a Diagnostics, node_id: &str) -> Result<&'a NodeInfo> {
    diagnostics
        .nodes
        .get(node_id)
        .ok_or_else(|| anyhow!("Shards are allocated to node '{}' which has no node stats", node_id))
}

/// Build the disk usage tree: cluster → node → data path → shard → store / translog.
///
/// Paths carry their disk capacity as an explicit total, so free space shows up as slack.
pub fn build_disk_tree<H: HueSource>(
    diagnostics: &Diagnostics,
    colors: &mut ColorAssigner<H>,
) -> Result<StatTree> {
    let mut tree = StatTree::new(ROOT_LABEL);

    for (node_id, paths) in group_shards(diagnostics) {
        let info = node_info(diagnostics, node_id)?;
        let node = tree.add_child(tree.root, StatNode::container(&info.name, None));

        for (path, copies) in paths {
            let capacity = info.disk_by_path.get(path).copied().ok_or_else(|| {
                anyhow!(
                    "Node '{}' holds shards on data path '{}' which is missing from its fs stats",
                    info.name,
                    path
                )
            })?;
            let path_node = tree.add_child(node, StatNode::container(path, Some(capacity)));

            for copy in copies {
                add_disk_shard(&mut tree, path_node, copy, colors);
            }
        }
    }

    tracing::info!(
        "Disk tree built: {} nodes, {} leaves",
        tree.len(),
        tree.leaves().count()
    );
    Ok(tree)
}

fn add_disk_shard<H: HueSource>(
    tree: &mut StatTree,
    path_node: NodeId,
    copy: &ShardCopy,
    colors: &mut ColorAssigner<H>,
) {
    let shard = tree.add_child(path_node, StatNode::container(&copy.descriptor(), None));
    let color = colors.color_for_index(&copy.index);

    if copy.store_bytes > 0 {
        tree.add_child(shard, StatNode::leaf("store", copy.store_bytes, Some(color)));
    }
    if copy.translog_bytes > 0 {
        tree.add_child(
            shard,
            StatNode::leaf("translog", copy.translog_bytes, Some(color)),
        );
    }
}

/// Build the segment memory tree: cluster → node (heap max as total) → shard.
pub fn build_segment_tree<H: HueSource>(
    diagnostics: &Diagnostics,
    colors: &mut ColorAssigner<H>,
) -> Result<StatTree> {
    let mut tree = StatTree::new(ROOT_LABEL);

    for (node_id, paths) in group_shards(diagnostics) {
        let info = node_info(diagnostics, node_id)?;
        let node = tree.add_child(
            tree.root,
            StatNode::container(&info.name, Some(info.heap_max_in_bytes)),
        );

        for copy in paths.values().flatten() {
            if copy.segment_memory_bytes == 0 {
                continue;
            }
            let color = colors.color_for_index(&copy.index);
            tree.add_child(
                node,
                StatNode::leaf(&copy.descriptor(), copy.segment_memory_bytes, Some(color)),
            );
        }
    }

    tracing::info!(
        "Segment memory tree built: {} nodes, {} leaves",
        tree.len(),
        tree.leaves().count()
    );
    Ok(tree)
}
