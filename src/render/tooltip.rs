use crate::tree::arena::{NodeId, StatTree};

/// Separator between ancestor labels in hover titles.
pub const PATH_SEPARATOR: &str = " -> ";

/// Format bytes into human-readable size string.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;
    const TB: u64 = 1024 * GB;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Breadcrumb of a node: its ancestors' labels from the root down, then its own.
pub fn build_path(tree: &StatTree, node_id: NodeId) -> String {
    let mut parts = Vec::new();
    let mut current = Some(node_id);

    while let Some(id) = current {
        let node = tree.get(id);
        parts.push(node.label.as_str());
        current = node.parent;
    }

    parts.reverse();
    parts.join(PATH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::arena::StatNode;

    #[test]
    fn breadcrumb_joins_ancestors() {
        let mut tree = StatTree::new("cluster");
        let node = tree.add_child(tree.root, StatNode::container("nodeA", None));
        let path = tree.add_child(node, StatNode::container("/data", Some(10)));
        let shard = tree.add_child(path, StatNode::container("[logs-2023][0]", None));
        let store = tree.add_child(shard, StatNode::leaf("store", 3, None));

        assert_eq!(
            build_path(&tree, store),
            "cluster -> nodeA -> /data -> [logs-2023][0] -> store"
        );
        assert_eq!(build_path(&tree, tree.root), "cluster");
    }

    #[test]
    fn sizes_pick_a_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.00 GB");
    }
}
