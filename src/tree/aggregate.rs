use super::arena::{NodeKind, StatTree};

/// Compute `size` and `children_size` for every node (bottom-up).
///
/// Containers get `children_size` = sum of their children's sizes. Every node's
/// `size` is its explicit total when it has one, otherwise `children_size`. A total
/// smaller than `children_size` is kept as-is.
pub fn aggregate_sizes(tree: &mut StatTree) {
    // Children always have higher indices than their parents (add_child appends),
    // so walking the arena backwards visits children first.
    let len = tree.nodes.len();
    for i in (0..len).rev() {
        let (total, children_size) = match &tree.nodes[i].kind {
            NodeKind::Leaf { total, .. } => (Some(*total), None),
            NodeKind::Container { total, children } => {
                let sum: u64 = children
                    .iter()
                    .map(|child| tree.nodes[child.index()].size)
                    .sum();
                (*total, Some(sum))
            }
        };

        let node = &mut tree.nodes[i];
        node.children_size = children_size;
        node.size = total.or(children_size).unwrap_or(0);
    }
}
