use compact_str::CompactString;

use crate::render::colors::Rgb;

/// Index into the arena `Vec<StatNode>`. Uses u32 to save memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node is: a sized leaf or a container of other nodes.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A leaf always carries its own byte total.
    Leaf { total: u64, color: Option<Rgb> },
    /// A container may carry an external total (disk capacity, heap max) that
    /// exceeds what its children occupy.
    Container {
        total: Option<u64>,
        children: Vec<NodeId>,
    },
}

/// A single node in a stats tree, stored in a flat arena.
#[derive(Debug, Clone)]
pub struct StatNode {
    /// Node name, data path, shard descriptor or component ("store", "translog")
    pub label: CompactString,
    pub kind: NodeKind,
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,
    /// Depth in the tree (root = 0)
    pub depth: u16,
    /// Effective size: explicit total if present, else sum of children. Set by aggregation.
    pub size: u64,
    /// Sum of children's sizes (containers only). Set by aggregation.
    pub children_size: Option<u64>,
}

impl StatNode {
    pub fn leaf(label: &str, total: u64, color: Option<Rgb>) -> Self {
        Self::with_kind(label, NodeKind::Leaf { total, color })
    }

    pub fn container(label: &str, total: Option<u64>) -> Self {
        Self::with_kind(
            label,
            NodeKind::Container {
                total,
                children: Vec::new(),
            },
        )
    }

    fn with_kind(label: &str, kind: NodeKind) -> Self {
        StatNode {
            label: CompactString::new(label),
            kind,
            parent: None,
            depth: 0, // will be set by add_child
            size: 0,
            children_size: None,
        }
    }

    /// The explicit byte total, if this node carries one.
    pub fn total(&self) -> Option<u64> {
        match self.kind {
            NodeKind::Leaf { total, .. } => Some(total),
            NodeKind::Container { total, .. } => total,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Leaf { .. } => &[],
            NodeKind::Container { children, .. } => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }
}

/// A stats tree stored as a flat arena of nodes.
#[derive(Debug, Clone)]
pub struct StatTree {
    /// All nodes in contiguous memory
    pub nodes: Vec<StatNode>,
    /// Root node index
    pub root: NodeId,
}

impl StatTree {
    /// Create a tree holding only a root container.
    pub fn new(root_label: &str) -> Self {
        StatTree {
            nodes: vec![StatNode::container(root_label, None)],
            root: NodeId(0),
        }
    }

    /// Add a child node under the given container. Returns the new node's ID.
    ///
    /// Children keep insertion order and always get a higher index than their parent.
    pub fn add_child(&mut self, parent: NodeId, mut node: StatNode) -> NodeId {
        let new_id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        node.depth = self.nodes[parent.index()].depth + 1;

        let parent_node = &mut self.nodes[parent.index()];
        match &mut parent_node.kind {
            NodeKind::Container { children, .. } => children.push(new_id),
            NodeKind::Leaf { .. } => panic!(
                "cannot add '{}' under leaf '{}'",
                node.label, parent_node.label
            ),
        }

        self.nodes.push(node);
        new_id
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &StatNode {
        &self.nodes[id.index()]
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over children of a node, in insertion order.
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(parent).children().iter().copied()
    }

    /// Find a direct child by label.
    pub fn find_child(&self, parent: NodeId, label: &str) -> Option<NodeId> {
        self.children(parent).find(|&id| self.get(id).label == label)
    }

    /// All leaves in arena order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32)
            .map(NodeId)
            .filter(|&id| self.get(id).is_leaf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_links_parent_and_depth() {
        let mut tree = StatTree::new("cluster");
        let node = tree.add_child(tree.root, StatNode::container("node-a", Some(10)));
        let leaf = tree.add_child(node, StatNode::leaf("store", 4, None));

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get(leaf).parent, Some(node));
        assert_eq!(tree.get(leaf).depth, 2);
        assert_eq!(tree.children(tree.root).collect::<Vec<_>>(), vec![node]);
        assert_eq!(tree.find_child(node, "store"), Some(leaf));
        assert_eq!(tree.leaves().collect::<Vec<_>>(), vec![leaf]);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = StatTree::new("cluster");
        let a = tree.add_child(tree.root, StatNode::leaf("a", 1, None));
        let b = tree.add_child(tree.root, StatNode::leaf("b", 2, None));
        let c = tree.add_child(tree.root, StatNode::leaf("c", 3, None));
        assert_eq!(tree.children(tree.root).collect::<Vec<_>>(), vec![a, b, c]);
    }

    #[test]
    fn total_reflects_kind() {
        assert_eq!(StatNode::leaf("x", 7, None).total(), Some(7));
        assert_eq!(StatNode::container("y", None).total(), None);
        assert_eq!(StatNode::container("z", Some(9)).total(), Some(9));
    }

    #[test]
    #[should_panic]
    fn leaves_cannot_have_children() {
        let mut tree = StatTree::new("cluster");
        let leaf = tree.add_child(tree.root, StatNode::leaf("store", 1, None));
        tree.add_child(leaf, StatNode::leaf("nested", 1, None));
    }
}
