use super::definition::{DesignForest, DesignNode};

/// One entry in a flattened forest.
#[derive(Debug, Clone, Copy)]
pub struct IndexedNode<'a> {
    pub node: &'a DesignNode,
    pub parent: Option<usize>,
    pub depth: usize,
}

/// A pre-order flattening of a `DesignForest` with parent links, so callers can
/// walk from any node up to its root without the tree holding back-references.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex<'a> {
    entries: Vec<IndexedNode<'a>>,
}

impl<'a> NodeIndex<'a> {
    pub fn build(forest: &'a DesignForest) -> Self {
        let mut entries = Vec::with_capacity(forest.roots.iter().map(DesignNode::subtree_size).sum());
        for root in &forest.roots {
            Self::push(root, None, 0, &mut entries);
        }
        Self { entries }
    }

    fn push(node: &'a DesignNode, parent: Option<usize>, depth: usize, entries: &mut Vec<IndexedNode<'a>>) {
        let index = entries.len();
        entries.push(IndexedNode { node, parent, depth });
        for child in &node.children {
            Self::push(child, Some(index), depth + 1, entries);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IndexedNode<'a>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &IndexedNode<'a>)> {
        self.entries.iter().enumerate()
    }

    /// Ancestors of the node at `index`, nearest first.
    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = &'a DesignNode> + '_ {
        let mut current = self.entries.get(index).and_then(|e| e.parent);
        std::iter::from_fn(move || {
            let entry = self.entries.get(current?)?;
            current = entry.parent;
            Some(entry.node)
        })
    }
}
