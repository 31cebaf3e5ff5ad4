//! Search tree with arena allocation.
//!
//! Nodes live in a contiguous `Vec` and reference each other by `NodeId`
//! indices: children are owned by the arena, the child-to-parent link is a
//! plain index, so there is no ownership cycle and the whole tree is freed
//! at once when the decision is made.

use game_core::JointAction;

use crate::node::{NodeId, SearchNode};

/// UCT tree with arena-based node storage. Built fresh for every top-level
/// decision; nothing is carried over between decisions.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    root: NodeId,
}

impl SearchTree {
    /// Create a tree containing only a fresh root.
    pub fn new() -> Self {
        Self {
            nodes: vec![SearchNode::new_root()],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a child for an enumerated joint action, with zero visits and its
    /// precomputed heuristic bias. Returns the new child's ID.
    pub fn add_child(&mut self, parent: NodeId, action: JointAction, bias: f64) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new_child(parent, action, bias));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Backpropagate a completed rollout's score differential from a leaf to
    /// the root: every node on the path gains one visit and the full value.
    /// No decay, no depth weighting, no sign flips: the value is already a
    /// two-sided differential from the searching player's point of view.
    pub fn backpropagate(&mut self, leaf: NodeId, value: f64) {
        let mut current = leaf;
        while current.is_some() {
            let node = self.get_mut(current);
            node.visit_count += 1;
            node.win_sum += value;
            current = node.parent;
        }
    }

    /// The root child with the highest empirical mean, exploitation only:
    /// zero-visit children count as 0.0 and ties go to the earliest child in
    /// enumeration order. Returns `None` for an unexpanded root.
    pub fn best_child(&self) -> Option<NodeId> {
        let root = self.get(self.root);
        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &root.children {
            let mean = self.get(child_id).mean_value();
            match best {
                Some((_, best_mean)) if mean <= best_mean => {}
                _ => best = Some((child_id, mean)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Statistics about the tree for logging and debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_children: root.children.len(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        node.children
            .iter()
            .map(|&id| self.compute_max_depth(id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_children: usize,
    pub max_depth: u32,
}
