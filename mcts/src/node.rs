//! Search tree node representation.
//!
//! Each node represents the game state reached by playing its edge action
//! from the parent. Nodes store the visit statistics used for UCT selection
//! and for the final exploitation-only decision.

use game_core::JointAction;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the UCT search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Parent node index (NONE for the root). Non-owning back-reference;
    /// the arena owns every node.
    pub parent: NodeId,

    /// Joint action that led to this node from the parent (None for root).
    pub action: Option<JointAction>,

    /// Number of completed backpropagations through this node.
    pub visit_count: u32,

    /// Sum of rollout score differentials backpropagated through this node.
    pub win_sum: f64,

    /// Static heuristic bias of the edge action, fixed at expansion time.
    pub bias: f64,

    /// Child indices, in enumeration order. Empty until expanded.
    pub children: Vec<NodeId>,
}

impl SearchNode {
    /// Create the root node for a fresh decision.
    pub fn new_root() -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            visit_count: 0,
            win_sum: 0.0,
            bias: 0.0,
            children: Vec::new(),
        }
    }

    /// Create a child node for an enumerated joint action.
    pub fn new_child(parent: NodeId, action: JointAction, bias: f64) -> Self {
        Self {
            parent,
            action: Some(action),
            visit_count: 0,
            win_sum: 0.0,
            bias,
            children: Vec::new(),
        }
    }

    /// Empirical mean `win_sum / visits`; 0.0 if never visited. This is the
    /// exploitation-only statistic used for the final decision.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.win_sum / self.visit_count as f64
        }
    }

    /// UCT selection score given the parent's visit count.
    ///
    /// Illegal edges score negative infinity so they are never chosen while
    /// a legal sibling exists. Unvisited legal edges get a large constant
    /// plus the heuristic bias, guaranteeing every untried move is sampled
    /// once while preferring heuristically promising ones among ties. Visited
    /// edges get biased-mean exploitation plus the UCB1 confidence term.
    pub fn uct_score(
        &self,
        parent_visits: u32,
        exploration: f64,
        unvisited_bonus: f64,
        legal: bool,
    ) -> f64 {
        if !legal {
            return f64::NEG_INFINITY;
        }
        if self.visit_count == 0 {
            return unvisited_bonus + self.bias;
        }
        let n = self.visit_count as f64;
        let exploit = (self.win_sum + self.bias) / n;
        let explore = exploration * ((parent_visits.max(1) as f64).ln() / n).sqrt();
        exploit + explore
    }

    /// Whether this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }
}
