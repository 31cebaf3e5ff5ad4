//! Anytime UCT search driver.
//!
//! Runs the four-phase loop (selection, expansion, rollout,
//! backpropagation) against a cloned simulator until the wall-clock budget
//! is spent, then picks the root child with the best empirical mean. The
//! deadline is polled in every phase; an iteration interrupted by the
//! deadline is discarded whole, so the tree only ever holds statistics from
//! completed rollouts.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use game_core::{
    enumerate_joint_actions, is_joint_action_legal, JointAction, Player, SimError, Simulator,
};

use crate::config::SearchConfig;
use crate::heuristic::action_bias;
use crate::node::NodeId;
use crate::policy::{GreedyPolicy, MovePolicy};
use crate::tree::SearchTree;

/// Errors raised by a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The deadline passed mid-iteration. Internal: `decide` absorbs this
    /// by dropping the partial iteration and returning what it has.
    #[error("decision budget exhausted mid-iteration")]
    BudgetExhausted,

    /// The root position yields no joint action to choose from. Callers can
    /// fall back to [`UctSearch::fallback_action`].
    #[error("no joint action available at the root")]
    DegenerateRoot,

    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Outcome of one top-level decision.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen joint action.
    pub action: JointAction,
    /// Empirical mean score differential of the chosen root child.
    pub value: f64,
    /// Completed rollouts through the chosen root child.
    pub visits: u32,
    /// Completed rollouts overall.
    pub simulations: u32,
    /// Wall-clock time the decision took.
    pub elapsed: Duration,
}

/// One-decision UCT searcher for a player.
///
/// Holds an immutable copy of the root position; every iteration clones it
/// and replays the tree path on the clone, so the root snapshot is never
/// mutated. The opponent model supplies every adversary ply, during descent
/// and rollout alike; the searching side rolls out with the greedy policy.
pub struct UctSearch<P: MovePolicy> {
    base: Simulator,
    player: Player,
    config: SearchConfig,
    opponent: P,
    rollout_policy: GreedyPolicy,
    tree: SearchTree,
}

impl UctSearch<GreedyPolicy> {
    /// Searcher with the default greedy opponent model.
    pub fn new(sim: &Simulator, player: Player, config: SearchConfig) -> Self {
        Self::with_opponent(sim, player, config, GreedyPolicy::new())
    }
}

impl<P: MovePolicy> UctSearch<P> {
    /// Searcher with a caller-supplied opponent model.
    pub fn with_opponent(sim: &Simulator, player: Player, config: SearchConfig, opponent: P) -> Self {
        Self {
            base: sim.clone(),
            player,
            config,
            opponent,
            rollout_policy: GreedyPolicy::new(),
            tree: SearchTree::new(),
        }
    }

    /// The tree built by the most recent `decide` call.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// All-waits joint action for the root position, the safe answer when
    /// the search itself cannot produce one.
    pub fn fallback_action(&self) -> JointAction {
        JointAction::all_wait(self.base.state(), self.player)
    }

    /// Run the anytime loop and pick a joint action for the root position.
    ///
    /// The root is expanded before the loop starts, so even a zero budget
    /// yields a legal (if unsearched) choice. The final pick is exploitation
    /// only: highest mean among root children, unvisited children count as
    /// 0.0, ties go to the first in enumeration order.
    pub fn decide(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        let started = Instant::now();
        let deadline = started + self.config.decision_budget;

        self.tree = SearchTree::new();
        let base = self.base.clone();
        self.expand(self.tree.root(), &base);

        let mut simulations: u32 = 0;
        loop {
            if Instant::now() >= deadline {
                break;
            }
            if let Some(cap) = self.config.max_simulations {
                if simulations >= cap {
                    break;
                }
            }
            match self.run_iteration(deadline, rng) {
                Ok(()) => simulations += 1,
                Err(SearchError::BudgetExhausted) => break,
                Err(err) => return Err(err),
            }
        }

        let best = self.tree.best_child().ok_or(SearchError::DegenerateRoot)?;
        let chosen = self.tree.get(best);
        let action = chosen
            .action
            .clone()
            .ok_or(SearchError::DegenerateRoot)?;
        let value = chosen.mean_value();
        let visits = chosen.visit_count;

        let stats = self.tree.stats();
        debug!(
            simulations,
            nodes = stats.total_nodes,
            depth = stats.max_depth,
            visits,
            value,
            elapsed_ms = started.elapsed().as_millis() as u64,
            %action,
            "decision made"
        );

        Ok(SearchResult {
            action,
            value,
            visits,
            simulations,
            elapsed: started.elapsed(),
        })
    }

    /// One selection-expansion-rollout-backpropagation pass.
    fn run_iteration(
        &mut self,
        deadline: Instant,
        rng: &mut ChaCha20Rng,
    ) -> Result<(), SearchError> {
        let mut sim = self.base.clone();
        let mut node = self.tree.root();

        // Selection: descend through expanded nodes, replaying each edge on
        // the scratch simulator so legality tracks the actual line of play.
        while self.tree.get(node).is_expanded() {
            if Instant::now() >= deadline {
                return Err(SearchError::BudgetExhausted);
            }
            let Some((child, action)) = self.select_child(node, &sim) else {
                // Every stored edge is illegal under this line's state.
                let value = sim.state().score_differential(self.player) as f64;
                self.tree.backpropagate(node, value);
                return Ok(());
            };
            self.step(&mut sim, &action, rng)?;
            node = child;
        }

        // A leaf past the horizon is scored as it stands.
        if sim.state().is_over() {
            let value = sim.state().score_differential(self.player) as f64;
            self.tree.backpropagate(node, value);
            return Ok(());
        }

        // Expansion: grow one layer, then rollout from the first pick.
        self.expand(node, &sim);
        trace!(node = node.0, children = self.tree.get(node).children.len(), "expanded");
        let Some((child, action)) = self.select_child(node, &sim) else {
            let value = sim.state().score_differential(self.player) as f64;
            self.tree.backpropagate(node, value);
            return Ok(());
        };
        self.step(&mut sim, &action, rng)?;
        let value = self.rollout(&mut sim, deadline, rng)?;
        self.tree.backpropagate(child, value);
        Ok(())
    }

    /// Add a child per enumerated joint action, each carrying its static
    /// heuristic bias.
    fn expand(&mut self, node: NodeId, sim: &Simulator) {
        for joint in enumerate_joint_actions(sim, self.player) {
            let bias = action_bias(&joint);
            self.tree.add_child(node, joint, bias);
        }
    }

    /// Highest-UCT child whose edge action is legal in the current scratch
    /// state. Illegal edges score negative infinity and are skipped, so they
    /// can never beat a finite-scored sibling; ties keep the earliest child.
    /// `None` when no stored edge is legal.
    fn select_child(&self, parent: NodeId, sim: &Simulator) -> Option<(NodeId, JointAction)> {
        let parent_node = self.tree.get(parent);
        let parent_visits = parent_node.visit_count;
        let mut best: Option<(NodeId, &JointAction, f64)> = None;
        for &child_id in &parent_node.children {
            let child = self.tree.get(child_id);
            let Some(action) = &child.action else {
                continue;
            };
            let legal = is_joint_action_legal(sim, action, self.player);
            let score = child.uct_score(
                parent_visits,
                self.config.exploration,
                self.config.unvisited_bonus,
                legal,
            );
            if score == f64::NEG_INFINITY {
                continue;
            }
            match best {
                Some((_, _, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, action, score)),
            }
        }
        best.map(|(id, action, _)| (id, action.clone()))
    }

    /// Advance one simultaneous ply: our action, the modeled opponent reply,
    /// then the environment step.
    fn step(
        &mut self,
        sim: &mut Simulator,
        action: &JointAction,
        rng: &mut ChaCha20Rng,
    ) -> Result<(), SearchError> {
        sim.apply_action(action, self.player)?;
        if let Some(reply) = self
            .opponent
            .choose_move(sim, self.player.opponent(), rng)
        {
            sim.apply_action(&reply, self.player.opponent())?;
        }
        sim.advance_environment();
        Ok(())
    }

    /// Play the position out to the end of the episode and return the final
    /// score differential. The searching side moves by the greedy policy;
    /// adversary plies come from the opponent model, same as during descent.
    fn rollout(
        &mut self,
        sim: &mut Simulator,
        deadline: Instant,
        rng: &mut ChaCha20Rng,
    ) -> Result<f64, SearchError> {
        while !sim.state().is_over() {
            if Instant::now() >= deadline {
                return Err(SearchError::BudgetExhausted);
            }
            if let Some(mine) = self.rollout_policy.choose_move(sim, self.player, rng) {
                sim.apply_action(&mine, self.player)?;
            }
            if let Some(reply) = self
                .opponent
                .choose_move(sim, self.player.opponent(), rng)
            {
                sim.apply_action(&reply, self.player.opponent())?;
            }
            sim.advance_environment();
        }
        Ok(sim.state().score_differential(self.player) as f64)
    }
}

/// Run a single decision with the default greedy opponent model and a seeded
/// generator. The entry point game harnesses call once per turn.
pub fn run_search(
    sim: &Simulator,
    player: Player,
    config: SearchConfig,
    seed: u64,
) -> Result<SearchResult, SearchError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut search = UctSearch::new(sim, player, config);
    search.decide(&mut rng)
}
