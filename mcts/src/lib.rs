//! Anytime Monte Carlo tree search for fleet decisions.
//!
//! Given a root position, [`UctSearch::decide`] (or the [`run_search`]
//! convenience) runs as many four-phase iterations as the wall-clock budget
//! allows and returns the joint action with the best empirical mean:
//!
//! 1. **Selection**: descend through expanded nodes by UCT score,
//!    replaying each edge on a scratch simulator clone; edges that are
//!    illegal under the replayed line score negative infinity.
//! 2. **Expansion**: add one layer of children from the joint-action
//!    enumerator, each carrying a static heuristic bias.
//! 3. **Rollout**: play the position out, the searching side moving by a
//!    greedy deposit-then-collect policy and the adversary by the supplied
//!    opponent model.
//! 4. **Backpropagation**: add the final score differential and one visit
//!    to every node on the path. No negation: the differential is already
//!    two-sided.
//!
//! The deadline is polled in every phase, so a decision always returns in
//! budget; an iteration caught mid-flight is discarded whole.
//!
//! ```no_run
//! use game_core::{Player, Scenario, Simulator};
//! use mcts::{run_search, SearchConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scenario = Scenario::from_toml_str(
//!     r#"
//!     map = ["SSIS", "BSSS"]
//!     base = [1, 0]
//!     turns_to_go = 100
//!
//!     [pirate_ships.pirate_ship_1]
//!     location = [1, 0]
//!     capacity = 2
//!     player = 1
//!
//!     [treasures.treasure_1]
//!     location = [0, 2]
//!     reward = 4
//!     "#,
//! )?;
//! let (map, state) = scenario.build()?;
//! let sim = Simulator::new(map, state);
//!
//! let result = run_search(&sim, Player::One, SearchConfig::default(), 42)?;
//! println!("{} (value {:.2})", result.action, result.value);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod search;
pub mod tree;

pub use config::SearchConfig;
pub use heuristic::action_bias;
pub use node::{NodeId, SearchNode};
pub use policy::{GreedyPolicy, MovePolicy, RandomPolicy};
pub use search::{run_search, SearchError, SearchResult, UctSearch};
pub use tree::{SearchTree, TreeStats};
