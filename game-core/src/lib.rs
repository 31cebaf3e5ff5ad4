//! World model for the pirates grid game.
//!
//! This crate holds everything the search engine treats as "the game":
//!
//! - [`map`]: the static terrain grid and the precomputed [`AdjacencyIndex`]
//! - [`state`]: ships, treasures, marine patrols, scores
//! - [`action`]: atomic per-ship actions and simultaneous [`JointAction`]s
//! - [`enumerate`]: per-ship candidate generation plus the joint cross-product
//! - [`legality`]: the pure joint-action predicate
//! - [`sim`]: the deterministic transition engine ([`Simulator`])
//! - [`scenario`]: serde loading of the episode input schema
//!
//! The simulator is a cloneable value; search code clones it per descent so
//! scratch state never aliases tree state.

pub mod action;
pub mod enumerate;
pub mod legality;
pub mod map;
pub mod scenario;
pub mod sim;
pub mod state;

pub use action::{AtomicAction, JointAction};
pub use enumerate::enumerate_joint_actions;
pub use legality::is_joint_action_legal;
pub use map::{AdjacencyIndex, Coord, GameMap, MapError, Terrain};
pub use scenario::{Scenario, ScenarioError};
pub use sim::{SimError, Simulator};
pub use state::{
    GameState, MarineShip, Player, PirateShip, ShipId, Treasure, TreasureId, TreasureLocation,
};
