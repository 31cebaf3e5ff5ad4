//! Deterministic world simulator.
//!
//! Applies joint actions, advances marine patrols, resolves collisions and
//! respawns treasures. The simulator is a value: search code clones it per
//! descent so scratch copies never alias the tree's stored states. The map
//! and adjacency index are shared behind `Arc`, so clones are cheap.

use std::sync::Arc;

use crate::action::{AtomicAction, JointAction};
use crate::legality::is_joint_action_legal;
use crate::map::{AdjacencyIndex, Coord, GameMap};
use crate::state::{GameState, Player, ShipId, TreasureLocation};

/// Errors raised at the simulator boundary.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A joint action failed the legality check. Well-behaved callers never
    /// see this: the enumerator only yields locally-valid candidates and the
    /// search scores dynamically-illegal edges out instead of applying them.
    #[error("illegal joint action for {player}: {action}")]
    IllegalAction {
        player: Player,
        action: JointAction,
    },
}

/// The world-state transition engine.
#[derive(Debug, Clone)]
pub struct Simulator {
    map: Arc<GameMap>,
    adjacency: Arc<AdjacencyIndex>,
    state: GameState,
}

impl Simulator {
    /// Build a simulator for an episode, precomputing the adjacency index.
    pub fn new(map: Arc<GameMap>, state: GameState) -> Self {
        let adjacency = Arc::new(AdjacencyIndex::build(&map));
        Self {
            map,
            adjacency,
            state,
        }
    }

    /// Build a simulator reusing an already-built adjacency index.
    pub fn with_adjacency(
        map: Arc<GameMap>,
        adjacency: Arc<AdjacencyIndex>,
        state: GameState,
    ) -> Self {
        Self {
            map,
            adjacency,
            state,
        }
    }

    #[inline]
    pub fn map(&self) -> &GameMap {
        &self.map
    }

    #[inline]
    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    /// Read-only snapshot of the current state.
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Passable neighbors of a cell, from the precomputed index.
    #[inline]
    pub fn neighbors(&self, coord: Coord) -> &[Coord] {
        self.adjacency.neighbors(coord)
    }

    /// Cumulative scores, indexed by `Player::index`.
    #[inline]
    pub fn scores(&self) -> [i64; 2] {
        self.state.scores
    }

    /// Replace the held state, keeping the shared map and adjacency. Used to
    /// rebuild the root context at the start of each top-level decision.
    pub fn reset_to(&mut self, state: GameState) {
        self.state = state;
    }

    /// Apply one player's joint action, mutating the held state.
    ///
    /// The action is validated first; an illegal action leaves the state
    /// untouched and reports `SimError::IllegalAction`.
    pub fn apply_action(&mut self, joint: &JointAction, player: Player) -> Result<(), SimError> {
        if !is_joint_action_legal(self, joint, player) {
            return Err(SimError::IllegalAction {
                player,
                action: joint.clone(),
            });
        }

        for action in joint {
            match *action {
                AtomicAction::Sail { ship, to } => {
                    self.state.ship_mut(ship).location = to;
                }
                AtomicAction::Collect { ship, treasure } => {
                    self.state.treasure_mut(treasure).location = TreasureLocation::Aboard(ship);
                    self.state.ship_mut(ship).capacity -= 1;
                }
                AtomicAction::Deposit { ship, treasure } => {
                    let reward = self.state.treasure(treasure).reward;
                    self.state.scores[player.index()] += reward;
                    self.state.treasure_mut(treasure).location = TreasureLocation::Deposited;
                    self.state.ship_mut(ship).capacity += 1;
                }
                AtomicAction::Plunder { ship, target } => {
                    self.plunder(ship, target);
                }
                AtomicAction::Wait { .. } => {}
            }
        }
        Ok(())
    }

    /// Transfer the target's cargo to the plunderer up to its remaining
    /// capacity; cargo that does not fit respawns at its home cell.
    fn plunder(&mut self, ship: ShipId, target: ShipId) {
        let loot: Vec<usize> = self
            .state
            .treasures
            .iter()
            .enumerate()
            .filter(|(_, t)| t.location == TreasureLocation::Aboard(target))
            .map(|(i, _)| i)
            .collect();

        for index in loot {
            self.state.ship_mut(target).capacity += 1;
            if self.state.ship(ship).capacity > 0 {
                self.state.treasures[index].location = TreasureLocation::Aboard(ship);
                self.state.ship_mut(ship).capacity -= 1;
            } else {
                let home = self.state.treasures[index].home;
                self.state.treasures[index].location = TreasureLocation::Cell(home);
            }
        }
    }

    /// Advance the environment after one simultaneous ply (both players have
    /// acted): resolve marine collisions, move the patrols, respawn deposited
    /// treasures, and consume the two plies from the turn budget.
    pub fn advance_environment(&mut self) {
        self.resolve_marine_collisions();
        self.move_marines();
        self.respawn_treasures();
        self.state.turns_left = self.state.turns_left.saturating_sub(2);
    }

    /// A pirate sharing a cell with a marine loses its cargo: every carried
    /// treasure returns to its home cell and the ship's capacity is restored.
    fn resolve_marine_collisions(&mut self) {
        let marine_cells: Vec<Coord> = self.state.marines.iter().map(|m| m.location()).collect();
        for ship_index in 0..self.state.ships.len() {
            let location = self.state.ships[ship_index].location;
            if !marine_cells.contains(&location) {
                continue;
            }
            let ship = ShipId(ship_index as u8);
            for treasure in &mut self.state.treasures {
                if treasure.location == TreasureLocation::Aboard(ship) {
                    treasure.location = TreasureLocation::Cell(treasure.home);
                    self.state.ships[ship_index].capacity += 1;
                }
            }
        }
    }

    fn move_marines(&mut self) {
        for marine in &mut self.state.marines {
            marine.advance();
        }
    }

    /// Treasures deposited this ply respawn at their home cells.
    fn respawn_treasures(&mut self) {
        for treasure in &mut self.state.treasures {
            if treasure.location == TreasureLocation::Deposited {
                treasure.location = TreasureLocation::Cell(treasure.home);
            }
        }
    }
}
