//! Scenario loading.
//!
//! Deserializes the episode input schema (terrain symbol grid, base cell,
//! ships, treasures, marine patrols, turn counter) from TOML and validates
//! it into a `GameMap` plus initial `GameState`.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::map::{Coord, GameMap, MapError};
use crate::state::{GameState, MarineShip, PirateShip, Player, ShipId, Treasure, TreasureLocation};

/// Errors raised while loading a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error("declared base {0:?} does not match the map's base cell")]
    BaseMismatch([u8; 2]),

    #[error("ship '{name}' has invalid player number {player}")]
    InvalidPlayer { name: String, player: u8 },

    #[error("ship '{name}' location {location:?} is not a passable cell")]
    ImpassableShip { name: String, location: [u8; 2] },

    #[error("treasure '{name}' location {location:?} is out of bounds")]
    TreasureOutOfBounds { name: String, location: [u8; 2] },

    #[error("marine '{name}' has an empty patrol path")]
    EmptyPatrol { name: String },

    #[error("marine '{name}' path index {index} is out of range")]
    PatrolIndexOutOfRange { name: String, index: usize },

    #[error("marine '{name}' patrol cell {cell:?} is out of bounds")]
    PatrolOutOfBounds { name: String, cell: [u8; 2] },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShipSpec {
    pub location: [u8; 2],
    pub capacity: u8,
    pub player: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreasureSpec {
    pub location: [u8; 2],
    pub reward: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarineSpec {
    #[serde(default)]
    pub index: usize,
    pub path: Vec<[u8; 2]>,
}

/// A declarative episode description.
///
/// Named entries are held in ordered maps so that ship and treasure ids are
/// assigned deterministically (sorted by name), which in turn fixes the
/// enumerator's reservation order.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub map: Vec<String>,
    pub base: [u8; 2],
    pub pirate_ships: BTreeMap<String, ShipSpec>,
    #[serde(default)]
    pub treasures: BTreeMap<String, TreasureSpec>,
    #[serde(default)]
    pub marine_ships: BTreeMap<String, MarineSpec>,
    pub turns_to_go: u32,
}

impl Scenario {
    /// Parse a scenario from a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(input)?)
    }

    /// Validate and build the immutable map and the initial state.
    pub fn build(&self) -> Result<(Arc<GameMap>, GameState), ScenarioError> {
        let map = Arc::new(GameMap::from_symbols(&self.map)?);

        let declared = Coord::new(self.base[0], self.base[1]);
        if declared != map.base() {
            return Err(ScenarioError::BaseMismatch(self.base));
        }

        let mut ships = Vec::with_capacity(self.pirate_ships.len());
        for (name, spec) in &self.pirate_ships {
            let location = Coord::new(spec.location[0], spec.location[1]);
            if !map.is_passable(location) {
                return Err(ScenarioError::ImpassableShip {
                    name: name.clone(),
                    location: spec.location,
                });
            }
            let owner = Player::from_number(spec.player).ok_or(ScenarioError::InvalidPlayer {
                name: name.clone(),
                player: spec.player,
            })?;
            ships.push(PirateShip {
                location,
                capacity: spec.capacity,
                owner,
            });
        }

        let mut treasures = Vec::with_capacity(self.treasures.len());
        for (name, spec) in &self.treasures {
            let location = Coord::new(spec.location[0], spec.location[1]);
            if !map.in_bounds(location) {
                return Err(ScenarioError::TreasureOutOfBounds {
                    name: name.clone(),
                    location: spec.location,
                });
            }
            treasures.push(Treasure {
                location: TreasureLocation::Cell(location),
                reward: spec.reward,
                home: location,
            });
        }

        let mut marines = Vec::with_capacity(self.marine_ships.len());
        for (name, spec) in &self.marine_ships {
            if spec.path.is_empty() {
                return Err(ScenarioError::EmptyPatrol { name: name.clone() });
            }
            if spec.index >= spec.path.len() {
                return Err(ScenarioError::PatrolIndexOutOfRange {
                    name: name.clone(),
                    index: spec.index,
                });
            }
            let mut path = Vec::with_capacity(spec.path.len());
            for &cell in &spec.path {
                let coord = Coord::new(cell[0], cell[1]);
                if !map.in_bounds(coord) {
                    return Err(ScenarioError::PatrolOutOfBounds {
                        name: name.clone(),
                        cell,
                    });
                }
                path.push(coord);
            }
            marines.push(MarineShip {
                path,
                index: spec.index,
            });
        }

        debug!(
            ships = ships.len(),
            treasures = treasures.len(),
            marines = marines.len(),
            turns = self.turns_to_go,
            "scenario loaded"
        );

        Ok((
            map,
            GameState {
                ships,
                treasures,
                marines,
                scores: [0, 0],
                turns_left: self.turns_to_go,
            },
        ))
    }

    /// Ships owned by a player, as ids into the built state.
    pub fn ships_of(&self, player: u8) -> Vec<ShipId> {
        self.pirate_ships
            .values()
            .enumerate()
            .filter(|(_, spec)| spec.player == player)
            .map(|(i, _)| ShipId(i as u8))
            .collect()
    }
}
