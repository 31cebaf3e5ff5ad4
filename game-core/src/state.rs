//! Mutable game state: ships, treasures, marine patrols, scores.
//!
//! `GameState` is a plain value owned exclusively by whichever simulation
//! context holds it. The immutable map is deliberately *not* part of the
//! state so that scratch copies made during search descent stay cheap.

use std::fmt;

use crate::map::Coord;

/// Index of a pirate ship in `GameState::ships`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(pub u8);

/// Index of a treasure in `GameState::treasures`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreasureId(pub u8);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ship_{}", self.0)
    }
}

impl fmt::Display for TreasureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "treasure_{}", self.0)
    }
}

/// One of the two competing fleets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays such as the score table.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Parse the 1-based player number used by the input schema.
    pub fn from_number(number: u8) -> Option<Player> {
        match number {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

/// A pirate ship. `capacity` is the *remaining* number of treasures the ship
/// can still take aboard, not the hull size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PirateShip {
    pub location: Coord,
    pub capacity: u8,
    pub owner: Player,
}

/// Where a treasure currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreasureLocation {
    /// On the board at a cell (usually an island).
    Cell(Coord),
    /// Aboard a pirate ship.
    Aboard(ShipId),
    /// Deposited at the base this ply; respawns at its home cell when the
    /// environment advances.
    Deposited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Treasure {
    pub location: TreasureLocation,
    pub reward: i64,
    /// Spawn cell the treasure returns to after a deposit or a marine
    /// collision.
    pub home: Coord,
}

/// A marine hazard patrolling a fixed path, advancing one step per ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarineShip {
    pub path: Vec<Coord>,
    pub index: usize,
}

impl MarineShip {
    #[inline]
    pub fn location(&self) -> Coord {
        self.path[self.index]
    }

    /// Advance one step along the patrol, wrapping at the end.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.path.len();
    }
}

/// Complete mutable game state.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub ships: Vec<PirateShip>,
    pub treasures: Vec<Treasure>,
    pub marines: Vec<MarineShip>,
    /// Cumulative deposited rewards, indexed by `Player::index`.
    pub scores: [i64; 2],
    /// Remaining plies (two plies, one per player, compose one game turn).
    pub turns_left: u32,
}

impl GameState {
    #[inline]
    pub fn ship(&self, id: ShipId) -> &PirateShip {
        &self.ships[id.0 as usize]
    }

    #[inline]
    pub fn ship_mut(&mut self, id: ShipId) -> &mut PirateShip {
        &mut self.ships[id.0 as usize]
    }

    #[inline]
    pub fn treasure(&self, id: TreasureId) -> &Treasure {
        &self.treasures[id.0 as usize]
    }

    #[inline]
    pub fn treasure_mut(&mut self, id: TreasureId) -> &mut Treasure {
        &mut self.treasures[id.0 as usize]
    }

    /// Ships owned by a player, in id order. Id order is the iteration order
    /// used by the enumerator's mutual-exclusion reservation.
    pub fn ships_of(&self, player: Player) -> impl Iterator<Item = (ShipId, &PirateShip)> {
        self.ships
            .iter()
            .enumerate()
            .filter(move |(_, ship)| ship.owner == player)
            .map(|(i, ship)| (ShipId(i as u8), ship))
    }

    /// Treasures currently aboard a ship, in id order.
    pub fn carried_by(&self, ship: ShipId) -> impl Iterator<Item = (TreasureId, &Treasure)> {
        self.treasures
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.location == TreasureLocation::Aboard(ship))
            .map(|(i, t)| (TreasureId(i as u8), t))
    }

    /// Whether the episode has run out of plies.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.turns_left == 0
    }

    /// Score differential from `player`'s point of view.
    #[inline]
    pub fn score_differential(&self, player: Player) -> i64 {
        self.scores[player.index()] - self.scores[player.opponent().index()]
    }
}
