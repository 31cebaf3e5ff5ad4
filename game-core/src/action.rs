//! Atomic and joint actions.
//!
//! A joint action carries exactly one atomic action per ship the acting
//! player owns. Ordering is the enumerator's insertion order; it has no
//! semantic meaning beyond being stable for hashing and equality.

use std::fmt;

use crate::map::Coord;
use crate::state::{GameState, Player, ShipId, TreasureId};

/// A single ship's order for one ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomicAction {
    /// Move to an adjacent passable cell.
    Sail { ship: ShipId, to: Coord },
    /// Take an adjacent treasure aboard.
    Collect { ship: ShipId, treasure: TreasureId },
    /// Unload a carried treasure at the base for its reward.
    Deposit { ship: ShipId, treasure: TreasureId },
    /// Raid a co-located enemy ship's cargo.
    Plunder { ship: ShipId, target: ShipId },
    /// Hold position.
    Wait { ship: ShipId },
}

impl AtomicAction {
    /// The ship executing this action.
    pub fn ship(&self) -> ShipId {
        match *self {
            AtomicAction::Sail { ship, .. }
            | AtomicAction::Collect { ship, .. }
            | AtomicAction::Deposit { ship, .. }
            | AtomicAction::Plunder { ship, .. }
            | AtomicAction::Wait { ship } => ship,
        }
    }

    /// The treasure a `Collect` targets, if any.
    pub fn collected_treasure(&self) -> Option<TreasureId> {
        match *self {
            AtomicAction::Collect { treasure, .. } => Some(treasure),
            _ => None,
        }
    }
}

impl fmt::Display for AtomicAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AtomicAction::Sail { ship, to } => write!(f, "sail {ship} {to}"),
            AtomicAction::Collect { ship, treasure } => write!(f, "collect {ship} {treasure}"),
            AtomicAction::Deposit { ship, treasure } => write!(f, "deposit {ship} {treasure}"),
            AtomicAction::Plunder { ship, target } => write!(f, "plunder {ship} {target}"),
            AtomicAction::Wait { ship } => write!(f, "wait {ship}"),
        }
    }
}

/// One atomic action per owned ship, applied as a single simultaneous ply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JointAction(Vec<AtomicAction>);

impl JointAction {
    pub fn new(actions: Vec<AtomicAction>) -> Self {
        Self(actions)
    }

    /// The no-op fleet order: every owned ship waits. Callers can fall back
    /// to this when the search produced no decision at all.
    pub fn all_wait(state: &GameState, player: Player) -> Self {
        Self(
            state
                .ships_of(player)
                .map(|(id, _)| AtomicAction::Wait { ship: id })
                .collect(),
        )
    }

    #[inline]
    pub fn actions(&self) -> &[AtomicAction] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AtomicAction> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any atomic action matches the predicate.
    pub fn contains_any(&self, predicate: impl Fn(&AtomicAction) -> bool) -> bool {
        self.0.iter().any(predicate)
    }
}

impl<'a> IntoIterator for &'a JointAction {
    type Item = &'a AtomicAction;
    type IntoIter = std::slice::Iter<'a, AtomicAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for JointAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, action) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{action}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PirateShip;

    #[test]
    fn test_atomic_ship_accessor() {
        let sail = AtomicAction::Sail {
            ship: ShipId(3),
            to: Coord::new(1, 1),
        };
        assert_eq!(sail.ship(), ShipId(3));
        assert_eq!(sail.collected_treasure(), None);

        let collect = AtomicAction::Collect {
            ship: ShipId(0),
            treasure: TreasureId(2),
        };
        assert_eq!(collect.collected_treasure(), Some(TreasureId(2)));
    }

    #[test]
    fn test_all_wait_covers_owned_fleet() {
        let state = GameState {
            ships: vec![
                PirateShip {
                    location: Coord::new(0, 0),
                    capacity: 2,
                    owner: Player::One,
                },
                PirateShip {
                    location: Coord::new(0, 0),
                    capacity: 2,
                    owner: Player::Two,
                },
                PirateShip {
                    location: Coord::new(0, 0),
                    capacity: 2,
                    owner: Player::One,
                },
            ],
            treasures: Vec::new(),
            marines: Vec::new(),
            scores: [0, 0],
            turns_left: 4,
        };
        let wait = JointAction::all_wait(&state, Player::One);
        assert_eq!(
            wait.actions(),
            &[
                AtomicAction::Wait { ship: ShipId(0) },
                AtomicAction::Wait { ship: ShipId(2) }
            ]
        );
    }

    #[test]
    fn test_joint_action_equality_is_order_sensitive() {
        let a = JointAction::new(vec![
            AtomicAction::Wait { ship: ShipId(0) },
            AtomicAction::Wait { ship: ShipId(1) },
        ]);
        let b = JointAction::new(vec![
            AtomicAction::Wait { ship: ShipId(1) },
            AtomicAction::Wait { ship: ShipId(0) },
        ]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
