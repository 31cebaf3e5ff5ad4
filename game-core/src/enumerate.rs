//! Joint-action enumeration.
//!
//! Per-ship candidate generation followed by a deterministic cross-product.
//! The cross-product is exponential in fleet size and candidate count; that
//! is inherent to the problem and bounded by small fleets.

use crate::action::{AtomicAction, JointAction};
use crate::sim::Simulator;
use crate::state::{Player, TreasureId, TreasureLocation};

/// Enumerate every legal joint action for `player` against the simulator's
/// held state.
///
/// Per ship, in id order: one `Sail` per passable neighbor; `Collect` for
/// each adjacent on-board treasure when the ship has spare capacity, with a
/// greedy first-come reservation so two ships never both generate `Collect`
/// for one treasure within a pass; `Deposit` for each carried treasure when
/// at the base; `Plunder` for each co-located enemy; exactly one `Wait`.
pub fn enumerate_joint_actions(sim: &Simulator, player: Player) -> Vec<JointAction> {
    let state = sim.state();
    let base = sim.map().base();

    let mut per_ship: Vec<Vec<AtomicAction>> = Vec::new();
    let mut reserved: Vec<TreasureId> = Vec::new();

    for (ship_id, ship) in state.ships_of(player) {
        let mut candidates = Vec::new();

        for &to in sim.neighbors(ship.location) {
            candidates.push(AtomicAction::Sail { ship: ship_id, to });
        }

        if ship.capacity > 0 {
            for (treasure_id, treasure) in state.treasures.iter().enumerate() {
                let treasure_id = TreasureId(treasure_id as u8);
                if reserved.contains(&treasure_id) {
                    continue;
                }
                if let TreasureLocation::Cell(cell) = treasure.location {
                    if sim.neighbors(cell).contains(&ship.location) {
                        candidates.push(AtomicAction::Collect {
                            ship: ship_id,
                            treasure: treasure_id,
                        });
                        reserved.push(treasure_id);
                    }
                }
            }
        }

        if ship.location == base {
            for (treasure_id, _) in state.carried_by(ship_id) {
                candidates.push(AtomicAction::Deposit {
                    ship: ship_id,
                    treasure: treasure_id,
                });
            }
        }

        for (enemy_id, enemy) in state.ships_of(player.opponent()) {
            if enemy.location == ship.location {
                candidates.push(AtomicAction::Plunder {
                    ship: ship_id,
                    target: enemy_id,
                });
            }
        }

        candidates.push(AtomicAction::Wait { ship: ship_id });
        per_ship.push(candidates);
    }

    cross_product(&per_ship)
}

/// Deterministic cartesian product of the per-ship candidate sets, last axis
/// varying fastest. A fleet of zero ships yields the single empty joint
/// action.
fn cross_product(per_ship: &[Vec<AtomicAction>]) -> Vec<JointAction> {
    let mut total = 1usize;
    for candidates in per_ship {
        debug_assert!(!candidates.is_empty());
        total *= candidates.len();
    }

    let mut joints = Vec::with_capacity(total);
    let mut odometer = vec![0usize; per_ship.len()];
    for _ in 0..total {
        joints.push(JointAction::new(
            odometer
                .iter()
                .zip(per_ship)
                .map(|(&i, candidates)| candidates[i])
                .collect(),
        ));
        for axis in (0..odometer.len()).rev() {
            odometer[axis] += 1;
            if odometer[axis] < per_ship[axis].len() {
                break;
            }
            odometer[axis] = 0;
        }
    }
    joints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legality::is_joint_action_legal;
    use crate::map::{Coord, GameMap};
    use crate::state::{GameState, PirateShip, ShipId, Treasure};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn sim_with(state: GameState) -> Simulator {
        let map = Arc::new(GameMap::from_symbols(&["SSISS", "BSSSS", "SSSSS"]).unwrap());
        Simulator::new(map, state)
    }

    fn ship(location: Coord, owner: Player) -> PirateShip {
        PirateShip {
            location,
            capacity: 2,
            owner,
        }
    }

    fn island_treasure() -> Treasure {
        Treasure {
            location: TreasureLocation::Cell(Coord::new(0, 2)),
            reward: 4,
            home: Coord::new(0, 2),
        }
    }

    #[test]
    fn test_single_ship_candidates() {
        let state = GameState {
            ships: vec![ship(Coord::new(0, 1), Player::One)],
            treasures: vec![island_treasure()],
            marines: Vec::new(),
            scores: [0, 0],
            turns_left: 10,
        };
        let sim = sim_with(state);
        let joints = enumerate_joint_actions(&sim, Player::One);

        // Neighbors of (0, 1): (1, 1) and (0, 0). Plus collect and wait.
        assert_eq!(joints.len(), 4);
        assert!(joints.iter().any(|j| j.contains_any(|a| matches!(
            a,
            AtomicAction::Collect { .. }
        ))));
        assert!(joints
            .iter()
            .any(|j| j.contains_any(|a| matches!(a, AtomicAction::Wait { .. }))));
    }

    #[test]
    fn test_no_duplicate_ship_or_collect_within_joint() {
        let state = GameState {
            ships: vec![
                ship(Coord::new(0, 1), Player::One),
                ship(Coord::new(0, 3), Player::One),
            ],
            treasures: vec![island_treasure()],
            marines: Vec::new(),
            scores: [0, 0],
            turns_left: 10,
        };
        let sim = sim_with(state);

        for joint in enumerate_joint_actions(&sim, Player::One) {
            let ships: HashSet<_> = joint.iter().map(|a| a.ship()).collect();
            assert_eq!(ships.len(), joint.len(), "duplicate ship in {joint}");

            let collected: Vec<_> = joint.iter().filter_map(|a| a.collected_treasure()).collect();
            let unique: HashSet<_> = collected.iter().collect();
            assert_eq!(unique.len(), collected.len(), "double collect in {joint}");
        }
    }

    #[test]
    fn test_mutual_exclusion_reserves_for_first_ship() {
        // Both ships are adjacent to the single treasure; only the first in
        // id order may generate Collect for it.
        let state = GameState {
            ships: vec![
                ship(Coord::new(0, 1), Player::One),
                ship(Coord::new(0, 3), Player::One),
            ],
            treasures: vec![island_treasure()],
            marines: Vec::new(),
            scores: [0, 0],
            turns_left: 10,
        };
        let sim = sim_with(state);
        let joints = enumerate_joint_actions(&sim, Player::One);

        let mut collectors = HashSet::new();
        for joint in &joints {
            for action in joint {
                if action.collected_treasure().is_some() {
                    collectors.insert(action.ship());
                }
            }
        }
        assert_eq!(collectors, HashSet::from([ShipId(0)]));
    }

    #[test]
    fn test_enumerated_actions_are_legal() {
        let state = GameState {
            ships: vec![
                ship(Coord::new(1, 0), Player::One),
                ship(Coord::new(0, 1), Player::One),
                ship(Coord::new(0, 1), Player::Two),
            ],
            treasures: vec![
                island_treasure(),
                Treasure {
                    location: TreasureLocation::Aboard(ShipId(0)),
                    reward: 6,
                    home: Coord::new(0, 2),
                },
            ],
            marines: Vec::new(),
            scores: [0, 0],
            turns_left: 10,
        };
        let sim = sim_with(state);

        let joints = enumerate_joint_actions(&sim, Player::One);
        assert!(!joints.is_empty());
        for joint in &joints {
            assert!(
                is_joint_action_legal(&sim, joint, Player::One),
                "enumerated action judged illegal: {joint}"
            );
        }

        // Ship 0 sits at the base with cargo: a deposit must be on offer.
        assert!(joints.iter().any(|j| j.contains_any(|a| matches!(
            a,
            AtomicAction::Deposit { .. }
        ))));
        // Ship 1 is co-located with an enemy: a plunder must be on offer.
        assert!(joints.iter().any(|j| j.contains_any(|a| matches!(
            a,
            AtomicAction::Plunder { .. }
        ))));
    }

    #[test]
    fn test_cross_product_order_is_deterministic() {
        let state = GameState {
            ships: vec![
                ship(Coord::new(2, 2), Player::One),
                ship(Coord::new(2, 4), Player::One),
            ],
            treasures: Vec::new(),
            marines: Vec::new(),
            scores: [0, 0],
            turns_left: 10,
        };
        let sim = sim_with(state);
        let first = enumerate_joint_actions(&sim, Player::One);
        let second = enumerate_joint_actions(&sim, Player::One);
        assert_eq!(first, second);

        // Last axis varies fastest: the leading joints cycle through the
        // second ship's candidates while the first ship's action stays put.
        // Ship 1 at (2, 4) has two sails plus wait.
        assert_eq!(first.len(), 4 * 3);
        let heads: HashSet<_> = first.iter().take(3).map(|j| j.actions()[0]).collect();
        assert_eq!(heads.len(), 1);
        let tails: HashSet<_> = first.iter().take(3).map(|j| j.actions()[1]).collect();
        assert_eq!(tails.len(), 3);
    }

    #[test]
    fn test_full_capacity_ship_generates_no_collect() {
        let mut pirate = ship(Coord::new(0, 1), Player::One);
        pirate.capacity = 0;
        let state = GameState {
            ships: vec![pirate],
            treasures: vec![island_treasure()],
            marines: Vec::new(),
            scores: [0, 0],
            turns_left: 10,
        };
        let sim = sim_with(state);
        let joints = enumerate_joint_actions(&sim, Player::One);
        assert!(!joints.iter().any(|j| j.contains_any(|a| matches!(
            a,
            AtomicAction::Collect { .. }
        ))));
    }
}
