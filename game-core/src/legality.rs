//! Joint-action legality checking.
//!
//! A pure predicate over the *current* simulated state. Search scoring wants
//! illegal edges ranked out rather than crashed on, so violations are
//! reported as `false`, never as an error.

use crate::action::{AtomicAction, JointAction};
use crate::sim::Simulator;
use crate::state::{Player, TreasureLocation};

/// Whether `joint` is legal for `player` against the simulator's held state.
///
/// Checks, per atomic action: ownership, sail adjacency, collect adjacency
/// plus spare capacity, deposit at base with the treasure aboard, plunder
/// co-location. Globally: exactly one atomic action per owned ship and no two
/// collects of the same treasure.
pub fn is_joint_action_legal(sim: &Simulator, joint: &JointAction, player: Player) -> bool {
    let state = sim.state();

    // Exactly one atomic action per owned ship, in any order, none repeated.
    let mut owned: Vec<_> = state.ships_of(player).map(|(id, _)| id).collect();
    if joint.len() != owned.len() {
        return false;
    }
    for action in joint {
        let ship = action.ship();
        match owned.iter().position(|&id| id == ship) {
            Some(index) => {
                owned.swap_remove(index);
            }
            None => return false,
        }
    }

    // No two atomic actions may collect the same treasure.
    let collected: Vec<_> = joint
        .iter()
        .filter_map(|a| a.collected_treasure())
        .collect();
    for (i, treasure) in collected.iter().enumerate() {
        if collected[..i].contains(treasure) {
            return false;
        }
    }

    joint.iter().all(|action| match *action {
        AtomicAction::Sail { ship, to } => {
            sim.neighbors(state.ship(ship).location).contains(&to)
        }
        AtomicAction::Collect { ship, treasure } => {
            if (treasure.0 as usize) >= state.treasures.len() {
                return false;
            }
            let pirate = state.ship(ship);
            match state.treasure(treasure).location {
                TreasureLocation::Cell(cell) => {
                    pirate.capacity > 0 && sim.neighbors(cell).contains(&pirate.location)
                }
                // Aboard a ship or in transit through the depot: not
                // collectible from the board.
                _ => false,
            }
        }
        AtomicAction::Deposit { ship, treasure } => {
            if (treasure.0 as usize) >= state.treasures.len() {
                return false;
            }
            state.ship(ship).location == sim.map().base()
                && state.treasure(treasure).location == TreasureLocation::Aboard(ship)
        }
        AtomicAction::Plunder { ship, target } => {
            if (target.0 as usize) >= state.ships.len() {
                return false;
            }
            let victim = state.ship(target);
            victim.owner != player && victim.location == state.ship(ship).location
        }
        AtomicAction::Wait { .. } => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Coord, GameMap};
    use crate::state::{GameState, PirateShip, ShipId, Treasure, TreasureId};
    use std::sync::Arc;

    fn sim_with(state: GameState) -> Simulator {
        let map = Arc::new(GameMap::from_symbols(&["SSISS", "BSSSS", "SSSSS"]).unwrap());
        Simulator::new(map, state)
    }

    fn two_fleet_state() -> GameState {
        GameState {
            ships: vec![
                PirateShip {
                    location: Coord::new(0, 1),
                    capacity: 2,
                    owner: Player::One,
                },
                PirateShip {
                    location: Coord::new(0, 1),
                    capacity: 2,
                    owner: Player::Two,
                },
            ],
            treasures: vec![Treasure {
                location: TreasureLocation::Cell(Coord::new(0, 2)),
                reward: 4,
                home: Coord::new(0, 2),
            }],
            marines: Vec::new(),
            scores: [0, 0],
            turns_left: 10,
        }
    }

    #[test]
    fn test_collect_adjacent_with_capacity_is_legal() {
        let sim = sim_with(two_fleet_state());
        let joint = JointAction::new(vec![AtomicAction::Collect {
            ship: ShipId(0),
            treasure: TreasureId(0),
        }]);
        assert!(is_joint_action_legal(&sim, &joint, Player::One));
    }

    #[test]
    fn test_collect_without_capacity_is_illegal() {
        let mut state = two_fleet_state();
        state.ships[0].capacity = 0;
        let sim = sim_with(state);
        let joint = JointAction::new(vec![AtomicAction::Collect {
            ship: ShipId(0),
            treasure: TreasureId(0),
        }]);
        assert!(!is_joint_action_legal(&sim, &joint, Player::One));
    }

    #[test]
    fn test_collect_aboard_treasure_is_illegal() {
        let mut state = two_fleet_state();
        state.treasures[0].location = TreasureLocation::Aboard(ShipId(1));
        let sim = sim_with(state);
        let joint = JointAction::new(vec![AtomicAction::Collect {
            ship: ShipId(0),
            treasure: TreasureId(0),
        }]);
        assert!(!is_joint_action_legal(&sim, &joint, Player::One));
    }

    #[test]
    fn test_sail_requires_adjacency() {
        let sim = sim_with(two_fleet_state());
        let near = JointAction::new(vec![AtomicAction::Sail {
            ship: ShipId(0),
            to: Coord::new(1, 1),
        }]);
        let far = JointAction::new(vec![AtomicAction::Sail {
            ship: ShipId(0),
            to: Coord::new(2, 4),
        }]);
        let island = JointAction::new(vec![AtomicAction::Sail {
            ship: ShipId(0),
            to: Coord::new(0, 2),
        }]);
        assert!(is_joint_action_legal(&sim, &near, Player::One));
        assert!(!is_joint_action_legal(&sim, &far, Player::One));
        assert!(!is_joint_action_legal(&sim, &island, Player::One));
    }

    #[test]
    fn test_deposit_requires_base_and_cargo() {
        let mut state = two_fleet_state();
        state.treasures[0].location = TreasureLocation::Aboard(ShipId(0));
        let away = sim_with(state.clone());
        let joint = JointAction::new(vec![AtomicAction::Deposit {
            ship: ShipId(0),
            treasure: TreasureId(0),
        }]);
        assert!(!is_joint_action_legal(&away, &joint, Player::One));

        state.ships[0].location = Coord::new(1, 0); // the base
        let home = sim_with(state);
        assert!(is_joint_action_legal(&home, &joint, Player::One));
    }

    #[test]
    fn test_plunder_requires_colocated_enemy() {
        let sim = sim_with(two_fleet_state());
        let joint = JointAction::new(vec![AtomicAction::Plunder {
            ship: ShipId(0),
            target: ShipId(1),
        }]);
        assert!(is_joint_action_legal(&sim, &joint, Player::One));

        let mut apart = two_fleet_state();
        apart.ships[1].location = Coord::new(2, 2);
        let sim = sim_with(apart);
        assert!(!is_joint_action_legal(&sim, &joint, Player::One));
    }

    #[test]
    fn test_plunder_own_ship_is_illegal() {
        let mut state = two_fleet_state();
        state.ships[1].owner = Player::One;
        let sim = sim_with(state);
        let joint = JointAction::new(vec![
            AtomicAction::Plunder {
                ship: ShipId(0),
                target: ShipId(1),
            },
            AtomicAction::Wait { ship: ShipId(1) },
        ]);
        assert!(!is_joint_action_legal(&sim, &joint, Player::One));
    }

    #[test]
    fn test_one_action_per_ship() {
        let mut state = two_fleet_state();
        state.ships[1].owner = Player::One;
        let sim = sim_with(state);

        // Missing a ship.
        let short = JointAction::new(vec![AtomicAction::Wait { ship: ShipId(0) }]);
        assert!(!is_joint_action_legal(&sim, &short, Player::One));

        // Same ship twice.
        let doubled = JointAction::new(vec![
            AtomicAction::Wait { ship: ShipId(0) },
            AtomicAction::Wait { ship: ShipId(0) },
        ]);
        assert!(!is_joint_action_legal(&sim, &doubled, Player::One));

        // Enemy ship in the joint action.
        let mut enemy_state = two_fleet_state();
        enemy_state.ships[0].owner = Player::One;
        let sim2 = sim_with(enemy_state);
        let foreign = JointAction::new(vec![AtomicAction::Wait { ship: ShipId(1) }]);
        assert!(!is_joint_action_legal(&sim2, &foreign, Player::One));
    }

    #[test]
    fn test_double_collect_same_treasure_is_illegal() {
        let mut state = two_fleet_state();
        state.ships[1].owner = Player::One;
        state.ships[1].location = Coord::new(0, 3); // also adjacent to the island
        let sim = sim_with(state);
        let joint = JointAction::new(vec![
            AtomicAction::Collect {
                ship: ShipId(0),
                treasure: TreasureId(0),
            },
            AtomicAction::Collect {
                ship: ShipId(1),
                treasure: TreasureId(0),
            },
        ]);
        assert!(!is_joint_action_legal(&sim, &joint, Player::One));
    }
}
