//! Static per-move heuristic bias.
//!
//! Scores a joint action by shape alone, before any simulation: depositing
//! beats collecting beats plundering beats sailing, and waiting is penalized
//! so pure-wait fleets rank last. The bias shapes UCT selection at equal
//! empirical performance; rollout statistics dominate it once visits accrue.

use game_core::{AtomicAction, JointAction};

const DEPOSIT_BIAS: f64 = 4.0;
const COLLECT_BIAS: f64 = 2.0;
const PLUNDER_BIAS: f64 = 1.0;
const SAIL_BIAS: f64 = 0.0;
const WAIT_BIAS: f64 = -1.0;

/// Sum of per-atomic-action biases.
pub fn action_bias(joint: &JointAction) -> f64 {
    joint
        .iter()
        .map(|action| match action {
            AtomicAction::Deposit { .. } => DEPOSIT_BIAS,
            AtomicAction::Collect { .. } => COLLECT_BIAS,
            AtomicAction::Plunder { .. } => PLUNDER_BIAS,
            AtomicAction::Sail { .. } => SAIL_BIAS,
            AtomicAction::Wait { .. } => WAIT_BIAS,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Coord, ShipId, TreasureId};

    fn single(action: AtomicAction) -> JointAction {
        JointAction::new(vec![action])
    }

    #[test]
    fn test_bias_ordering() {
        let ship = ShipId(0);
        let deposit = action_bias(&single(AtomicAction::Deposit {
            ship,
            treasure: TreasureId(0),
        }));
        let collect = action_bias(&single(AtomicAction::Collect {
            ship,
            treasure: TreasureId(0),
        }));
        let plunder = action_bias(&single(AtomicAction::Plunder {
            ship,
            target: ShipId(1),
        }));
        let sail = action_bias(&single(AtomicAction::Sail {
            ship,
            to: Coord::new(0, 0),
        }));
        let wait = action_bias(&single(AtomicAction::Wait { ship }));

        assert!(deposit > collect);
        assert!(collect > plunder);
        assert!(plunder > sail);
        assert!(sail > wait);
        assert!(wait < 0.0);
    }

    #[test]
    fn test_bias_sums_over_fleet() {
        let joint = JointAction::new(vec![
            AtomicAction::Deposit {
                ship: ShipId(0),
                treasure: TreasureId(0),
            },
            AtomicAction::Wait { ship: ShipId(1) },
        ]);
        assert!((action_bias(&joint) - (DEPOSIT_BIAS + WAIT_BIAS)).abs() < 1e-12);
    }
}
