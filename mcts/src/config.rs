//! Search configuration parameters.

use std::time::Duration;

/// Configuration for one anytime UCT decision.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Wall-clock budget for one call to `decide`. The driver polls this
    /// deadline in every loop phase and returns the best statistics gathered
    /// so far once it passes.
    pub decision_budget: Duration,

    /// Exploration constant `c` in `c * sqrt(ln(N) / n)`.
    /// `sqrt(2)` gives the classic UCB1 bound.
    pub exploration: f64,

    /// Score handed to an unvisited legal child (plus its heuristic bias),
    /// large enough that every untried move is sampled before any re-visit.
    pub unvisited_bonus: f64,

    /// Optional hard cap on completed simulations. Mostly for tests and
    /// benchmarks, where determinism matters more than squeezing the budget.
    pub max_simulations: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            // The game harness allots five seconds per action; leave a
            // little slack for returning the decision.
            decision_budget: Duration::from_millis(4_500),
            exploration: std::f64::consts::SQRT_2,
            unvisited_bonus: 1e9,
            max_simulations: None,
        }
    }
}

impl SearchConfig {
    /// Fast config for tests: small budget, capped simulations.
    pub fn for_testing() -> Self {
        Self {
            decision_budget: Duration::from_millis(100),
            exploration: std::f64::consts::SQRT_2,
            unvisited_bonus: 1e9,
            max_simulations: Some(256),
        }
    }

    /// Builder pattern: set the decision budget.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.decision_budget = budget;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: cap the number of simulations.
    pub fn with_max_simulations(mut self, n: u32) -> Self {
        self.max_simulations = Some(n);
        self
    }
}
