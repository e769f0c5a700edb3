use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use crate::data::Pos;
use crate::level::Level;
use crate::state::State;

/// Estimate of the remaining cost from a state, given the goal layout.
/// Must be total and non-negative.
pub type Estimate = fn(&[(Pos, char)], &State) -> u32;

/// Sum, per unsatisfied goal cell, of the minimum Manhattan distance from a
/// matching box (or from the agent, for digit goals). Admissible and
/// consistent as long as the goal set is homogeneous. A goal with no
/// matching box contributes 0 - the true remaining cost is infinite there,
/// so anything is a lower bound.
pub fn goal_distance(goals: &[(Pos, char)], state: &State) -> u32 {
    let mut sum = 0;
    for &(pos, id) in goals {
        if id.is_ascii_digit() {
            sum += state.agent_pos.dist(pos);
        } else {
            let wanted = id.to_ascii_uppercase();
            if state.box_at(pos).map_or(false, |i| state.boxes()[i].1 == wanted) {
                continue;
            }
            sum += state
                .boxes()
                .iter()
                .filter(|&&(_, b)| b == wanted)
                .map(|&(p, _)| p.dist(pos))
                .min()
                .unwrap_or(0);
        }
    }
    sum
}

/// Frontier ordering value. Evaluations are finite (path length plus a
/// weighted non-negative estimate) so `total_cmp` gives a real total order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score(f64);

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Greedy,
    AStar,
    WeightedAStar(f64),
}

/// Maps a state to its frontier ordering value.
///
/// All three variants capture the goal layout of the problem at
/// construction; they differ only in how path cost and estimate combine.
#[derive(Debug, Clone)]
pub struct Heuristic {
    kind: Kind,
    goals: Vec<(Pos, char)>,
    estimate: Estimate,
}

impl Heuristic {
    /// Orders by estimate alone - fast, no optimality guarantee.
    pub fn greedy(level: &Level) -> Self {
        Self::with_kind(Kind::Greedy, level)
    }

    /// Orders by path length + estimate - optimal for admissible,
    /// consistent estimates.
    pub fn a_star(level: &Level) -> Self {
        Self::with_kind(Kind::AStar, level)
    }

    /// Orders by path length + weight * estimate - trades optimality for
    /// speed as the weight grows. The weight must be positive.
    pub fn weighted_a_star(level: &Level, weight: f64) -> Self {
        debug_assert!(weight > 0.0);
        Self::with_kind(Kind::WeightedAStar(weight), level)
    }

    fn with_kind(kind: Kind, level: &Level) -> Self {
        Heuristic {
            kind,
            goals: level.goals.clone(),
            estimate: goal_distance,
        }
    }

    /// Replaces the default estimate.
    pub fn with_estimate(mut self, estimate: Estimate) -> Self {
        self.estimate = estimate;
        self
    }

    pub fn evaluate(&self, state: &State, path_len: u32) -> Score {
        let h = f64::from((self.estimate)(&self.goals, state));
        let g = f64::from(path_len);
        Score(match self.kind {
            Kind::Greedy => h,
            Kind::AStar => g + h,
            Kind::WeightedAStar(w) => g + w * h,
        })
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::Greedy => write!(f, "greedy"),
            Kind::AStar => write!(f, "A*"),
            Kind::WeightedAStar(w) => write!(f, "WA*({})", w),
        }
    }
}
