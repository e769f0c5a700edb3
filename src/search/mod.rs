mod node;
mod stats;
mod strategy;

pub use self::node::{Node, NodeArena, NodeId};
pub use self::stats::Stats;
pub use self::strategy::Strategy;

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use log::{debug, info};

use crate::config::Method;
use crate::data::Action;
use crate::level::Level;
use crate::memory::MemoryTracker;
use crate::Solve;

/// A usage bug in the driver/strategy contract - fatal, never expected in
/// normal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    EmptyFrontier,
}

impl Display for ContractViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ContractViolation::EmptyFrontier => {
                write!(f, "Removed a leaf from an empty frontier")
            }
        }
    }
}

impl Error for ContractViolation {}

/// How a search run ended. `Exhausted` and `ResourceExceeded` are normal
/// negative results, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Vec<Action>),
    /// The frontier emptied without reaching a goal.
    Exhausted,
    /// The soft memory ceiling was crossed.
    ResourceExceeded,
}

impl Outcome {
    pub fn plan(&self) -> Option<&[Action]> {
        match self {
            Outcome::Solved(plan) => Some(plan),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct SearchOk {
    pub outcome: Outcome,
    pub stats: Stats,
}

const STATUS_INTERVAL: u32 = 1000;

/// The main loop: pop one leaf per strategy order, goal-test, expand,
/// filter duplicates against frontier and explored, insert survivors.
///
/// A later-discovered path to an already-known state is always discarded,
/// even if it would be cheaper (first-seen-wins - under best-first ordering
/// this is a known optimality caveat, kept deliberately).
pub fn search(
    level: &Level,
    strategy: &mut Strategy,
    memory: &MemoryTracker,
) -> Result<SearchOk, ContractViolation> {
    let mut stats = Stats::new();
    let mut nodes = NodeArena::new();

    let root = nodes.insert_root(level.initial_state.clone());
    stats.add_created(0);
    strategy.add_to_frontier(&nodes, root);

    let mut iterations = 0;
    loop {
        if iterations == STATUS_INTERVAL {
            info!("{}", strategy.search_status(memory));
            iterations = 0;
        }
        iterations += 1;

        if memory.over_ceiling() {
            return Ok(SearchOk {
                outcome: Outcome::ResourceExceeded,
                stats,
            });
        }

        if strategy.frontier_empty() {
            return Ok(SearchOk {
                outcome: Outcome::Exhausted,
                stats,
            });
        }

        let leaf = strategy.get_and_remove_leaf(&nodes)?;

        if nodes[leaf].state.is_goal(level) {
            return Ok(SearchOk {
                outcome: Outcome::Solved(nodes.extract_plan(leaf)),
                stats,
            });
        }

        let state = nodes[leaf].state.clone();
        let path_len = nodes[leaf].path_len;
        if stats.add_expanded(path_len) {
            debug!("expanded a new depth: {}", path_len);
        }
        strategy.add_to_explored(state.clone());

        for (action, child) in state.expand(level) {
            stats.add_created(path_len + 1);
            if strategy.is_explored(&child) || strategy.in_frontier(&child) {
                stats.add_duplicate(path_len + 1);
                continue;
            }
            let id = nodes.insert_child(leaf, action, child);
            strategy.add_to_frontier(&nodes, id);
        }
    }
}

impl Solve for Level {
    fn solve(&self, method: Method, memory: &MemoryTracker) -> Result<SearchOk, ContractViolation> {
        let mut strategy = Strategy::from_method(method, self);
        search(self, &mut strategy, memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dir, Pos};
    use crate::heuristic::Heuristic;
    use crate::state::State;
    use crate::vec2d::Vec2d;

    fn solve(level: &Level, strategy: &mut Strategy) -> SearchOk {
        search(level, strategy, &MemoryTracker::new()).unwrap()
    }

    /// Replays a plan by re-deriving successors, asserting every action is
    /// legal, and returns the final state.
    fn replay(level: &Level, plan: &[Action]) -> State {
        let mut state = level.initial_state.clone();
        for action in plan {
            let (_, next) = state
                .expand(level)
                .into_iter()
                .find(|(a, _)| a == action)
                .expect("plan contains an illegal action");
            state = next;
        }
        state
    }

    #[test]
    fn agent_reaches_adjacent_goal() {
        // one agent, one goal cell one step away, no boxes - the textual
        // format can't spell agent goals so the level is built directly
        let walls = Vec2d::new(
            &[
                vec![true, true, true, true],
                vec![true, false, false, true],
                vec![true, true, true, true],
            ],
            false,
        );
        let initial = State::new(Pos::new(1, 1), vec![]);
        let level = Level::new(walls, vec![(Pos::new(1, 2), '0')], '0', initial);

        let mut strategy = Strategy::breadth_first();
        let result = solve(&level, &mut strategy);
        assert_eq!(result.outcome, Outcome::Solved(vec![Action::Move(Dir::East)]));
    }

    #[test]
    fn already_solved_level_yields_empty_plan() {
        let level: Level = "+++\n+0+\n+++".parse().unwrap();
        let mut strategy = Strategy::breadth_first();
        let result = solve(&level, &mut strategy);
        assert_eq!(result.outcome, Outcome::Solved(vec![]));
    }

    #[test]
    fn walled_off_goal_exhausts_the_reachable_space() {
        // goal a can never be reached - the agent explores both free cells
        // and gives up with an empty frontier
        let level: Level = "++++++\n+0 +a+\n++++++".parse().unwrap();
        let mut strategy = Strategy::breadth_first();
        let result = solve(&level, &mut strategy);

        assert_eq!(result.outcome, Outcome::Exhausted);
        assert_eq!(strategy.explored_count(), 2);
        assert_eq!(strategy.frontier_count(), 0);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn memory_ceiling_aborts_before_exhaustion() {
        // solvable but with a ceiling no real process fits under
        let level: Level = "++++++++\n+0  A a+\n++++++++".parse().unwrap();
        let mut strategy = Strategy::breadth_first();
        let result = search(&level, &mut strategy, &MemoryTracker::with_ceiling(1.0)).unwrap();
        assert_eq!(result.outcome, Outcome::ResourceExceeded);
    }

    #[test]
    fn breadth_first_finds_a_shortest_plan() {
        // two steps to reach the box, two pushes onto the goal
        let level: Level = "++++++++\n+0  A a+\n++++++++".parse().unwrap();
        let mut strategy = Strategy::breadth_first();
        let result = solve(&level, &mut strategy);

        let plan = result.outcome.plan().expect("level is solvable").to_vec();
        assert_eq!(plan.len(), 4);
        assert!(replay(&level, &plan).is_goal(&level));
    }

    #[test]
    fn a_star_matches_the_breadth_first_optimum() {
        let level: Level = "++++++++\n+0  A a+\n++++++++".parse().unwrap();
        let mut strategy = Strategy::best_first(Heuristic::a_star(&level));
        let result = solve(&level, &mut strategy);
        assert_eq!(result.outcome.plan().expect("level is solvable").len(), 4);
    }

    #[test]
    fn weighted_variants_stay_complete() {
        let level: Level = "++++++++\n+0  A a+\n++++++++".parse().unwrap();
        for heuristic in [
            Heuristic::greedy(&level),
            Heuristic::weighted_a_star(&level, 5.0),
        ]
        .iter()
        {
            let mut strategy = Strategy::best_first(heuristic.clone());
            let result = solve(&level, &mut strategy);
            let plan = result.outcome.plan().expect("level is solvable").to_vec();
            assert!(plan.len() >= 4);
            assert!(replay(&level, &plan).is_goal(&level));
        }
    }

    #[test]
    fn depth_first_terminates_on_cyclic_spaces() {
        // an open room is full of cycles and the goal has no matching box,
        // so only the explored-set check lets DFS run out of work
        let level: Level = "++++++\n+   +\n+ 0a+\n+   +\n++++++".parse().unwrap();
        let mut strategy = Strategy::depth_first();
        let result = solve(&level, &mut strategy);

        assert_eq!(result.outcome, Outcome::Exhausted);
        // one state per free cell the agent can stand on
        assert_eq!(strategy.explored_count(), 9);
    }

    #[test]
    fn exhaustion_never_expands_a_state_twice() {
        let level: Level = "++++++++\n+0 A +b+\n++++++++".parse().unwrap();
        let mut strategy = Strategy::depth_first();
        let result = solve(&level, &mut strategy);

        assert_eq!(result.outcome, Outcome::Exhausted);
        // every expansion added a unique state to the explored set
        assert_eq!(result.stats.total_expanded() as usize, strategy.explored_count());
        // and everything created was either expanded or discarded
        assert_eq!(
            result.stats.total_created(),
            result.stats.total_expanded() + result.stats.total_duplicates()
        );
    }

    #[test]
    fn plan_replay_reproduces_the_goal_state() {
        let level: Level = "++++++++\n+  0A a+\n+      +\n++++++++".parse().unwrap();
        let mut strategy = Strategy::breadth_first();
        let result = solve(&level, &mut strategy);

        let plan = result.outcome.plan().expect("level is solvable").to_vec();
        let final_state = replay(&level, &plan);
        assert!(final_state.is_goal(&level));
        assert_eq!(final_state.box_at(Pos::new(1, 6)), Some(0));
    }
}
