use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt::{self, Display, Formatter};
use std::time::Instant;

use fnv::FnvHashSet;
use separator::Separatable;

use crate::config::Method;
use crate::heuristic::{Heuristic, Score};
use crate::level::Level;
use crate::memory::MemoryTracker;
use crate::state::State;

use super::node::{NodeArena, NodeId};
use super::ContractViolation;

/// Heap entry for the best-first frontier. Ordered by score, ties broken by
/// insertion sequence so equal scores come out first-in-first-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct BestEntry {
    score: Score,
    seq: u64,
    id: NodeId,
}

#[derive(Debug)]
enum Frontier {
    /// Breadth-first: insertion order is removal order.
    Fifo(VecDeque<NodeId>),
    /// Depth-first: most recently inserted first. Termination on cyclic
    /// state spaces depends entirely on the shared explored-set check.
    Lifo(Vec<NodeId>),
    /// Best-first: ascending score, computed at insertion time.
    Best {
        heap: BinaryHeap<Reverse<BestEntry>>,
        heuristic: Heuristic,
        seq: u64,
    },
}

impl Frontier {
    fn len(&self) -> usize {
        match self {
            Frontier::Fifo(queue) => queue.len(),
            Frontier::Lifo(stack) => stack.len(),
            Frontier::Best { heap, .. } => heap.len(),
        }
    }
}

/// Owns the frontier and the explored set for one search run.
///
/// All variants share the bookkeeping; only the frontier discipline
/// differs. Membership tests go through a mirror set because none of the
/// frontier containers can answer them in O(1) themselves.
#[derive(Debug)]
pub struct Strategy {
    explored: FnvHashSet<State>,
    frontier: Frontier,
    frontier_set: FnvHashSet<State>,
    start_time: Instant,
}

impl Strategy {
    pub fn breadth_first() -> Self {
        Self::with_frontier(Frontier::Fifo(VecDeque::new()))
    }

    pub fn depth_first() -> Self {
        Self::with_frontier(Frontier::Lifo(Vec::new()))
    }

    pub fn best_first(heuristic: Heuristic) -> Self {
        Self::with_frontier(Frontier::Best {
            heap: BinaryHeap::new(),
            heuristic,
            seq: 0,
        })
    }

    pub fn from_method(method: Method, level: &Level) -> Self {
        match method {
            Method::BreadthFirst => Self::breadth_first(),
            Method::DepthFirst => Self::depth_first(),
            Method::Greedy => Self::best_first(Heuristic::greedy(level)),
            Method::AStar => Self::best_first(Heuristic::a_star(level)),
            Method::WeightedAStar(w) => Self::best_first(Heuristic::weighted_a_star(level, w)),
        }
    }

    fn with_frontier(frontier: Frontier) -> Self {
        Strategy {
            explored: FnvHashSet::default(),
            frontier,
            frontier_set: FnvHashSet::default(),
            start_time: Instant::now(),
        }
    }

    /// Inserts one leaf. Duplicate filtering is the driver's job - it checks
    /// `is_explored` and `in_frontier` before calling this.
    pub fn add_to_frontier(&mut self, nodes: &NodeArena, id: NodeId) {
        let node = &nodes[id];
        match &mut self.frontier {
            Frontier::Fifo(queue) => queue.push_back(id),
            Frontier::Lifo(stack) => stack.push(id),
            Frontier::Best { heap, heuristic, seq } => {
                let score = heuristic.evaluate(&node.state, node.path_len);
                heap.push(Reverse(BestEntry { score, seq: *seq, id }));
                *seq += 1;
            }
        }
        self.frontier_set.insert(node.state.clone());
        debug_assert_eq!(self.frontier.len(), self.frontier_set.len());
    }

    /// Removes and returns one leaf per the variant's ordering rule.
    pub fn get_and_remove_leaf(&mut self, nodes: &NodeArena) -> Result<NodeId, ContractViolation> {
        let id = match &mut self.frontier {
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Lifo(stack) => stack.pop(),
            Frontier::Best { heap, .. } => heap.pop().map(|Reverse(entry)| entry.id),
        };
        let id = id.ok_or(ContractViolation::EmptyFrontier)?;
        self.frontier_set.remove(&nodes[id].state);
        debug_assert_eq!(self.frontier.len(), self.frontier_set.len());
        Ok(id)
    }

    pub fn in_frontier(&self, state: &State) -> bool {
        self.frontier_set.contains(state)
    }

    pub fn frontier_empty(&self) -> bool {
        self.frontier.len() == 0
    }

    pub fn frontier_count(&self) -> usize {
        self.frontier.len()
    }

    pub fn add_to_explored(&mut self, state: State) {
        self.explored.insert(state);
    }

    pub fn is_explored(&self, state: &State) -> bool {
        self.explored.contains(state)
    }

    pub fn explored_count(&self) -> usize {
        self.explored.len()
    }

    pub fn time_spent(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// One-line progress report - purely observational.
    pub fn search_status(&self, memory: &MemoryTracker) -> String {
        format!(
            "#Explored: {:>9}, #Frontier: {:>9}, Time: {:.3} s, Alloc: {:.2} MB, MaxAlloc: {:.2} MB",
            (self.explored_count() as u64).separated_string(),
            (self.frontier_count() as u64).separated_string(),
            self.time_spent(),
            memory.usage_mb(),
            memory.ceiling_mb(),
        )
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.frontier {
            Frontier::Fifo(_) => write!(f, "breadth-first search"),
            Frontier::Lifo(_) => write!(f, "depth-first search"),
            Frontier::Best { heuristic, .. } => {
                write!(f, "best-first search using {} evaluation", heuristic)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Action, Dir, Pos};

    // a corridor wide enough that agent positions alone tell states apart
    fn corridor() -> Level {
        "++++++++\n+0     +\n++++++++".parse().unwrap()
    }

    fn push_states(strategy: &mut Strategy, arena: &mut NodeArena, cols: &[u8]) -> Vec<NodeId> {
        let root = arena.insert_root(State::new(Pos::new(1, 1), vec![]));
        let mut ids = Vec::new();
        for &c in cols {
            let id = arena.insert_child(root, Action::Move(Dir::East), State::new(Pos::new(1, c), vec![]));
            strategy.add_to_frontier(arena, id);
            ids.push(id);
        }
        ids
    }

    #[test]
    fn fifo_removes_in_insertion_order() {
        let mut strategy = Strategy::breadth_first();
        let mut arena = NodeArena::new();
        let ids = push_states(&mut strategy, &mut arena, &[2, 3, 4]);

        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[0]);
        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[1]);
        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[2]);
    }

    #[test]
    fn lifo_removes_most_recent_first() {
        let mut strategy = Strategy::depth_first();
        let mut arena = NodeArena::new();
        let ids = push_states(&mut strategy, &mut arena, &[2, 3, 4]);

        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[2]);
        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[1]);
        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[0]);
    }

    #[test]
    fn best_first_removes_lowest_score() {
        let level: Level = "++++++++\n+0    a+\n++++++++".parse().unwrap();
        let mut strategy = Strategy::best_first(
            Heuristic::greedy(&level).with_estimate(|_, state| u32::from(state.agent_pos.c)),
        );
        let mut arena = NodeArena::new();
        let ids = push_states(&mut strategy, &mut arena, &[5, 2, 4]);

        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[1]);
        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[2]);
        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[0]);
    }

    #[test]
    fn best_first_breaks_ties_first_in_first_out() {
        let level = corridor();
        // constant estimate - every state ties, insertion order must win
        let mut strategy =
            Strategy::best_first(Heuristic::greedy(&level).with_estimate(|_, _| 7));
        let mut arena = NodeArena::new();
        let ids = push_states(&mut strategy, &mut arena, &[4, 2, 6]);

        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[0]);
        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[1]);
        assert_eq!(strategy.get_and_remove_leaf(&arena).unwrap(), ids[2]);
    }

    #[test]
    fn frontier_membership_mirrors_contents() {
        let mut strategy = Strategy::breadth_first();
        let mut arena = NodeArena::new();
        push_states(&mut strategy, &mut arena, &[2, 3]);

        assert_eq!(strategy.frontier_count(), 2);
        assert!(strategy.in_frontier(&State::new(Pos::new(1, 2), vec![])));
        assert!(!strategy.in_frontier(&State::new(Pos::new(1, 5), vec![])));

        strategy.get_and_remove_leaf(&arena).unwrap();
        assert!(!strategy.in_frontier(&State::new(Pos::new(1, 2), vec![])));
        assert_eq!(strategy.frontier_count(), 1);
    }

    #[test]
    fn explored_bookkeeping() {
        let mut strategy = Strategy::breadth_first();
        let state = State::new(Pos::new(1, 1), vec![]);

        assert!(!strategy.is_explored(&state));
        assert_eq!(strategy.explored_count(), 0);
        strategy.add_to_explored(state.clone());
        assert!(strategy.is_explored(&state));
        assert_eq!(strategy.explored_count(), 1);
    }

    #[test]
    fn removing_from_empty_frontier_is_a_contract_violation() {
        let mut strategy = Strategy::depth_first();
        let arena = NodeArena::new();
        assert!(strategy.frontier_empty());
        assert_eq!(
            strategy.get_and_remove_leaf(&arena).unwrap_err(),
            ContractViolation::EmptyFrontier
        );
    }

    #[test]
    fn status_line_reports_counts() {
        let mut strategy = Strategy::breadth_first();
        strategy.add_to_explored(State::new(Pos::new(1, 1), vec![]));
        let status = strategy.search_status(&MemoryTracker::new());
        assert!(status.contains("#Explored:"));
        assert!(status.contains("#Frontier:"));
        assert!(status.contains("MaxAlloc: 512.00 MB"));
    }

    #[test]
    fn display_names_the_variant() {
        let level = corridor();
        assert_eq!(Strategy::breadth_first().to_string(), "breadth-first search");
        assert_eq!(Strategy::depth_first().to_string(), "depth-first search");
        assert_eq!(
            Strategy::best_first(Heuristic::a_star(&level)).to_string(),
            "best-first search using A* evaluation"
        );
    }
}
