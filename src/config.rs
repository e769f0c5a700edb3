use std::fmt::{self, Display, Formatter};

/// Which exploration strategy to run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Method {
    BreadthFirst,
    DepthFirst,
    Greedy,
    AStar,
    WeightedAStar(f64),
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::BreadthFirst => write!(f, "bfs"),
            Method::DepthFirst => write!(f, "dfs"),
            Method::Greedy => write!(f, "greedy"),
            Method::AStar => write!(f, "astar"),
            Method::WeightedAStar(w) => write!(f, "wastar({})", w),
        }
    }
}
