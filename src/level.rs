use crate::data::Pos;
use crate::state::State;
use crate::vec2d::Vec2d;

/// A parsed problem instance.
///
/// Walls, goal cells and the agent id are fixed for the whole search -
/// only `State` (agent position + box placement) varies.
#[derive(Debug, Clone)]
pub struct Level {
    pub walls: Vec2d<bool>,
    /// Goal cells in row-major order. A lowercase id is satisfied by the
    /// matching uppercase box, a digit id by the agent itself.
    pub goals: Vec<(Pos, char)>,
    pub agent_id: char,
    pub initial_state: State,
}

impl Level {
    pub fn new(
        walls: Vec2d<bool>,
        goals: Vec<(Pos, char)>,
        agent_id: char,
        initial_state: State,
    ) -> Self {
        Level {
            walls,
            goals,
            agent_id,
            initial_state,
        }
    }
}
