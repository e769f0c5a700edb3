use crate::data::{Action, Pos, DIRECTIONS};
use crate::level::Level;

/// A world configuration: where the agent is and where the boxes are.
///
/// Walls and goals never change during a search so they live on `Level`
/// and are excluded from equality - two states are equal iff the agent
/// position and the box placement are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pub agent_pos: Pos,
    boxes: Vec<(Pos, char)>,
}

impl State {
    pub fn new(agent_pos: Pos, mut boxes: Vec<(Pos, char)>) -> State {
        // sort to detect equal states when box moves reorder them - states are
        // immutable after construction so this doubles as the hash key
        boxes.sort();
        State { agent_pos, boxes }
    }

    pub fn boxes(&self) -> &[(Pos, char)] {
        &self.boxes
    }

    /// Index into `boxes` of the box at `pos`, if any.
    pub fn box_at(&self, pos: Pos) -> Option<usize> {
        self.boxes.binary_search_by_key(&pos, |&(p, _)| p).ok()
    }

    fn is_free(&self, level: &Level, pos: Pos) -> bool {
        !level.walls[pos] && self.box_at(pos).is_none()
    }

    /// True iff every goal cell is covered by its required object -
    /// a level with no goal cells is trivially solved.
    pub fn is_goal(&self, level: &Level) -> bool {
        level.goals.iter().all(|&(pos, id)| {
            if id.is_ascii_digit() {
                self.agent_pos == pos && level.agent_id == id
            } else {
                let wanted = id.to_ascii_uppercase();
                self.box_at(pos).map_or(false, |i| self.boxes[i].1 == wanted)
            }
        })
    }

    /// All legal single-step successors with the actions causing them.
    ///
    /// Enumeration order is fixed: agent directions in `DIRECTIONS` order;
    /// per agent direction a Move is generated before Pulls, Pushes enumerate
    /// box directions in `DIRECTIONS` order. Duplicate detection relies on
    /// this order being stable across runs.
    pub fn expand(&self, level: &Level) -> Vec<(Action, State)> {
        let mut children = Vec::new();

        for &dir in &DIRECTIONS {
            let dest = self.agent_pos + dir;

            if let Some(pushed) = self.box_at(dest) {
                for &box_dir in &DIRECTIONS {
                    let box_dest = dest + box_dir;
                    // the agent's own cell is not free - it is vacated only
                    // after the box has moved
                    if box_dest != self.agent_pos && self.is_free(level, box_dest) {
                        let mut boxes = self.boxes.clone();
                        boxes[pushed].0 = box_dest;
                        children.push((Action::Push(dir, box_dir), State::new(dest, boxes)));
                    }
                }
            } else if self.is_free(level, dest) {
                children.push((Action::Move(dir), State::new(dest, self.boxes.clone())));

                for &box_dir in &DIRECTIONS {
                    let box_pos = self.agent_pos + box_dir;
                    if let Some(pulled) = self.box_at(box_pos) {
                        let mut boxes = self.boxes.clone();
                        boxes[pulled].0 = self.agent_pos;
                        children.push((Action::Pull(dir, box_dir), State::new(dest, boxes)));
                    }
                }
            }
        }

        children
    }
}
