use std::fmt::{self, Display, Formatter};
use std::io::{self, BufRead};
use std::str::FromStr;

use crate::data::{Pos, MAX_SIZE};
use crate::level::Level;
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseError {
    /// The level declares colors - a recognized feature this client does not support.
    UnsupportedColors,
    NoAgent,
    MultipleAgents,
    /// Unrecognized character at (row, col).
    InvalidCharacter(usize, usize),
    /// Map larger than 255 rows/columns.
    TooLarge,
    /// The walls don't enclose the agent.
    IncompleteBorder,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParseError::UnsupportedColors => {
                write!(f, "Invalid level (client does not support colors)")
            }
            ParseError::NoAgent => write!(f, "No agent"),
            ParseError::MultipleAgents => {
                write!(f, "More than one agent (client only supports one agent)")
            }
            ParseError::InvalidCharacter(r, c) => {
                write!(f, "Invalid character at pos: [{}, {}]", r, c)
            }
            ParseError::TooLarge => write!(f, "Map larger than 255 rows/columns"),
            ParseError::IncompleteBorder => write!(f, "Walls don't enclose the agent"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Reads the textual level from a stream, stopping at the first blank line
/// or EOF so the rest of the stream stays available for acknowledgements.
pub fn read_level<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut text = String::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(text);
        }
        let line = line.trim_end();
        if line.is_empty() {
            return Ok(text);
        }
        text.push_str(line);
        text.push('\n');
    }
}

impl FromStr for Level {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // trim so we can specify levels using raw strings more easily
        parse(s.trim_matches('\n'))
    }
}

/// Parses a level: `+` wall, digit agent, `A`-`Z` box, `a`-`z` goal, space empty.
pub fn parse(level: &str) -> Result<Level, ParseError> {
    let mut lines = level.lines();
    let first = match lines.next() {
        Some(first) => first,
        None => return Err(ParseError::NoAgent),
    };
    if is_colors_line(first) {
        return Err(ParseError::UnsupportedColors);
    }

    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut agent = None;

    for (r, line) in Some(first).into_iter().chain(lines).enumerate() {
        if r >= MAX_SIZE {
            return Err(ParseError::TooLarge);
        }
        let mut row = Vec::new();
        for (c, cur_char) in line.trim_end().chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParseError::TooLarge);
            }
            let pos = Pos::new(r as u8, c as u8);

            let wall = match cur_char {
                '+' => true,
                ' ' => false,
                '0'..='9' => {
                    if agent.is_some() {
                        return Err(ParseError::MultipleAgents);
                    }
                    agent = Some((pos, cur_char));
                    false
                }
                'A'..='Z' => {
                    boxes.push((pos, cur_char));
                    false
                }
                'a'..='z' => {
                    goals.push((pos, cur_char));
                    false
                }
                _ => return Err(ParseError::InvalidCharacter(r, c)),
            };
            row.push(wall);
        }
        grid.push(row);
    }

    let (agent_pos, agent_id) = agent.ok_or(ParseError::NoAgent)?;
    let walls = Vec2d::new(&grid, false);
    check_border(&walls, agent_pos)?;

    let initial_state = State::new(agent_pos, boxes);
    Ok(Level::new(walls, goals, agent_id, initial_state))
}

/// A colors declaration looks like `red: 0, A, B` - lowercase name, then
/// comma-separated single digit/uppercase tokens.
fn is_colors_line(line: &str) -> bool {
    let mut parts = line.splitn(2, ':');
    let name = parts.next().unwrap_or("");
    let objects = match parts.next() {
        Some(objects) => objects,
        None => return false,
    };
    if name.is_empty() || !name.chars().all(|ch| ch.is_ascii_lowercase()) {
        return false;
    }
    objects.split(',').all(|token| {
        let token = token.trim();
        token.len() == 1
            && token
                .chars()
                .all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase())
    })
}

/// Flood fill from the agent - escaping the grid means the walls are open.
/// This is the only place that needs bounds checks (using signed types);
/// after it passes, everything the search touches is surrounded by walls.
fn check_border(walls: &Vec2d<bool>, agent_pos: Pos) -> Result<(), ParseError> {
    let mut visited = walls.create_scratchpad(false);
    let mut to_visit = vec![agent_pos];

    while let Some(cur) = to_visit.pop() {
        visited[cur] = true;

        let (r, c) = (i32::from(cur.r), i32::from(cur.c));
        let neighbors = [(r + 1, c), (r - 1, c), (r, c + 1), (r, c - 1)];
        for &(nr, nc) in &neighbors {
            if nr < 0 || nc < 0 || nr >= i32::from(walls.rows()) || nc >= i32::from(walls.cols()) {
                // we got out of bounds without hitting a wall
                return Err(ParseError::IncompleteBorder);
            }

            let new_pos = Pos::new(nr as u8, nc as u8);
            if !visited[new_pos] && !walls[new_pos] {
                to_visit.push(new_pos);
            }
        }
    }

    Ok(())
}
