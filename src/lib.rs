// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

pub mod config;
pub mod data;
pub mod heuristic;
pub mod level;
pub mod memory;
pub mod parser;
pub mod protocol;
pub mod search;
pub mod state;
pub mod vec2d;

use crate::config::Method;
use crate::memory::MemoryTracker;
use crate::search::{ContractViolation, SearchOk};

pub trait Solve {
    fn solve(&self, method: Method, memory: &MemoryTracker) -> Result<SearchOk, ContractViolation>;
}
