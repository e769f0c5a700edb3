//! Plan replay over the line-oriented executor protocol.
//!
//! Runs only after the search is complete - one action label per line out,
//! one acknowledgement line in per action.

use std::io::{self, BufRead, Write};

use log::warn;

use crate::data::Action;

/// Sends the plan and returns how many actions the executor accepted.
/// The literal acknowledgement `false` halts emission.
pub fn execute_plan<R, W>(plan: &[Action], acks: &mut R, out: &mut W) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
{
    for (i, action) in plan.iter().enumerate() {
        writeln!(out, "{}", action)?;
        out.flush()?;

        let mut response = String::new();
        acks.read_line(&mut response)?;
        if response.trim_end() == "false" {
            warn!("executor rejected action {} ({} of {})", action, i + 1, plan.len());
            return Ok(i);
        }
    }
    Ok(plan.len())
}
