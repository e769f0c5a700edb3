use std::fmt::{self, Debug, Display, Formatter};

use prettytable::{Cell, Row, Table};
use separator::Separatable;

/// Per-depth counters for one search run.
///
/// Created counts every generated child (before duplicate filtering),
/// duplicates count the children the filter discarded, expanded counts the
/// leaves actually taken off the frontier and expanded.
#[derive(Clone, PartialEq, Eq)]
pub struct Stats {
    created: Vec<u64>,
    duplicates: Vec<u64>,
    expanded: Vec<u64>,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats {
            created: vec![],
            duplicates: vec![],
            expanded: vec![],
        }
    }

    pub fn total_created(&self) -> u64 {
        self.created.iter().sum()
    }

    pub fn total_duplicates(&self) -> u64 {
        self.duplicates.iter().sum()
    }

    pub fn total_expanded(&self) -> u64 {
        self.expanded.iter().sum()
    }

    pub(crate) fn add_created(&mut self, depth: u32) -> bool {
        Self::add(&mut self.created, depth)
    }

    pub(crate) fn add_duplicate(&mut self, depth: u32) -> bool {
        Self::add(&mut self.duplicates, depth)
    }

    pub(crate) fn add_expanded(&mut self, depth: u32) -> bool {
        Self::add(&mut self.expanded, depth)
    }

    /// Returns true when the counter reached a new depth.
    fn add(counts: &mut Vec<u64>, depth: u32) -> bool {
        let mut ret = false;

        // while because duplicate filtering can skip depths
        while depth as usize >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth as usize] += 1;
        ret
    }

    /// Depth / created / expanded / duplicates table.
    pub fn depth_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Depth"),
            Cell::new("Created"),
            Cell::new("Expanded"),
            Cell::new("Duplicates"),
        ]));
        for depth in 0..self.created.len() {
            // created is the longest vec - every reached depth is created first
            let expanded = self.expanded.get(depth).cloned().unwrap_or(0);
            let duplicates = self.duplicates.get(depth).cloned().unwrap_or(0);
            table.add_row(Row::new(vec![
                Cell::new(&depth.to_string()),
                Cell::new(&self.created[depth].separated_string()),
                Cell::new(&expanded.separated_string()),
                Cell::new(&duplicates.separated_string()),
            ]));
        }
        table
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created)?;
        writeln!(f, "duplicates by depth: {:?}", self.duplicates)?;
        writeln!(f, "expanded by depth: {:?}", self.expanded)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(f, "total duplicates: {}", self.total_duplicates().separated_string())?;
        write!(f, "total expanded: {}", self.total_expanded().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let duplicates = self.total_duplicates();
        let expanded = self.total_expanded();
        let left = created - expanded - duplicates;
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "States expanded total: {}", expanded.separated_string())?;
        writeln!(f, "Duplicates discarded total: {}", duplicates.separated_string())?;
        write!(f, "Created but not reached total: {}", left.separated_string())
    }
}
