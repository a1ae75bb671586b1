//! Plain-text views of population history and the global event log.

use std::fmt::Write;

use crate::events::{EventFilter, EventLog};
use crate::population::{HistoryEntry, PopulationUnit};

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Newest entries first, at most `limit` of them.
pub fn population_history(history: &[HistoryEntry], limit: usize) -> String {
    let mut out = String::new();
    for entry in history.iter().rev().take(limit) {
        let _ = writeln!(out, "[Year {}] {}", entry.year, entry.description);
    }
    out
}

pub fn population_summary(population: &PopulationUnit) -> String {
    let groups = population.age_groups();
    format!(
        "Name: {}\nSize: {}\nHealth: {:.1}%\nTechnology: {:.2}\nAggressiveness: {:.2}\nChildren: {} | Adults: {} | Elders: {}\n",
        population.name(),
        population.size(),
        population.health() * 100.0,
        population.technology(),
        population.aggressiveness(),
        groups.children,
        groups.adults,
        groups.elders,
    )
}

/// Matching events grouped under `Years 0–99` style headings.
pub fn global_timeline(log: &EventLog, filter: &EventFilter) -> String {
    let mut out = String::new();
    for (century, events) in log.by_century(filter) {
        let _ = writeln!(out, "Years {}–{}", century, century + 99);
        for event in events {
            let _ = writeln!(out, "  [Year {}] {}", event.year, event.description);
        }
    }
    out
}
