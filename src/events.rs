//! World-scale events shared by every population.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GlobalEventKind {
    AgeOfTools,
    WarDeclared { attacker: String, defender: String },
}

impl GlobalEventKind {
    pub fn label(&self) -> &'static str {
        match self {
            GlobalEventKind::AgeOfTools => "age-of-tools",
            GlobalEventKind::WarDeclared { .. } => "war",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalEvent {
    pub year: u64,
    pub kind: GlobalEventKind,
    pub description: String,
}

/// Append-only, in the order events happened.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventLog {
    events: Vec<GlobalEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, year: u64, kind: GlobalEventKind, description: impl Into<String>) {
        let event = GlobalEvent {
            year,
            kind,
            description: description.into(),
        };
        tracing::info!(year = event.year, kind = event.kind.label(), "[GLOBAL] {}", event.description);
        self.events.push(event);
    }

    pub fn events(&self) -> &[GlobalEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count_kind(&self, label: &str) -> usize {
        self.events
            .iter()
            .filter(|event| event.kind.label() == label)
            .count()
    }

    pub fn filtered<'a>(&'a self, filter: &'a EventFilter) -> impl Iterator<Item = &'a GlobalEvent> {
        self.events.iter().filter(move |event| filter.matches(event))
    }

    /// Groups matching events by century, keyed by the first year of the century.
    pub fn by_century(&self, filter: &EventFilter) -> BTreeMap<u64, Vec<&GlobalEvent>> {
        let mut grouped: BTreeMap<u64, Vec<&GlobalEvent>> = BTreeMap::new();
        for event in self.events.iter().filter(|event| filter.matches(event)) {
            grouped.entry(event.year / 100 * 100).or_default().push(event);
        }
        grouped
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// `None` matches every kind.
    pub kind: Option<String>,
    pub from_year: Option<u64>,
    pub to_year: Option<u64>,
}

impl EventFilter {
    pub fn matches(&self, event: &GlobalEvent) -> bool {
        if let Some(kind) = &self.kind {
            if kind != "all" && kind != event.kind.label() {
                return false;
            }
        }
        if self.from_year.is_some_and(|from| event.year < from) {
            return false;
        }
        if self.to_year.is_some_and(|to| event.year > to) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn war(attacker: &str, defender: &str) -> GlobalEventKind {
        GlobalEventKind::WarDeclared {
            attacker: attacker.into(),
            defender: defender.into(),
        }
    }

    fn sample_log() -> EventLog {
        let mut log = EventLog::new();
        log.push(12, war("Skytribe", "Stonewalkers"), "Skytribe declared war on Stonewalkers!");
        log.push(40, GlobalEventKind::AgeOfTools, "The Age of Tools has begun!");
        log.push(150, war("Stonewalkers", "Skytribe"), "Stonewalkers declared war on Skytribe!");
        log
    }

    #[test]
    fn keeps_insertion_order() {
        let log = sample_log();
        let years: Vec<u64> = log.events().iter().map(|e| e.year).collect();
        assert_eq!(years, vec![12, 40, 150]);
        assert_eq!(log.count_kind("war"), 2);
    }

    #[test]
    fn filter_by_kind_and_range() {
        let log = sample_log();
        let filter = EventFilter {
            kind: Some("war".into()),
            from_year: Some(20),
            to_year: None,
        };
        let years: Vec<u64> = log.filtered(&filter).map(|e| e.year).collect();
        assert_eq!(years, vec![150]);

        let everything = EventFilter {
            kind: Some("all".into()),
            ..EventFilter::default()
        };
        assert_eq!(log.filtered(&everything).count(), 3);
    }

    #[test]
    fn groups_by_century() {
        let log = sample_log();
        let grouped = log.by_century(&EventFilter::default());
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![0, 100]);
        assert_eq!(grouped[&0].len(), 2);
        assert_eq!(grouped[&100][0].year, 150);
    }

    fn wars_by_century(log: &EventLog) -> BTreeMap<u64, Vec<&GlobalEvent>> {
        let filter = EventFilter {
            kind: Some("war".into()),
            ..EventFilter::default()
        };
        log.by_century(&filter)
    }

    #[test]
    fn grouping_outlives_the_filter() {
        let log = sample_log();
        let grouped = wars_by_century(&log);
        assert_eq!(grouped[&0][0].year, 12);
        assert_eq!(grouped[&100][0].year, 150);
        assert_eq!(grouped.values().map(Vec::len).sum::<usize>(), 2);
    }
}
