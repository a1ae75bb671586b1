/// Monotonic year counter owned by a [`crate::engine::SimulationContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorldClock {
    current_year: u64,
}

impl WorldClock {
    pub fn new(start_year: u64) -> Self {
        Self {
            current_year: start_year,
        }
    }

    /// Years are unsigned so time cannot run backwards.
    pub fn advance(&mut self, years: u64) {
        self.current_year = self.current_year.saturating_add(years);
    }

    pub fn current_year(&self) -> u64 {
        self.current_year
    }
}
