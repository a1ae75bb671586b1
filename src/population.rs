use serde::Serialize;
use uuid::Uuid;

use crate::individual::InfluentialIndividual;
use crate::world::Position;

pub const MAX_AGE: usize = 100;
const CHILD_AGE_LIMIT: usize = 15;
const ELDER_AGE_START: usize = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AgeGroups {
    pub children: u64,
    pub adults: u64,
    pub elders: u64,
}

/// Head counts per age in years, `0..=MAX_AGE`. This is the only record of a
/// population's size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeDistribution {
    buckets: Vec<u64>,
}

impl AgeDistribution {
    /// Spreads `total` evenly over every age; the remainder goes to the youngest.
    pub fn uniform(total: u64) -> Self {
        let slots = (MAX_AGE + 1) as u64;
        let base = total / slots;
        let remainder = (total % slots) as usize;
        let buckets = (0..=MAX_AGE)
            .map(|age| base + u64::from(age < remainder))
            .collect();
        Self { buckets }
    }

    pub fn from_buckets(buckets: [u64; MAX_AGE + 1]) -> Self {
        Self {
            buckets: buckets.to_vec(),
        }
    }

    pub fn count(&self, age: usize) -> u64 {
        self.buckets.get(age).copied().unwrap_or(0)
    }

    pub fn buckets(&self) -> &[u64] {
        &self.buckets
    }

    /// Saturates at `u64::MAX` instead of wrapping.
    pub fn total(&self) -> u64 {
        saturating_sum(&self.buckets)
    }

    pub fn groups(&self) -> AgeGroups {
        AgeGroups {
            children: saturating_sum(&self.buckets[..CHILD_AGE_LIMIT]),
            adults: saturating_sum(&self.buckets[CHILD_AGE_LIMIT..ELDER_AGE_START]),
            elders: saturating_sum(&self.buckets[ELDER_AGE_START..]),
        }
    }

    pub fn add_newborns(&mut self, count: u64) {
        self.buckets[0] = self.buckets[0].saturating_add(count);
    }

    /// Moves every cohort up one year and seeds age 0 with `newborns`.
    /// Returns the cohort that aged past `MAX_AGE`.
    pub fn shift(&mut self, newborns: u64) -> u64 {
        let dropped = self.buckets[MAX_AGE];
        self.buckets.rotate_right(1);
        self.buckets[0] = newborns;
        dropped
    }
}

fn saturating_sum(counts: &[u64]) -> u64 {
    counts.iter().copied().fold(0, u64::saturating_add)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub year: u64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgingReport {
    pub newborns: u64,
    pub dropped: u64,
    pub census: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopulationUnit {
    id: Uuid,
    name: String,
    position: Position,
    ages: AgeDistribution,
    last_census: Option<u64>,
    health: f64,
    technology: f64,
    aggressiveness: f64,
    individuals: Vec<InfluentialIndividual>,
    history: Vec<HistoryEntry>,
}

impl PopulationUnit {
    pub fn new(name: impl Into<String>, position: Position, size: u64, aggressiveness: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position,
            ages: AgeDistribution::uniform(size),
            last_census: None,
            health: 1.0,
            technology: 0.1,
            aggressiveness,
            individuals: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn with_technology(mut self, technology: f64) -> Self {
        self.technology = technology;
        self
    }

    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health.min(1.0);
        self
    }

    pub fn with_age_distribution(mut self, ages: AgeDistribution) -> Self {
        self.ages = ages;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> u64 {
        self.ages.total()
    }

    pub fn age_distribution(&self) -> &AgeDistribution {
        &self.ages
    }

    pub fn age_groups(&self) -> AgeGroups {
        self.ages.groups()
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn technology(&self) -> f64 {
        self.technology
    }

    pub fn aggressiveness(&self) -> f64 {
        self.aggressiveness
    }

    pub fn individuals(&self) -> &[InfluentialIndividual] {
        &self.individuals
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn record(&mut self, year: u64, description: impl Into<String>) {
        self.history.push(HistoryEntry {
            year,
            description: description.into(),
        });
    }

    /// New members join the youngest cohort.
    pub fn grow(&mut self, growth: u64) {
        self.ages.add_newborns(growth);
    }

    /// Ages the population one year. Births are a fraction of the census taken
    /// at the previous aging step, so the first step adds none.
    pub fn age_one_year(&mut self, birth_rate: f64) -> AgingReport {
        let newborns = self
            .last_census
            .map(|census| (census as f64 * birth_rate).floor() as u64)
            .unwrap_or(0);
        let dropped = self.ages.shift(newborns);
        let census = self.ages.total();
        self.last_census = Some(census);
        AgingReport {
            newborns,
            dropped,
            census,
        }
    }

    pub fn raise_technology(&mut self, amount: f64) {
        self.technology += amount;
    }

    pub fn improve_health(&mut self, amount: f64) {
        self.health = (self.health + amount).min(1.0);
    }

    pub fn raise_aggressiveness(&mut self, amount: f64) {
        self.aggressiveness += amount;
    }

    /// Callers clamp through [`crate::world::World::clamp`] first.
    pub fn relocate(&mut self, position: Position) {
        self.position = position;
    }

    pub fn adopt(&mut self, individual: InfluentialIndividual) {
        self.individuals.push(individual);
    }
}
