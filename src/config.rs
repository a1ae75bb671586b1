use serde::{Deserialize, Serialize};

fn default_growth_rate() -> f64 {
    0.01
}

fn default_birth_rate() -> f64 {
    0.02
}

fn default_spawn_chance() -> f64 {
    0.01
}

fn default_war_chance() -> f64 {
    0.01
}

fn default_age_of_tools_threshold() -> f64 {
    0.5
}

fn default_food_factor() -> f64 {
    0.5
}

/// Rates and thresholds applied every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fraction of size added per tick, scaled by the cell's food availability.
    #[serde(default = "default_growth_rate")]
    pub growth_rate: f64,
    /// Newborns per tick as a fraction of the previous census.
    #[serde(default = "default_birth_rate")]
    pub birth_rate: f64,
    #[serde(default = "default_spawn_chance")]
    pub spawn_chance: f64,
    #[serde(default = "default_war_chance")]
    pub war_chance: f64,
    #[serde(default = "default_age_of_tools_threshold")]
    pub age_of_tools_threshold: f64,
    /// Used in place of food availability when a population stands off the grid.
    #[serde(default = "default_food_factor")]
    pub default_food_factor: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            growth_rate: default_growth_rate(),
            birth_rate: default_birth_rate(),
            spawn_chance: default_spawn_chance(),
            war_chance: default_war_chance(),
            age_of_tools_threshold: default_age_of_tools_threshold(),
            default_food_factor: default_food_factor(),
        }
    }
}

impl SimulationConfig {
    /// Name and value of every field that must be a probability.
    pub fn probabilities(&self) -> [(&'static str, f64); 4] {
        [
            ("spawn_chance", self.spawn_chance),
            ("war_chance", self.war_chance),
            ("default_food_factor", self.default_food_factor),
            ("birth_rate", self.birth_rate),
        ]
    }
}
