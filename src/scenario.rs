use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    config::SimulationConfig,
    engine::{SimulationContext, WorldState},
    population::PopulationUnit,
    rng::RandomSource,
    world::{Position, World},
};

fn default_ticks() -> u64 {
    200
}

fn default_width() -> usize {
    50
}

fn default_height() -> usize {
    50
}

fn default_land_probability() -> f64 {
    0.7
}

fn default_population_size() -> u64 {
    100
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("scenario validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_year: u64,
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    #[serde(default)]
    pub world: WorldSettings,
    pub populations: Vec<ScenarioPopulation>,
    #[serde(default)]
    pub config: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSettings {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_land_probability")]
    pub land_probability: f64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            land_probability: default_land_probability(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPopulation {
    pub name: String,
    pub x: usize,
    pub y: usize,
    #[serde(default = "default_population_size")]
    pub size: u64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "first_tribes".into(),
            description: Some("Two tribes on an unexplored continent".into()),
            start_year: 0,
            ticks: default_ticks(),
            world: WorldSettings::default(),
            populations: vec![
                ScenarioPopulation {
                    name: "Stonewalkers".into(),
                    x: 5,
                    y: 5,
                    size: 150,
                },
                ScenarioPopulation {
                    name: "Skytribe".into(),
                    x: 10,
                    y: 10,
                    size: 200,
                },
            ],
            config: SimulationConfig::default(),
        }
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path).map_err(|source| ScenarioError::Io {
            path: path.clone(),
            source,
        })?;
        let scenario = Scenario::from_yaml(&data)?;
        tracing::debug!(scenario = %scenario.name, path = %path.display(), "loaded scenario");
        Ok(scenario)
    }
}

impl Scenario {
    pub fn from_yaml(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_yaml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ScenarioError::Validation(
                "world width and height must be greater than zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.world.land_probability) {
            return Err(ScenarioError::Validation(format!(
                "land_probability {} is outside [0, 1]",
                self.world.land_probability
            )));
        }
        for (field, value) in self.config.probabilities() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScenarioError::Validation(format!(
                    "{field} {value} is outside [0, 1]"
                )));
            }
        }

        let mut names = HashSet::new();
        for population in &self.populations {
            if !names.insert(population.name.as_str()) {
                return Err(ScenarioError::Validation(format!(
                    "population '{}' defined more than once",
                    population.name
                )));
            }
            if population.x >= self.world.width || population.y >= self.world.height {
                return Err(ScenarioError::Validation(format!(
                    "population '{}' at ({}, {}) lies outside the {}x{} world",
                    population.name,
                    population.x,
                    population.y,
                    self.world.width,
                    self.world.height
                )));
            }
        }
        Ok(())
    }

    /// Generates the grid, then seeds each population with a random temperament.
    pub fn build_state(&self, rng: &mut dyn RandomSource) -> Result<WorldState, ScenarioError> {
        self.validate()?;
        let world = World::generate(
            self.world.width,
            self.world.height,
            self.world.land_probability,
            rng,
        );
        let populations = self
            .populations
            .iter()
            .map(|p| {
                let aggressiveness = rng.next_f64();
                PopulationUnit::new(p.name.clone(), Position::new(p.x, p.y), p.size, aggressiveness)
            })
            .collect();
        Ok(WorldState::new(world, populations))
    }

    pub fn context(&self) -> SimulationContext {
        SimulationContext::starting_at(self.start_year)
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.unwrap_or(self.ticks)
    }
}
