use crate::{
    config::SimulationConfig,
    engine::{SimulationContext, System, WorldState},
    individual::{Archetype, InfluentialIndividual},
    influence::{attempt_influence, InfluenceOutcome},
    rng::RandomSource,
};

/// Occasionally raises an influential individual who acts once and then tries
/// to sway their population.
pub struct InfluenceSystem {
    spawn_chance: f64,
}

impl InfluenceSystem {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            spawn_chance: config.spawn_chance,
        }
    }
}

impl Default for InfluenceSystem {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

impl System for InfluenceSystem {
    fn name(&self) -> &str {
        "influence"
    }

    fn run(
        &mut self,
        ctx: &mut SimulationContext,
        state: &mut WorldState,
        rng: &mut dyn RandomSource,
    ) {
        let year = ctx.year();
        for population in state.populations.iter_mut() {
            if !rng.chance(self.spawn_chance) {
                continue;
            }
            let archetype = Archetype::random(rng);
            let mut individual = InfluentialIndividual::spawn(archetype, population.name(), rng);
            population.record(year, format!("{} emerged.", individual.title()));

            let action = archetype.action_description();
            individual.perform(year, action);
            population.record(
                year,
                format!("{} took action: {action}", individual.title()),
            );

            let outcome = attempt_influence(&individual, population, &state.world, year, rng);
            match &outcome {
                InfluenceOutcome::Succeeded(effects) => tracing::debug!(
                    population = population.name(),
                    individual = %individual.title(),
                    effects = effects.len(),
                    "influence succeeded"
                ),
                InfluenceOutcome::Failed => tracing::debug!(
                    population = population.name(),
                    individual = %individual.title(),
                    "influence failed"
                ),
                InfluenceOutcome::NoBehavior => {}
            }
            population.adopt(individual);
        }
    }
}
