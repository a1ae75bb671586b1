use crate::{
    config::SimulationConfig,
    engine::{SimulationContext, System, WorldState},
    rng::RandomSource,
};

/// Food-driven growth followed by one year of aging.
pub struct DemographySystem {
    growth_rate: f64,
    birth_rate: f64,
    default_food_factor: f64,
}

impl DemographySystem {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            growth_rate: config.growth_rate,
            birth_rate: config.birth_rate,
            default_food_factor: config.default_food_factor,
        }
    }
}

impl Default for DemographySystem {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

impl System for DemographySystem {
    fn name(&self) -> &str {
        "demography"
    }

    fn run(
        &mut self,
        ctx: &mut SimulationContext,
        state: &mut WorldState,
        _rng: &mut dyn RandomSource,
    ) {
        let year = ctx.year();
        for population in state.populations.iter_mut() {
            let factor = state
                .world
                .cell_at(population.position())
                .map(|cell| cell.food_availability)
                .unwrap_or(self.default_food_factor);
            let growth = (population.size() as f64 * factor * self.growth_rate).floor() as u64;
            population.grow(growth);
            population.record(year, format!("Grew by {growth} individuals."));

            let aging = population.age_one_year(self.birth_rate);
            tracing::trace!(
                population = population.name(),
                year,
                growth,
                newborns = aging.newborns,
                dropped = aging.dropped,
                size = aging.census,
                "demography step"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::{AgeDistribution, PopulationUnit, MAX_AGE};
    use crate::rng::ScriptedRandom;
    use crate::world::{Position, World};

    fn state_with(food: f64, position: Position, size: u64) -> WorldState {
        // land, food, predators, biome
        let mut rng = ScriptedRandom::new(vec![0.1, food, 0.0, 0.0]);
        let world = World::generate(4, 4, 0.7, &mut rng);
        WorldState::new(
            world,
            vec![PopulationUnit::new("Stonewalkers", position, size, 0.2)],
        )
    }

    #[test]
    fn growth_scales_with_food() {
        let mut state = state_with(0.8, Position::new(1, 1), 1_000);
        let mut system = DemographySystem::default();
        let mut ctx = SimulationContext::starting_at(1);
        system.run(&mut ctx, &mut state, &mut ScriptedRandom::constant(0.0));
        let pop = &state.populations[0];
        assert_eq!(pop.history()[0].description, "Grew by 8 individuals.");
        assert_eq!(pop.history()[0].year, 1);
    }

    #[test]
    fn zero_growth_is_still_logged() {
        let mut state = state_with(0.3, Position::new(0, 0), 20);
        DemographySystem::default().run(
            &mut SimulationContext::new(),
            &mut state,
            &mut ScriptedRandom::constant(0.0),
        );
        assert_eq!(
            state.populations[0].history()[0].description,
            "Grew by 0 individuals."
        );
    }

    #[test]
    fn off_grid_population_uses_default_food() {
        let mut state = state_with(0.9, Position::new(0, 0), 1_000);
        state.populations[0].relocate(Position::new(40, 40));
        DemographySystem::default().run(
            &mut SimulationContext::new(),
            &mut state,
            &mut ScriptedRandom::constant(0.0),
        );
        assert_eq!(
            state.populations[0].history()[0].description,
            "Grew by 5 individuals."
        );
    }

    #[test]
    fn aging_conserves_people() {
        let mut buckets = [3u64; MAX_AGE + 1];
        buckets[MAX_AGE] = 40;
        let mut state = state_with(0.0, Position::new(2, 2), 0);
        state.populations[0] = state.populations[0]
            .clone()
            .with_age_distribution(AgeDistribution::from_buckets(buckets));
        let mut system = DemographySystem::default();
        let mut ctx = SimulationContext::new();
        let mut rng = ScriptedRandom::constant(0.0);

        for _ in 0..5 {
            let before = state.populations[0].age_distribution().clone();
            system.run(&mut ctx, &mut state, &mut rng);
            let after = state.populations[0].age_distribution();
            let newborns = after.count(0);
            assert_eq!(after.total(), before.total() - before.count(MAX_AGE) + newborns);
        }
    }

    fn logged_growth(population: &PopulationUnit) -> u64 {
        population.history()[0]
            .description
            .strip_prefix("Grew by ")
            .and_then(|rest| rest.strip_suffix(" individuals."))
            .and_then(|n| n.parse().ok())
            .expect("growth entry")
    }

    #[test]
    fn growth_follows_food_and_never_shrinks_population() {
        let config = SimulationConfig {
            birth_rate: 0.0,
            ..SimulationConfig::default()
        };
        for per_age in [1u64, 7, 30, 250] {
            // age 100 stays empty so aging drops nobody
            let mut buckets = [per_age; MAX_AGE + 1];
            buckets[MAX_AGE] = 0;
            let ages = AgeDistribution::from_buckets(buckets);
            let before = ages.total();

            for food in [0.0, 0.2, 0.5, 0.99] {
                let mut state = state_with(food, Position::new(3, 3), 0);
                state.populations[0] = state.populations[0]
                    .clone()
                    .with_age_distribution(ages.clone());
                DemographySystem::new(&config).run(
                    &mut SimulationContext::new(),
                    &mut state,
                    &mut ScriptedRandom::constant(0.0),
                );

                let pop = &state.populations[0];
                let growth = logged_growth(pop);
                assert_eq!(growth, (before as f64 * food * 0.01).floor() as u64);
                assert_eq!(pop.size(), before + growth);
                assert!(pop.size() >= before);
                assert_eq!(pop.age_distribution().count(1), per_age + growth);
            }
        }
    }

    #[test]
    fn off_grid_growth_uses_configured_default() {
        let config = SimulationConfig {
            default_food_factor: 0.2,
            ..SimulationConfig::default()
        };
        let mut state = state_with(0.9, Position::new(0, 0), 1_000);
        state.populations[0].relocate(Position::new(9, 0));
        DemographySystem::new(&config).run(
            &mut SimulationContext::new(),
            &mut state,
            &mut ScriptedRandom::constant(0.0),
        );
        assert_eq!(logged_growth(&state.populations[0]), 2);
    }
}
