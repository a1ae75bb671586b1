use crate::{
    config::SimulationConfig,
    engine::{SimulationContext, System, WorldState},
    events::GlobalEventKind,
    rng::RandomSource,
};

const AGE_OF_TOOLS: &str =
    "The Age of Tools has begun! Populations across the world adopt advanced crafting.";

/// Cross-population checks run after every population has moved.
pub struct GlobalEventSystem {
    age_of_tools_threshold: f64,
    war_chance: f64,
    age_of_tools_reached: bool,
}

impl GlobalEventSystem {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            age_of_tools_threshold: config.age_of_tools_threshold,
            war_chance: config.war_chance,
            age_of_tools_reached: false,
        }
    }

    pub fn age_of_tools_reached(&self) -> bool {
        self.age_of_tools_reached
    }

    fn check_age_of_tools(&mut self, ctx: &mut SimulationContext, state: &mut WorldState) {
        if self.age_of_tools_reached || state.mean_technology() <= self.age_of_tools_threshold {
            return;
        }
        self.age_of_tools_reached = true;
        let year = ctx.year();
        ctx.events_mut()
            .push(year, GlobalEventKind::AgeOfTools, AGE_OF_TOOLS);
        for population in state.populations.iter_mut() {
            population.record(year, "Adopted tools as part of a global shift.");
        }
    }

    /// Attacker and defender are drawn with replacement; a self-pairing is dropped.
    fn check_war(
        &mut self,
        ctx: &mut SimulationContext,
        state: &mut WorldState,
        rng: &mut dyn RandomSource,
    ) {
        if !rng.chance(self.war_chance) || state.populations.is_empty() {
            return;
        }
        let count = state.populations.len();
        let attacker_index = rng.pick_index(count);
        let defender_index = rng.pick_index(count);
        if attacker_index == defender_index {
            return;
        }

        let year = ctx.year();
        let attacker = state.populations[attacker_index].name().to_string();
        let defender = state.populations[defender_index].name().to_string();
        ctx.events_mut().push(
            year,
            GlobalEventKind::WarDeclared {
                attacker: attacker.clone(),
                defender: defender.clone(),
            },
            format!("{attacker} declared war on {defender}!"),
        );
        state.populations[attacker_index].record(year, format!("Declared war on {defender}."));
        state.populations[defender_index].record(year, format!("Was attacked by {attacker}."));
    }
}

impl Default for GlobalEventSystem {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

impl System for GlobalEventSystem {
    fn name(&self) -> &str {
        "global_events"
    }

    fn run(
        &mut self,
        ctx: &mut SimulationContext,
        state: &mut WorldState,
        rng: &mut dyn RandomSource,
    ) {
        self.check_age_of_tools(ctx, state);
        self.check_war(ctx, state, rng);
    }
}
