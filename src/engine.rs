use std::time::Instant;

use serde::Serialize;

use crate::{
    clock::WorldClock,
    config::SimulationConfig,
    events::EventLog,
    population::PopulationUnit,
    render::Renderer,
    rng::{RandomSource, SimRng},
    systems::{DemographySystem, GlobalEventSystem, InfluenceSystem},
    world::World,
};

/// Everything a system may mutate during a tick.
pub struct WorldState {
    pub world: World,
    pub populations: Vec<PopulationUnit>,
}

impl WorldState {
    pub fn new(world: World, populations: Vec<PopulationUnit>) -> Self {
        Self { world, populations }
    }

    /// Saturates at `u64::MAX`.
    pub fn total_population(&self) -> u64 {
        self.populations
            .iter()
            .map(PopulationUnit::size)
            .fold(0, u64::saturating_add)
    }

    /// Zero when there are no populations.
    pub fn mean_technology(&self) -> f64 {
        if self.populations.is_empty() {
            return 0.0;
        }
        let total: f64 = self.populations.iter().map(PopulationUnit::technology).sum();
        total / self.populations.len() as f64
    }

    pub fn population(&self, name: &str) -> Option<&PopulationUnit> {
        self.populations.iter().find(|p| p.name() == name)
    }
}

/// Clock and global event log, owned by the driver and handed to every tick.
#[derive(Debug, Default)]
pub struct SimulationContext {
    clock: WorldClock,
    events: EventLog,
}

impl SimulationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(year: u64) -> Self {
        Self {
            clock: WorldClock::new(year),
            events: EventLog::new(),
        }
    }

    pub fn clock(&self) -> &WorldClock {
        &self.clock
    }

    pub fn year(&self) -> u64 {
        self.clock.current_year()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.events
    }
}

pub trait System {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &mut SimulationContext,
        state: &mut WorldState,
        rng: &mut dyn RandomSource,
    );
}

#[derive(Clone, Debug, Serialize)]
pub struct SystemRunReport {
    pub name: String,
    pub duration_ms: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct TickSummary {
    pub year: u64,
    pub total_population: u64,
    pub mean_technology: f64,
    pub global_events: usize,
    pub system_reports: Vec<SystemRunReport>,
}

pub struct SimulationBuilder {
    state: WorldState,
    systems: Vec<Box<dyn System>>,
    rng: Option<Box<dyn RandomSource>>,
}

impl SimulationBuilder {
    pub fn new(state: WorldState) -> Self {
        Self {
            state,
            systems: Vec::new(),
            rng: None,
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    /// Growth and aging, then spawning and influence, then global events.
    pub fn with_standard_systems(self, config: &SimulationConfig) -> Self {
        self.with_system(DemographySystem::new(config))
            .with_system(InfluenceSystem::new(config))
            .with_system(GlobalEventSystem::new(config))
    }

    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn build(self) -> Simulation {
        Simulation {
            state: self.state,
            systems: self.systems,
            rng: self
                .rng
                .unwrap_or_else(|| Box::new(SimRng::from_entropy())),
        }
    }
}

pub struct Simulation {
    state: WorldState,
    systems: Vec<Box<dyn System>>,
    rng: Box<dyn RandomSource>,
}

impl Simulation {
    /// Advances the clock one year and runs every system in order.
    pub fn tick(&mut self, ctx: &mut SimulationContext) -> TickSummary {
        ctx.clock.advance(1);
        let mut system_reports = Vec::with_capacity(self.systems.len());
        for system in &mut self.systems {
            let start = Instant::now();
            system.run(ctx, &mut self.state, &mut *self.rng);
            system_reports.push(SystemRunReport {
                name: system.name().to_string(),
                duration_ms: start.elapsed().as_secs_f64() * 1_000.0,
            });
        }
        TickSummary {
            year: ctx.year(),
            total_population: self.state.total_population(),
            mean_technology: self.state.mean_technology(),
            global_events: ctx.events().len(),
            system_reports,
        }
    }

    pub fn run(&mut self, ctx: &mut SimulationContext, ticks: u64) {
        self.run_with_hook(ctx, ticks, |_| {});
    }

    pub fn run_with_hook<F>(&mut self, ctx: &mut SimulationContext, ticks: u64, mut hook: F)
    where
        F: FnMut(&TickSummary),
    {
        for _ in 0..ticks {
            let summary = self.tick(ctx);
            hook(&summary);
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(&self.state.world, &self.state.populations);
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn world(&self) -> &World {
        &self.state.world
    }

    pub fn populations(&self) -> &[PopulationUnit] {
        &self.state.populations
    }

    pub fn population(&self, name: &str) -> Option<&PopulationUnit> {
        self.state.population(name)
    }
}
