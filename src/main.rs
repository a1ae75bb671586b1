use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use chronicle::{
    events::{EventFilter, EventLog},
    population::PopulationUnit,
    render::{self, AsciiRenderer},
    rng::SimRng,
    scenario::{Scenario, ScenarioLoader},
    timeline, SimulationBuilder,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Procedural world history simulator")]
struct Cli {
    /// Path to a scenario YAML file (built-in two-tribe scenario when omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Print the final world map
    #[arg(long)]
    map: bool,

    /// Population whose history should be printed
    #[arg(long)]
    population: Option<String>,

    /// Number of history entries to print, newest first
    #[arg(long, default_value_t = timeline::DEFAULT_HISTORY_LIMIT)]
    history: usize,

    /// Global event kind to show
    #[arg(long, value_enum, default_value_t = EventKindArg::All)]
    event_kind: EventKindArg,

    #[arg(long)]
    from_year: Option<u64>,

    #[arg(long)]
    to_year: Option<u64>,

    /// Emit the final state as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EventKindArg {
    All,
    AgeOfTools,
    War,
}

impl EventKindArg {
    fn label(self) -> Option<&'static str> {
        match self {
            EventKindArg::All => None,
            EventKindArg::AgeOfTools => Some("age-of-tools"),
            EventKindArg::War => Some("war"),
        }
    }
}

impl Cli {
    fn event_filter(&self) -> EventFilter {
        EventFilter {
            kind: self.event_kind.label().map(str::to_string),
            from_year: self.from_year,
            to_year: self.to_year,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    scenario: &'a str,
    year: u64,
    populations: &'a [PopulationUnit],
    events: &'a EventLog,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chronicle=info")),
        )
        .init();

    let cli = Cli::parse();
    let scenario = match &cli.scenario {
        Some(path) => ScenarioLoader::new(".")
            .load(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => Scenario::default(),
    };
    let ticks = scenario.ticks(cli.ticks);

    let mut rng = SimRng::from_entropy();
    let state = scenario
        .build_state(&mut rng)
        .context("Failed to build world")?;
    let mut simulation = SimulationBuilder::new(state)
        .with_standard_systems(&scenario.config)
        .with_rng(rng)
        .build();
    let mut ctx = scenario.context();

    tracing::info!(scenario = %scenario.name, ticks, "starting simulation");
    simulation.run(&mut ctx, ticks);

    if cli.json {
        let report = Report {
            scenario: &scenario.name,
            year: ctx.year(),
            populations: simulation.populations(),
            events: ctx.events(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if cli.map {
        let mut renderer = AsciiRenderer::new();
        simulation.render(&mut renderer);
        print!("{}", renderer.frame());
        print!("{}", render::legend());
    }

    if let Some(name) = &cli.population {
        let population = simulation
            .population(name)
            .with_context(|| format!("No population named '{name}'"))?;
        print!("{}", timeline::population_summary(population));
        print!("{}", timeline::population_history(population.history(), cli.history));
    }

    let filter = cli.event_filter();
    print!("{}", timeline::global_timeline(ctx.events(), &filter));
    println!(
        "Scenario '{}' completed for {} ticks. Year {}, total population: {}",
        scenario.name,
        ticks,
        ctx.year(),
        simulation.state().total_population()
    );
    Ok(())
}
