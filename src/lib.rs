pub mod clock;
pub mod config;
pub mod engine;
pub mod events;
pub mod individual;
pub mod influence;
pub mod population;
pub mod render;
pub mod rng;
pub mod scenario;
pub mod systems;
pub mod timeline;
pub mod world;

pub use config::SimulationConfig;
pub use engine::{Simulation, SimulationBuilder, SimulationContext, TickSummary};
pub use scenario::Scenario;
