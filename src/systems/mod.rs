mod demography;
mod global_events;
mod influence;

pub use demography::DemographySystem;
pub use global_events::GlobalEventSystem;
pub use influence::InfluenceSystem;
