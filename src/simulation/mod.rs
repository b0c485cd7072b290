//! Star → planet orbital mechanics, free of any rendering concern.

pub mod body;
pub mod driver;
pub mod gravity;
pub mod integrator;
pub mod state;
pub mod trail;

pub use body::BodyRef;
pub use driver::tick;
pub use state::{Phase, SimulationState};
