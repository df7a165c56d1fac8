//! Rock/Paper/Scissors battle royale engine.
//!
//! Entities of three kinds wander a walled arena and convert the kind they beat
//! on contact until a single kind remains. [`Simulation`] owns the population
//! and exposes one operation, [`Simulation::advance`], plus read-only state and
//! value [`Snapshot`]s for renderers and analytics.

pub mod arena;
pub mod collision;
pub mod engine;
pub mod entity;
pub mod error;
pub mod kind;
pub mod motion;
pub mod population;
pub mod settings;
pub mod snapshot;

pub use arena::Arena;
pub use collision::{CollisionResolution, Conversion};
pub use engine::Simulation;
pub use entity::{Entity, Position};
pub use error::SimulationError;
pub use kind::Kind;
pub use motion::{BounceRule, MotionSettings};
pub use population::{Outcome, Population, PopulationCounts};
pub use settings::SimulationSettings;
pub use snapshot::{Snapshot, TickReport};

// Re-export commonly used items
pub mod prelude {
    pub use crate::{
        Arena, BounceRule, CollisionResolution, Entity, Kind, MotionSettings, Outcome, Population,
        PopulationCounts, Simulation, SimulationError, SimulationSettings, Snapshot, TickReport,
    };
}
