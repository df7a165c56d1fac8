use thiserror::Error;

/// Construction-time contract violations.
///
/// A running simulation never fails; everything that can go wrong is caught
/// when the `Simulation` is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Arena dimensions must be positive and finite, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("Entity radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Entity radius {radius} does not fit inside a {width}x{height} arena")]
    RadiusTooLarge { radius: f32, width: f32, height: f32 },

    #[error("Velocity scale must be positive and finite, got {0}")]
    InvalidVelocity(f32),

    #[error("Minimum delta time must be positive and finite, got {0}")]
    InvalidMinDelta(f32),

    #[error("Population is empty, at least one entity is required")]
    EmptyPopulation,

    #[error("Entity {index} has a non-finite heading {heading}")]
    InvalidHeading { index: usize, heading: f32 },

    #[error("Entity {index} at ({x}, {y}) lies outside the arena")]
    EntityOutOfBounds { index: usize, x: f32, y: f32 },
}
