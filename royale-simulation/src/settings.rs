use std::time::Duration;

use crate::arena::Arena;
use crate::collision::CollisionResolution;
use crate::error::SimulationError;
use crate::motion::MotionSettings;

/// Everything the engine needs besides the entities themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    pub arena: Arena,
    pub motion: MotionSettings,
    pub resolution: CollisionResolution,
    /// Delta used by the first clocked tick, before a previous timestamp exists.
    pub tick_interval: Duration,
}

impl SimulationSettings {
    pub fn new(arena: Arena, motion: MotionSettings) -> Self {
        Self {
            arena,
            motion,
            resolution: CollisionResolution::default(),
            tick_interval: Duration::from_millis(50),
        }
    }

    pub fn with_resolution(mut self, resolution: CollisionResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        self.arena.validate()?;

        let velocity = self.motion.velocity_scale;
        if !velocity.is_finite() || velocity <= 0.0 {
            return Err(SimulationError::InvalidVelocity(velocity));
        }

        let min_delta = self.motion.min_delta_time;
        if !min_delta.is_finite() || min_delta <= 0.0 {
            return Err(SimulationError::InvalidMinDelta(min_delta));
        }

        Ok(())
    }
}

impl Default for SimulationSettings {
    /// The classic 350x500 arena with 8px entities.
    fn default() -> Self {
        Self::new(
            Arena {
                width: 350.0,
                height: 500.0,
                entity_radius: 8.0,
            },
            MotionSettings::default(),
        )
    }
}
