use serde::Serialize;

use crate::entity::Entity;
use crate::population::{Outcome, PopulationCounts};

/// Summary of one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub counts: PopulationCounts,
    pub outcome: Outcome,
    /// Conversions applied during this tick.
    pub conversions: usize,
    /// Entities whose heading was changed by a wall pre-check.
    pub bounces: usize,
}

/// Value copy of the engine state after a tick, safe to hand to other threads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub counts: PopulationCounts,
    pub outcome: Outcome,
    pub entities: Vec<Entity>,
}

impl Snapshot {
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }
}
