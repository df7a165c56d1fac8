use royale_simulation::{Entity, Outcome, PopulationCounts, Snapshot};
use serde::Serialize;

/// Per-tick record written by the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRecord<'a> {
    pub tick: u64,
    pub counts: PopulationCounts,
    /// Percentage of the population held by each kind, rock/paper/scissors order.
    pub shares: [f32; 3],
    pub outcome: Outcome,
    /// Present only when entity output is enabled.
    pub entities: Option<&'a [Entity]>,
}

impl<'a> TickRecord<'a> {
    pub fn from_snapshot(snapshot: &'a Snapshot, include_entities: bool) -> Self {
        Self {
            tick: snapshot.tick,
            counts: snapshot.counts,
            shares: snapshot.counts.shares(),
            outcome: snapshot.outcome,
            entities: include_entities.then_some(snapshot.entities.as_slice()),
        }
    }
}
