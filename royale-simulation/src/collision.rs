//! Pairwise contact detection and kind conversion.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::kind::Kind;

/// Order in which conversions within one tick are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionResolution {
    /// Judge every pair on the kinds held when the phase starts, then apply all
    /// conversions in ascending pair order. Each kind has a single dominator, so
    /// every conversion aimed at one entity names the same kind and the result
    /// does not depend on enumeration order.
    #[default]
    Simultaneous,
    /// Enumerate pairs `(i, j)`, `i < j`, and convert in place. Later pairs see
    /// kinds written by earlier ones, so an entity can flip more than once per tick.
    Sequential,
}

/// A single loser-takes-winner's-kind event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub index: usize,
    pub from: Kind,
    pub to: Kind,
}

/// Outcome of a contact between `entities[i]` and `entities[j]`, if any.
fn contact(entities: &[Entity], i: usize, j: usize, contact_distance: f32) -> Option<Conversion> {
    let (a, b) = (&entities[i], &entities[j]);
    let winner = Kind::duel(a.kind, b.kind)?;
    if a.position.distance(b.position) > contact_distance {
        return None;
    }
    let (index, from) = if winner == a.kind { (j, b.kind) } else { (i, a.kind) };
    Some(Conversion {
        index,
        from,
        to: winner,
    })
}

/// Run the conversion phase over all unordered pairs and return the applied conversions.
pub fn resolve(
    entities: &mut [Entity],
    contact_distance: f32,
    resolution: CollisionResolution,
) -> Vec<Conversion> {
    let n = entities.len();
    let mut conversions = Vec::new();

    match resolution {
        CollisionResolution::Simultaneous => {
            for i in 0..n {
                for j in (i + 1)..n {
                    if let Some(conversion) = contact(entities, i, j, contact_distance) {
                        conversions.push(conversion);
                    }
                }
            }
            for conversion in &conversions {
                entities[conversion.index].kind = conversion.to;
            }
        }
        CollisionResolution::Sequential => {
            for i in 0..n {
                for j in (i + 1)..n {
                    if let Some(conversion) = contact(entities, i, j, contact_distance) {
                        entities[conversion.index].kind = conversion.to;
                        conversions.push(conversion);
                    }
                }
            }
        }
    }

    conversions
}
