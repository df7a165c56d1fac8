//! Spawn counts, per-tick tallies and the win condition.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::entity::Entity;
use crate::kind::Kind;

/// Initial number of entities per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Population {
    pub rock: usize,
    pub paper: usize,
    pub scissors: usize,
}

impl Population {
    pub fn new(rock: usize, paper: usize, scissors: usize) -> Self {
        Self {
            rock,
            paper,
            scissors,
        }
    }

    pub fn get(&self, kind: Kind) -> usize {
        match kind {
            Kind::Rock => self.rock,
            Kind::Paper => self.paper,
            Kind::Scissors => self.scissors,
        }
    }

    pub fn total(&self) -> usize {
        self.rock + self.paper + self.scissors
    }

    /// Kinds in spawn order, one entry per entity.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        Kind::ALL
            .into_iter()
            .flat_map(move |kind| std::iter::repeat(kind).take(self.get(kind)))
    }
}

/// Number of entities per kind at one instant. Always derived, never stored by entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub rock: usize,
    pub paper: usize,
    pub scissors: usize,
}

impl PopulationCounts {
    pub fn tally<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Self {
        let mut counts = [0usize; 3];
        for entity in entities {
            counts[entity.kind.index()] += 1;
        }
        Self::from_array(counts)
    }

    pub fn from_array([rock, paper, scissors]: [usize; 3]) -> Self {
        Self {
            rock,
            paper,
            scissors,
        }
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.rock, self.paper, self.scissors]
    }

    pub fn get(&self, kind: Kind) -> usize {
        self.as_array()[kind.index()]
    }

    pub fn total(&self) -> usize {
        self.rock + self.paper + self.scissors
    }

    /// Number of kinds with no entity left.
    pub fn extinct_kinds(&self) -> usize {
        self.as_array().iter().filter(|&&c| c == 0).count()
    }

    /// The remaining kind once at least two kinds are extinct.
    pub fn sole_survivor(&self) -> Option<Kind> {
        if self.extinct_kinds() < 2 {
            return None;
        }
        Kind::ALL.into_iter().find(|&kind| self.get(kind) > 0)
    }

    /// Percentage of the population held by each kind, in tally order.
    pub fn shares(&self) -> [f32; 3] {
        let total = self.total();
        if total == 0 {
            return [0.0; 3];
        }
        self.as_array().map(|c| c as f32 / total as f32 * 100.0)
    }

    /// Kind with the most entities, ties resolved in tally order.
    pub fn leader(&self) -> Option<Kind> {
        let mut best: Option<Kind> = None;
        for kind in Kind::ALL {
            let count = self.get(kind);
            if count > 0 && best.map_or(true, |b| count > self.get(b)) {
                best = Some(kind);
            }
        }
        best
    }

    pub fn outcome(&self) -> Outcome {
        match self.sole_survivor() {
            Some(winner) => Outcome::Won(winner),
            None => Outcome::Running,
        }
    }
}

impl Index<Kind> for PopulationCounts {
    type Output = usize;

    fn index(&self, kind: Kind) -> &usize {
        match kind {
            Kind::Rock => &self.rock,
            Kind::Paper => &self.paper,
            Kind::Scissors => &self.scissors,
        }
    }
}

/// Whether the run continues or a single kind has taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "winner", rename_all = "lowercase")]
pub enum Outcome {
    Running,
    Won(Kind),
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Won(_))
    }

    pub fn winner(&self) -> Option<Kind> {
        match self {
            Outcome::Won(kind) => Some(*kind),
            Outcome::Running => None,
        }
    }
}
