//! The three entity kinds and their cyclic dominance table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an entity. Paper beats Rock, Rock beats Scissors, Scissors beats Paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Rock,
    Paper,
    Scissors,
}

impl Kind {
    /// All kinds in tally order.
    pub const ALL: [Kind; 3] = [Kind::Rock, Kind::Paper, Kind::Scissors];

    /// Position of this kind in per-kind arrays.
    pub fn index(self) -> usize {
        match self {
            Kind::Rock => 0,
            Kind::Paper => 1,
            Kind::Scissors => 2,
        }
    }

    /// True if touching `other` converts `other` into `self`.
    pub fn beats(self, other: Kind) -> bool {
        matches!(
            (self, other),
            (Kind::Paper, Kind::Rock) | (Kind::Rock, Kind::Scissors) | (Kind::Scissors, Kind::Paper)
        )
    }

    /// The one kind that converts this kind on contact.
    pub fn dominator(self) -> Kind {
        match self {
            Kind::Rock => Kind::Paper,
            Kind::Paper => Kind::Scissors,
            Kind::Scissors => Kind::Rock,
        }
    }

    /// Winner of a contact between `a` and `b`, `None` when they are the same kind.
    pub fn duel(a: Kind, b: Kind) -> Option<Kind> {
        if a == b {
            None
        } else if a.beats(b) {
            Some(a)
        } else {
            Some(b)
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Rock => "ROCK",
            Kind::Paper => "PAPER",
            Kind::Scissors => "SCISSORS",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
