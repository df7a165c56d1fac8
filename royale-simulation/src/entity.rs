use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::kind::Kind;

/// Position of an entity centre in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn distance(self, other: Position) -> f32 {
        self.as_vec2().distance(other.as_vec2())
    }
}

/// A single mobile entity. Identity is its index in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: Kind,
    pub position: Position,
    /// Heading in radians. Not normalised after a vertical bounce.
    pub heading: f32,
}

impl Entity {
    pub fn new(kind: Kind, x: f32, y: f32, heading: f32) -> Self {
        Self {
            kind,
            position: Position::new(x, y),
            heading,
        }
    }
}
