//! Arena bounds and the containment margin derived from the entity radius.

use crate::entity::Position;
use crate::error::SimulationError;

/// Rectangular arena `[0, width] x [0, height]` plus the radius shared by all entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub entity_radius: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32, entity_radius: f32) -> Result<Self, SimulationError> {
        let arena = Self {
            width,
            height,
            entity_radius,
        };
        arena.validate()?;
        Ok(arena)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(SimulationError::InvalidArena {
                width: self.width,
                height: self.height,
            });
        }
        if !positive(self.entity_radius) {
            return Err(SimulationError::InvalidRadius(self.entity_radius));
        }
        // The allowed band [r/2, dim - r/2] must be non-empty on both axes.
        if self.entity_radius >= self.width || self.entity_radius >= self.height {
            return Err(SimulationError::RadiusTooLarge {
                radius: self.entity_radius,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Distance kept between an entity centre and each wall.
    pub fn margin(&self) -> f32 {
        self.entity_radius / 2.0
    }

    pub fn x_range(&self) -> (f32, f32) {
        (self.margin(), self.width - self.margin())
    }

    pub fn y_range(&self) -> (f32, f32) {
        (self.margin(), self.height - self.margin())
    }

    /// Contact distance between two entity centres.
    pub fn contact_distance(&self) -> f32 {
        2.0 * self.entity_radius
    }

    /// True if `pos` lies inside the full arena rectangle.
    pub fn contains(&self, pos: Position) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }

    /// True if `pos` lies inside the band entities are kept in after each tick.
    pub fn contains_with_margin(&self, pos: Position) -> bool {
        let (min_x, max_x) = self.x_range();
        let (min_y, max_y) = self.y_range();
        (min_x..=max_x).contains(&pos.x) && (min_y..=max_y).contains(&pos.y)
    }

    pub fn clamp(&self, pos: Position) -> Position {
        let (min_x, max_x) = self.x_range();
        let (min_y, max_y) = self.y_range();
        Position::new(pos.x.clamp(min_x, max_x), pos.y.clamp(min_y, max_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(matches!(
            Arena::new(0.0, 100.0, 8.0),
            Err(SimulationError::InvalidArena { .. })
        ));
        assert!(matches!(
            Arena::new(100.0, f32::NAN, 8.0),
            Err(SimulationError::InvalidArena { .. })
        ));
        assert!(matches!(
            Arena::new(100.0, 100.0, -1.0),
            Err(SimulationError::InvalidRadius(_))
        ));
        assert!(matches!(
            Arena::new(100.0, 6.0, 8.0),
            Err(SimulationError::RadiusTooLarge { .. })
        ));
    }

    #[test]
    fn clamp_keeps_half_radius_margin() {
        let arena = Arena::new(100.0, 50.0, 8.0).unwrap();
        let p = arena.clamp(Position::new(-3.0, 70.0));
        assert_eq!(p, Position::new(4.0, 46.0));
        assert!(arena.contains_with_margin(p));

        let inside = Position::new(20.0, 20.0);
        assert_eq!(arena.clamp(inside), inside);
    }

    #[test]
    fn contains_uses_full_rectangle() {
        let arena = Arena::new(100.0, 50.0, 8.0).unwrap();
        assert!(arena.contains(Position::new(0.0, 0.0)));
        assert!(arena.contains(Position::new(100.0, 50.0)));
        assert!(!arena.contains(Position::new(100.5, 10.0)));
        assert!(!arena.contains_with_margin(Position::new(1.0, 10.0)));
    }
}
