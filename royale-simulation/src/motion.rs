//! Per-entity motion: wall pre-checks, the heading-biased random step and containment.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::arena::Arena;
use crate::entity::Entity;

/// How the heading changes when the x pre-check would leave the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BounceRule {
    /// `heading = (2 * heading + PI) mod TAU`. Not a true reflection; kept for parity
    /// with the classic battle royale motion.
    #[default]
    Doubling,
    /// `heading = (PI - heading) mod TAU`, a true mirror on the vertical walls.
    Mirror,
}

impl BounceRule {
    pub fn reflect_horizontal(self, heading: f32) -> f32 {
        match self {
            BounceRule::Doubling => (heading + heading + PI).rem_euclid(TAU),
            BounceRule::Mirror => (PI - heading).rem_euclid(TAU),
        }
    }
}

/// Mirror on the horizontal walls. Result is intentionally left unnormalised.
pub fn reflect_vertical(heading: f32) -> f32 {
    -heading + TAU
}

/// Motion parameters shared by every entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSettings {
    pub velocity_scale: f32,
    pub bounce: BounceRule,
    /// Floor applied to `delta_time` before it divides the velocity scale.
    pub min_delta_time: f32,
}

pub fn default_min_delta_time() -> f32 {
    0.001
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            velocity_scale: 0.2,
            bounce: BounceRule::default(),
            min_delta_time: default_min_delta_time(),
        }
    }
}

impl MotionSettings {
    /// Clamped delta time. NaN and non-positive values map to the floor.
    pub fn effective_delta(&self, delta_time: f32) -> f32 {
        delta_time.max(self.min_delta_time)
    }

    /// Reach of one tick: the distance the pre-checks probe and the scale of the step.
    pub fn reach(&self, delta_time: f32) -> f32 {
        self.velocity_scale / self.effective_delta(delta_time)
    }
}

fn strictly_inside(value: f32, (min, max): (f32, f32)) -> bool {
    min < value && value < max
}

/// Advance one entity by a single tick.
///
/// Returns true if either wall pre-check changed the heading.
pub fn step<R: Rng + ?Sized>(
    entity: &mut Entity,
    arena: &Arena,
    motion: &MotionSettings,
    delta_time: f32,
    rng: &mut R,
) -> bool {
    let reach = motion.reach(delta_time);
    let mut bounced = false;

    let probe_x = entity.position.x + entity.heading.cos() * reach;
    if !strictly_inside(probe_x, arena.x_range()) {
        entity.heading = motion.bounce.reflect_horizontal(entity.heading);
        bounced = true;
    }

    let probe_y = entity.position.y + entity.heading.sin() * reach;
    if !strictly_inside(probe_y, arena.y_range()) {
        entity.heading = reflect_vertical(entity.heading);
        bounced = true;
    }

    // Displacement peaks along the heading and vanishes directly against it.
    let move_dir: f32 = rng.gen_range(0.0..TAU);
    let move_size = ((entity.heading - move_dir).cos() + 1.0) * reach;

    entity.position.x += move_dir.cos() * move_size;
    entity.position.y += move_dir.sin() * move_size;
    entity.position = arena.clamp(entity.position);

    bounced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arena() -> Arena {
        Arena::new(100.0, 100.0, 8.0).unwrap()
    }

    #[test]
    fn doubling_rule_matches_reference_formula() {
        let rule = BounceRule::Doubling;
        assert!((rule.reflect_horizontal(0.0) - PI).abs() < 1e-6);
        assert!((rule.reflect_horizontal(PI / 4.0) - 3.0 * PI / 2.0).abs() < 1e-5);
        // 2 * PI + PI wraps back to PI.
        assert!((rule.reflect_horizontal(PI) - PI).abs() < 1e-5);
    }

    #[test]
    fn mirror_rule_reflects_across_vertical_wall() {
        let rule = BounceRule::Mirror;
        assert!((rule.reflect_horizontal(0.0) - PI).abs() < 1e-6);
        assert!((rule.reflect_horizontal(PI / 4.0) - 3.0 * PI / 4.0).abs() < 1e-5);
        assert!((rule.reflect_horizontal(3.0 * PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn vertical_reflection_is_not_normalised() {
        assert!((reflect_vertical(PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-6);
        assert!((reflect_vertical(0.0) - TAU).abs() < 1e-6);
    }

    #[test]
    fn degenerate_delta_uses_floor() {
        let motion = MotionSettings::default();
        assert_eq!(motion.effective_delta(0.0), motion.min_delta_time);
        assert_eq!(motion.effective_delta(-1.0), motion.min_delta_time);
        assert_eq!(motion.effective_delta(f32::NAN), motion.min_delta_time);
        assert_eq!(motion.effective_delta(0.05), 0.05);
        assert!(motion.reach(0.0).is_finite());
    }

    #[test]
    fn step_at_right_wall_turns_back_and_stays_inside() {
        let arena = arena();
        let motion = MotionSettings::default();
        let mut rng = StdRng::seed_from_u64(7);
        let (_, max_x) = arena.x_range();
        let mut entity = Entity::new(Kind::Rock, max_x, 50.0, 0.0);

        assert!(step(&mut entity, &arena, &motion, 1.0, &mut rng));
        assert!(entity.heading != 0.0);
        assert!(entity.position.x <= max_x);
    }

    #[test]
    fn step_stays_inside_for_huge_reach() {
        let arena = arena();
        let motion = MotionSettings {
            velocity_scale: 50.0,
            ..MotionSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        let mut entity = Entity::new(Kind::Paper, 50.0, 50.0, 1.0);
        for _ in 0..200 {
            step(&mut entity, &arena, &motion, 0.0, &mut rng);
            assert!(arena.contains_with_margin(entity.position));
        }
    }
}
