//! The simulation engine: owns every entity and advances them one tick at a time.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use std::time::Instant;

use crate::collision::{self, Conversion};
use crate::entity::Entity;
use crate::error::SimulationError;
use crate::kind::Kind;
use crate::motion;
use crate::population::{Outcome, Population, PopulationCounts};
use crate::settings::SimulationSettings;
use crate::snapshot::{Snapshot, TickReport};

/// A single battle royale run.
///
/// Construction validates the settings and fails fast; `advance` never fails.
/// Every run starts `Running`, even with a single kind, and is judged after
/// each tick's motion. Once a tick's count finds a single kind the run is
/// terminal and `advance` leaves every entity untouched.
pub struct Simulation {
    settings: SimulationSettings,
    entities: Vec<Entity>,
    counts: PopulationCounts,
    outcome: Outcome,
    tick: u64,
    last_tick: Option<Instant>,
    last_conversions: Vec<Conversion>,
    rng: StdRng,
}

impl Simulation {
    /// Spawn `population` entities at random positions with random headings.
    pub fn spawn(settings: SimulationSettings, population: Population) -> Result<Self, SimulationError> {
        settings.validate()?;
        if population.total() == 0 {
            return Err(SimulationError::EmptyPopulation);
        }

        let mut rng = StdRng::from_entropy();
        let arena = settings.arena;
        let entities: Vec<Entity> = population
            .kinds()
            .map(|kind| {
                Entity::new(
                    kind,
                    rng.gen_range(0.0..arena.width),
                    rng.gen_range(0.0..arena.height),
                    rng.gen_range(0.0..TAU),
                )
            })
            .collect();

        Ok(Self::assemble(settings, entities, rng))
    }

    /// Build a run from explicitly placed entities.
    pub fn from_entities(settings: SimulationSettings, entities: Vec<Entity>) -> Result<Self, SimulationError> {
        settings.validate()?;
        if entities.is_empty() {
            return Err(SimulationError::EmptyPopulation);
        }
        if let Some((index, entity)) = entities.iter().enumerate().find(|(_, e)| !e.heading.is_finite()) {
            return Err(SimulationError::InvalidHeading {
                index,
                heading: entity.heading,
            });
        }
        if let Some((index, entity)) = entities
            .iter()
            .enumerate()
            .find(|(_, e)| !settings.arena.contains(e.position))
        {
            return Err(SimulationError::EntityOutOfBounds {
                index,
                x: entity.position.x,
                y: entity.position.y,
            });
        }

        Ok(Self::assemble(settings, entities, StdRng::from_entropy()))
    }

    fn assemble(settings: SimulationSettings, entities: Vec<Entity>, rng: StdRng) -> Self {
        let counts = PopulationCounts::tally(&entities);
        debug!(
            "Created simulation with {} entities (rock {}, paper {}, scissors {}) in a {}x{} arena",
            entities.len(),
            counts.rock,
            counts.paper,
            counts.scissors,
            settings.arena.width,
            settings.arena.height
        );
        if let Some(kind) = counts.sole_survivor() {
            debug!("Only {} is present, the first tick will decide the run", kind);
        }

        Self {
            settings,
            entities,
            counts,
            outcome: Outcome::Running,
            tick: 0,
            last_tick: None,
            last_conversions: Vec::new(),
            rng,
        }
    }

    /// Advance every entity by one tick of `delta_time` seconds.
    ///
    /// `delta_time` is floored at the configured minimum, so zero, negative or
    /// NaN deltas are treated as a very short tick.
    pub fn advance(&mut self, delta_time: f32) -> TickReport {
        self.last_conversions.clear();
        if self.outcome.is_terminal() {
            return self.report(0);
        }

        let arena = self.settings.arena;
        let motion_settings = self.settings.motion;
        let delta_time = motion_settings.effective_delta(delta_time);

        let mut bounces = 0;
        for entity in &mut self.entities {
            if motion::step(entity, &arena, &motion_settings, delta_time, &mut self.rng) {
                bounces += 1;
            }
        }
        self.tick += 1;

        self.counts = PopulationCounts::tally(&self.entities);
        if let Some(winner) = self.counts.sole_survivor() {
            self.declare_winner(winner);
            return self.report(bounces);
        }

        let conversions = collision::resolve(
            &mut self.entities,
            arena.contact_distance(),
            self.settings.resolution,
        );
        if !conversions.is_empty() {
            trace!("Tick {}: {} conversions", self.tick, conversions.len());
            self.counts = PopulationCounts::tally(&self.entities);
        }
        self.last_conversions = conversions;

        if let Some(winner) = self.counts.sole_survivor() {
            self.declare_winner(winner);
        }
        self.report(bounces)
    }

    /// Advance using wall-clock time. The delta is measured from the previous
    /// clocked tick; the first call uses the configured tick interval.
    pub fn advance_at(&mut self, now: Instant) -> TickReport {
        let delta = match self.last_tick {
            Some(previous) => now.saturating_duration_since(previous),
            None => self.settings.tick_interval,
        };
        self.last_tick = Some(now);
        self.advance(delta.as_secs_f32())
    }

    fn declare_winner(&mut self, winner: Kind) {
        self.outcome = Outcome::Won(winner);
        debug!("{} won after {} ticks", winner, self.tick);
    }

    fn report(&self, bounces: usize) -> TickReport {
        TickReport {
            tick: self.tick,
            counts: self.counts,
            outcome: self.outcome,
            conversions: self.last_conversions.len(),
            bounces,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn counts(&self) -> PopulationCounts {
        self.counts
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn winner(&self) -> Option<Kind> {
        self.outcome.winner()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Conversions applied by the most recent `advance`.
    pub fn last_conversions(&self) -> &[Conversion] {
        &self.last_conversions
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            counts: self.counts,
            outcome: self.outcome,
            entities: self.entities.clone(),
        }
    }
}
