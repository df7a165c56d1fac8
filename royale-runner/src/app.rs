//! The tick loop: paces the engine, hands snapshots to the analytics thread
//! and stops on a win, a tick limit or an interrupt.

use hdrhistogram::Histogram;
use log::{debug, info, log_enabled, trace, warn, Level};
use royale_config::Config;
use royale_simulation::{Outcome, PopulationCounts, Simulation, SimulationError, Snapshot};
use royale_transport::{TransportController, TransportError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::analytics::{AnalyticsReport, AnalyticsWorker};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to start simulation: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Failed to set up transport: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to start analytics thread: {0}")]
    Worker(#[from] std::io::Error),

    #[error("Analytics thread panicked")]
    WorkerPanicked,

    #[error("Failed to create tick histogram: {0}")]
    Histogram(#[from] hdrhistogram::CreationError),
}

/// Tick duration percentiles in microseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickTimings {
    pub p50_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

pub struct RunSummary {
    pub ticks: u64,
    pub outcome: Outcome,
    pub counts: PopulationCounts,
    pub timings: TickTimings,
    pub analytics: AnalyticsReport,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Won,
    TickLimit,
    Interrupted,
}

pub fn run(config: &Config, running: Arc<AtomicBool>) -> Result<RunSummary, AppError> {
    let mut sim = Simulation::spawn(config.simulation_settings(), config.population())?;
    let worker = AnalyticsWorker::spawn(TransportController::from_config(&config.output)?)?;
    let mut histogram = Histogram::<u64>::new(3)?;

    let interval = config.tick_interval();
    let mut next_tick = Instant::now() + interval;

    info!(
        "Running {} entities in a {}x{} arena every {:?}",
        config.population().total(),
        config.arena.width,
        config.arena.height,
        interval
    );

    let stop = loop {
        if !running.load(Ordering::SeqCst) {
            break Stop::Interrupted;
        }
        if config.tick.max_ticks.map_or(false, |max| sim.tick() >= max) {
            break Stop::TickLimit;
        }

        let now = Instant::now();
        if next_tick > now {
            spin_sleep::sleep(next_tick - now);
        }

        let started = Instant::now();
        let report = sim.advance_at(started);
        histogram.saturating_record(started.elapsed().as_micros() as u64);

        next_tick += interval;
        let after = Instant::now();
        if after > next_tick {
            warn!(
                "Tick {} lagged {:?} behind schedule",
                report.tick,
                after - next_tick
            );
            next_tick = after + interval;
        }

        log_tick(config, &sim, report.counts, report.tick);

        let snapshot = if config.output.include_entities {
            sim.snapshot()
        } else {
            Snapshot {
                tick: report.tick,
                counts: report.counts,
                outcome: report.outcome,
                entities: Vec::new(),
            }
        };
        if !worker.submit(snapshot) {
            warn!("Analytics thread stopped early, tick records are no longer written");
        }

        if report.outcome.is_terminal() {
            break Stop::Won;
        }
    };

    match stop {
        Stop::Won => debug!("Loop ended with a winner"),
        Stop::TickLimit => info!("Reached the limit of {} ticks", sim.tick()),
        Stop::Interrupted => info!("Interrupted after {} ticks", sim.tick()),
    }

    let analytics = worker.finish().ok_or(AppError::WorkerPanicked)?;
    let timings = if histogram.is_empty() {
        TickTimings::default()
    } else {
        TickTimings {
            p50_us: histogram.value_at_quantile(0.5),
            p99_us: histogram.value_at_quantile(0.99),
            max_us: histogram.max(),
        }
    };

    Ok(RunSummary {
        ticks: sim.tick(),
        outcome: sim.outcome(),
        counts: sim.counts(),
        timings,
        analytics,
    })
}

fn log_tick(config: &Config, sim: &Simulation, counts: PopulationCounts, tick: u64) {
    if config.debug.team_counts {
        info!(
            "Tick {}: Rock: {} Paper: {} Scissors: {}",
            tick, counts.rock, counts.paper, counts.scissors
        );
    }
    if config.debug.hitboxes {
        for conversion in sim.last_conversions() {
            debug!(
                "Tick {}: entity {} hit, {} -> {}",
                tick, conversion.index, conversion.from, conversion.to
            );
        }
    }
    if config.debug.direction && log_enabled!(Level::Trace) {
        for (index, entity) in sim.entities().iter().enumerate() {
            trace!(
                "Tick {}: entity {} {} at ({:.1}, {:.1}) heading {:.3}",
                tick,
                index,
                entity.kind,
                entity.position.x,
                entity.position.y,
                entity.heading
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use royale_config::SenderType;
    use royale_simulation::Kind;
    use std::fs;

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.tick.interval_ms = 1;
        config
    }

    #[test]
    fn single_kind_run_ends_on_first_tick() {
        let mut config = fast_config();
        config.population.rock = 0;
        config.population.paper = 0;
        config.population.scissors = 5;

        let summary = run(&config, Arc::new(AtomicBool::new(true))).unwrap();
        assert_eq!(summary.outcome, Outcome::Won(Kind::Scissors));
        assert_eq!(summary.counts.as_array(), [0, 0, 5]);
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.analytics.history.len(), 1);
    }

    #[test]
    fn tick_limit_stops_a_running_battle() {
        let mut config = fast_config();
        config.arena.width = 2000;
        config.arena.height = 2000;
        config.tick.max_ticks = Some(5);

        let summary = run(&config, Arc::new(AtomicBool::new(true))).unwrap();
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.outcome, Outcome::Running);
        assert_eq!(summary.counts.total(), 60);
        assert_eq!(summary.analytics.history.len(), 5);
        assert!(summary.timings.max_us >= summary.timings.p50_us);
    }

    #[test]
    fn cleared_flag_stops_before_any_tick() {
        let summary = run(&fast_config(), Arc::new(AtomicBool::new(false))).unwrap();
        assert_eq!(summary.ticks, 0);
        assert!(summary.analytics.history.is_empty());
    }

    #[test]
    fn records_are_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticks.jsonl");
        let mut config = fast_config();
        config.arena.width = 2000;
        config.arena.height = 2000;
        config.tick.max_ticks = Some(3);
        config.output.sender = SenderType::File;
        config.output.path = Some(path.clone());

        let summary = run(&config, Arc::new(AtomicBool::new(true))).unwrap();
        assert_eq!(summary.analytics.records_sent, 3);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
