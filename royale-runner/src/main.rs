mod analytics;
mod app;
mod cli;

use clap::Parser;
use env_logger::Env;
use log::{error, info};
use royale_simulation::{Kind, Outcome};
use royale_transport::PopulationHistory;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::app::RunSummary;
use crate::cli::Args;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            process::exit(1);
        }
    };
    if let Some(path) = &args.config {
        info!("Using configuration from {}", path.display());
    }

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst)) {
        error!("Failed to install Ctrl+C handler: {}", e);
    }

    let summary = match app::run(&config, running) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Simulation failed: {}", e);
            process::exit(1);
        }
    };

    report(&summary);
    if config.debug.graph {
        report_history(&summary.analytics.history);
    }
    if summary.analytics.send_errors > 0 {
        process::exit(2);
    }
}

fn report(summary: &RunSummary) {
    match summary.outcome {
        Outcome::Won(kind) => info!("{} WINS after {} ticks", kind, summary.ticks),
        Outcome::Running => info!(
            "Stopped after {} ticks without a winner: Rock: {} Paper: {} Scissors: {}",
            summary.ticks, summary.counts.rock, summary.counts.paper, summary.counts.scissors
        ),
    }
    info!(
        "Tick time p50 {}us, p99 {}us, max {}us; {} records written",
        summary.timings.p50_us,
        summary.timings.p99_us,
        summary.timings.max_us,
        summary.analytics.records_sent
    );
}

fn report_history(history: &PopulationHistory) {
    let Some(latest) = history.latest() else {
        info!("No population history recorded");
        return;
    };

    let shares = latest.counts.shares();
    info!(
        "History: {} samples, {} lead changes, final shares Rock {:.1}% Paper {:.1}% Scissors {:.1}%",
        history.len(),
        history.lead_changes(),
        shares[Kind::Rock.index()],
        shares[Kind::Paper.index()],
        shares[Kind::Scissors.index()]
    );
    for kind in Kind::ALL {
        if let Some((tick, count)) = history.peak(kind) {
            info!("{} peaked at {} on tick {}", kind, count, tick);
        }
    }
}
