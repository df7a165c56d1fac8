//! Background consumer of snapshots: writes tick records and accumulates the
//! population history without ever touching the engine.

use crossbeam_channel::{unbounded, Sender};
use log::{debug, error};
use royale_simulation::Snapshot;
use royale_transport::{PopulationHistory, TransportController};
use std::io;
use std::thread::{self, JoinHandle};

/// What the analytics thread produced over a run.
pub struct AnalyticsReport {
    pub history: PopulationHistory,
    pub records_sent: u64,
    pub send_errors: usize,
}

pub struct AnalyticsWorker {
    snapshots: Sender<Snapshot>,
    handle: JoinHandle<AnalyticsReport>,
}

impl AnalyticsWorker {
    pub fn spawn(mut controller: TransportController) -> io::Result<Self> {
        // Unbounded so a slow writer queues snapshots instead of stalling the tick loop.
        let (snapshots, receiver) = unbounded::<Snapshot>();

        let handle = thread::Builder::new()
            .name("analytics".to_string())
            .spawn(move || {
                let mut history = PopulationHistory::new();
                let mut send_errors = 0;

                for snapshot in receiver.iter() {
                    history.record(snapshot.tick, snapshot.counts);
                    if let Err(e) = controller.send_snapshot(&snapshot) {
                        error!("Failed to send tick {}: {}", snapshot.tick, e);
                        send_errors += 1;
                    }
                }

                if let Err(e) = controller.flush() {
                    error!("Failed to flush tick records: {}", e);
                    send_errors += 1;
                }
                debug!("Analytics worker finished after {} snapshots", history.len());

                AnalyticsReport {
                    history,
                    records_sent: controller.records_sent(),
                    send_errors,
                }
            })?;

        Ok(Self { snapshots, handle })
    }

    /// Queue a snapshot. Returns false if the worker has already stopped.
    pub fn submit(&self, snapshot: Snapshot) -> bool {
        self.snapshots.send(snapshot).is_ok()
    }

    /// Close the queue and wait for every pending snapshot to be processed.
    pub fn finish(self) -> Option<AnalyticsReport> {
        drop(self.snapshots);
        self.handle.join().ok()
    }
}
