//! Serialization and transport of per-tick simulation records, plus the
//! population history kept for analytics.

mod history;
mod record;
mod sender;
mod serializer;

use royale_config::{OutputConfig, SenderType, SerializerType};
use royale_simulation::Snapshot;

// Re-export types
pub use self::history::{HistorySample, PopulationHistory};
pub use self::record::TickRecord;
pub use self::sender::{FileSender, NullSender, Sender, StdioSender, TransportError};
pub use self::serializer::{
    BinarySerializer, JsonSerializer, SerializationError, SerializeObject, Serializer,
};

/// Controller for handling serialization and transport of simulation data
pub struct TransportController {
    serializer: Box<dyn Serializer>,
    sender: Box<dyn Sender>,
    frequency: u32,
    include_entities: bool,
    records_sent: u64,
}

impl TransportController {
    /// Create a new transport controller with the provided serializer and sender
    pub fn new(serializer: Box<dyn Serializer>, sender: Box<dyn Sender>) -> Self {
        Self {
            serializer,
            sender,
            frequency: 1,
            include_entities: false,
            records_sent: 0,
        }
    }

    /// Create a transport controller from configuration
    pub fn from_config(config: &OutputConfig) -> Result<Self, TransportError> {
        let serializer: Box<dyn Serializer> = match config.serializer {
            SerializerType::Json => Box::new(JsonSerializer),
            SerializerType::Binary => Box::new(BinarySerializer),
        };

        let sender: Box<dyn Sender> = match config.sender {
            SenderType::Stdio => Box::new(StdioSender::new()),
            SenderType::File => match &config.path {
                Some(path) => Box::new(FileSender::new(path)?),
                None => {
                    return Err(TransportError::ConfigurationError(
                        "File sender requires an output path".to_string(),
                    ))
                }
            },
            SenderType::Null => Box::new(NullSender),
        };

        if config.frequency == 0 {
            return Err(TransportError::ConfigurationError(
                "Output frequency must be greater than 0".to_string(),
            ));
        }

        Ok(Self::new(serializer, sender)
            .with_frequency(config.frequency)
            .with_entities(config.include_entities))
    }

    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency.max(1);
        self
    }

    pub fn with_entities(mut self, include_entities: bool) -> Self {
        self.include_entities = include_entities;
        self
    }

    /// Serialize and send a snapshot if its tick is due. Terminal snapshots are always sent.
    ///
    /// Returns true if the snapshot was written.
    pub fn send_snapshot(&mut self, snapshot: &Snapshot) -> Result<bool, TransportError> {
        let due = snapshot.tick % u64::from(self.frequency) == 0;
        if !due && !snapshot.is_terminal() {
            return Ok(false);
        }

        let record = TickRecord::from_snapshot(snapshot, self.include_entities);
        let mut data = self.serializer.serialize_to_bytes(&record)?;
        if self.serializer.line_delimited() {
            data.push(b'\n');
        }
        self.sender.send(&data)?;
        self.records_sent += 1;

        Ok(true)
    }

    /// Flush the sender to ensure data is written
    pub fn flush(&mut self) -> Result<(), TransportError> {
        self.sender.flush()
    }

    pub fn records_sent(&self) -> u64 {
        self.records_sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use royale_simulation::{Entity, Kind, Outcome, PopulationCounts};
    use std::fs;
    use std::path::PathBuf;

    fn snapshot(tick: u64, counts: [usize; 3]) -> Snapshot {
        let counts = PopulationCounts::from_array(counts);
        Snapshot {
            tick,
            counts,
            outcome: counts.outcome(),
            entities: vec![Entity::new(Kind::Rock, 1.0, 2.0, 0.5)],
        }
    }

    fn file_config(path: PathBuf) -> OutputConfig {
        OutputConfig {
            sender: SenderType::File,
            path: Some(path),
            ..OutputConfig::default()
        }
    }

    #[test]
    fn json_lines_hold_one_record_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticks.jsonl");
        let mut controller = TransportController::from_config(&file_config(path.clone())).unwrap();

        controller.send_snapshot(&snapshot(1, [2, 1, 1])).unwrap();
        controller.send_snapshot(&snapshot(2, [0, 4, 0])).unwrap();
        controller.flush().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["tick"], 1);
        assert_eq!(first["counts"]["rock"], 2);
        assert_eq!(first["outcome"]["status"], "running");
        assert!(first["entities"].is_null());

        let last: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(last["outcome"]["winner"], "paper");
        assert_eq!(controller.records_sent(), 2);
    }

    #[test]
    fn frequency_skips_ticks_but_never_the_terminal_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = file_config(dir.path().join("ticks.jsonl"));
        config.frequency = 5;
        let mut controller = TransportController::from_config(&config).unwrap();

        let sent: Vec<bool> = (1..=7)
            .map(|tick| controller.send_snapshot(&snapshot(tick, [1, 1, 1])).unwrap())
            .collect();
        assert_eq!(sent, vec![false, false, false, false, true, false, false]);

        assert!(controller.send_snapshot(&snapshot(8, [0, 0, 3])).unwrap());
        assert_eq!(controller.records_sent(), 2);
    }

    #[test]
    fn entities_are_included_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticks.jsonl");
        let mut config = file_config(path.clone());
        config.include_entities = true;
        let mut controller = TransportController::from_config(&config).unwrap();

        controller.send_snapshot(&snapshot(1, [1, 1, 0])).unwrap();
        controller.flush().unwrap();

        let record: serde_json::Value =
            serde_json::from_str(fs::read_to_string(&path).unwrap().trim()).unwrap();
        assert_eq!(record["entities"][0]["kind"], "rock");
        assert_eq!(record["entities"][0]["position"]["y"], 2.0);
    }

    #[test]
    fn binary_records_are_written_without_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticks.bin");
        let mut config = file_config(path.clone());
        config.serializer = SerializerType::Binary;
        let mut controller = TransportController::from_config(&config).unwrap();

        let snap = snapshot(3, [1, 2, 0]);
        controller.send_snapshot(&snap).unwrap();
        controller.flush().unwrap();

        let expected = bincode::serialize(&TickRecord::from_snapshot(&snap, false)).unwrap();
        assert_eq!(fs::read(&path).unwrap(), expected);
    }

    #[test]
    fn file_sender_without_path_is_rejected() {
        let config = OutputConfig {
            sender: SenderType::File,
            ..OutputConfig::default()
        };
        assert!(matches!(
            TransportController::from_config(&config),
            Err(TransportError::ConfigurationError(_))
        ));
    }

    #[test]
    fn record_carries_outcome() {
        let snap = snapshot(4, [0, 0, 2]);
        let record = TickRecord::from_snapshot(&snap, false);
        assert_eq!(record.outcome, Outcome::Won(Kind::Scissors));
        assert_eq!(record.shares, [0.0, 0.0, 100.0]);
    }
}
