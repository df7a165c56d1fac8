//! Destinations for serialized tick records.
//!
//! - `StdioSender` writes to standard output.
//! - `FileSender` writes to a file, truncating it on creation.
//! - `NullSender` discards everything.

use std::fs::File;
use std::io::{self, BufWriter, Error as IoError, Write};
use std::path::Path;
use log::info;
use thiserror::Error;

use super::serializer::SerializationError;

/// Error types that can occur during data transport (sending).
#[derive(Error, Debug)]
pub enum TransportError {
    /// An I/O error occurred (e.g., writing to a file).
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),
    /// An error occurred during serialization before sending.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerializationError),
    /// An error occurred due to invalid transport configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Sends serialized data to a destination.
pub trait Sender: Send {
    /// Writes the provided bytes as-is.
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Flushes any internal buffers. A no-op for unbuffered senders.
    fn flush(&mut self) -> Result<(), TransportError>;
}

/// Sends data to standard output.
pub struct StdioSender {
    stdout: io::Stdout,
}

impl StdioSender {
    pub fn new() -> Self {
        StdioSender { stdout: io::stdout() }
    }
}

impl Default for StdioSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for StdioSender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let mut handle = self.stdout.lock();
        handle.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.stdout.lock().flush()?;
        Ok(())
    }
}

/// Sender implementation that writes data to a file through a buffer.
pub struct FileSender {
    writer: BufWriter<File>,
}

impl FileSender {
    /// Creates the file if it doesn't exist, truncates it if it does.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        info!("Initialized FileSender for path: {}", path.display());
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Sender for FileSender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.writer.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// A sender implementation that does nothing.
/// Useful for disabling data transport via configuration.
#[derive(Clone, Default)]
pub struct NullSender;

impl Sender for NullSender {
    fn send(&mut self, _data: &[u8]) -> Result<(), TransportError> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}
