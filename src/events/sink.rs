//! Action sinks - asynchronous consumers of the kitchen's event stream.
//!
//! `TigerStyle`: Non-blocking enqueue, cooperative drain, no dropped events
//! on shutdown.
//!
//! Each sink owns an unbounded channel and a spawned drain worker. The
//! kitchen enqueues with [`ActionSink::log_action`] (never blocking the
//! transaction lock holder); [`ActionSink::finish`] closes the channel and
//! waits for the worker to drain every queued record before returning.
//! Closing the channel IS the drain signal — there is no hard cancellation
//! path and no poll loop.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use super::{ActionKind, ActionRecord};

/// Errors from sink lifecycle operations.
#[derive(Debug, Error)]
pub enum SinkError {
    /// `finish` was called on a sink whose worker was never started
    #[error("sink was not started; call run() before finish()")]
    NotStarted,

    /// The drain worker panicked or was aborted
    #[error("sink worker failed: {0}")]
    Worker(String),

    /// Writing the action log failed
    #[error("action log write failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the action log failed
    #[error("action log serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Contract between the kitchen and an event consumer.
///
/// `run` starts the drain worker, `log_action` is a non-blocking append, and
/// `finish` is a scoped drain-then-close that returns only once the queue is
/// fully flushed. Records logged after `finish` are dropped with a warning.
#[async_trait]
pub trait ActionSink: Send + Sync {
    /// Start the drain worker. Requires a tokio runtime. Idempotent.
    fn run(&self);

    /// Enqueue a record. Never blocks.
    fn log_action(&self, record: ActionRecord);

    /// Drain the queue and stop the worker.
    ///
    /// # Errors
    /// [`SinkError::NotStarted`] when `run` was never called; worker or I/O
    /// failures otherwise.
    async fn finish(&self) -> Result<(), SinkError>;
}

/// Shared channel plumbing for the queue-backed sinks.
#[derive(Debug)]
struct SinkChannel {
    tx: Mutex<Option<UnboundedSender<ActionRecord>>>,
    rx: Mutex<Option<UnboundedReceiver<ActionRecord>>>,
}

impl SinkChannel {
    fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx: Mutex::new(Some(tx)),
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Take the receiver for the drain worker; `None` once taken.
    fn take_receiver(&self) -> Option<UnboundedReceiver<ActionRecord>> {
        self.rx.lock().expect("sink receiver lock poisoned").take()
    }

    fn send(&self, record: ActionRecord) {
        let guard = self.tx.lock().expect("sink sender lock poisoned");
        let delivered = guard
            .as_ref()
            .is_some_and(|tx| tx.send(record).is_ok());
        if !delivered {
            tracing::warn!("action record dropped: sink already finished");
        }
    }

    /// Drop the sender so the worker sees end-of-stream after draining.
    fn close(&self) {
        self.tx.lock().expect("sink sender lock poisoned").take();
    }
}

/// Await a drain worker, flattening panics into [`SinkError::Worker`].
async fn join_worker<T>(handle: JoinHandle<Result<T, SinkError>>) -> Result<T, SinkError> {
    match handle.await {
        Ok(result) => result,
        Err(join_error) => Err(SinkError::Worker(join_error.to_string())),
    }
}

// =============================================================================
// ConsoleSink
// =============================================================================

/// Prints one human-readable line per record.
#[derive(Debug)]
pub struct ConsoleSink {
    channel: SinkChannel,
    worker: Mutex<Option<JoinHandle<Result<(), SinkError>>>>,
    utc_hour_offset: i32,
}

impl ConsoleSink {
    /// Create a console sink printing UTC times.
    #[must_use]
    pub fn new() -> Self {
        Self::with_utc_offset(0)
    }

    /// Create a console sink shifting displayed times by whole hours.
    #[must_use]
    pub fn with_utc_offset(utc_hour_offset: i32) -> Self {
        Self {
            channel: SinkChannel::new(),
            worker: Mutex::new(None),
            utc_hour_offset,
        }
    }

    fn format_line(record: &ActionRecord, utc_hour_offset: i32) -> String {
        let shifted_ms =
            i64::try_from(record.timestamp_ms).unwrap_or(i64::MAX) + i64::from(utc_hour_offset) * 3_600_000;
        let time = chrono::DateTime::from_timestamp_millis(shifted_ms)
            .unwrap_or_default()
            .format("%H:%M:%S%.3f");

        let suffix = match record.kind {
            ActionKind::Place => format!("in {}", record.location),
            ActionKind::Move => format!("from Shelf to {}", record.location),
            ActionKind::Pickup | ActionKind::Discard => format!("from {}", record.location),
        };
        format!(
            "{time} orderId: {id}, action: {kind}, {suffix}",
            id = record.order_id,
            kind = record.kind,
        )
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActionSink for ConsoleSink {
    fn run(&self) {
        let Some(mut rx) = self.channel.take_receiver() else {
            return; // already running
        };
        let offset = self.utc_hour_offset;

        let handle = tokio::spawn(async move {
            while let Some(record) = rx.recv().await {
                println!("{}", Self::format_line(&record, offset));
            }
            Ok(())
        });
        *self.worker.lock().expect("sink worker lock poisoned") = Some(handle);
    }

    fn log_action(&self, record: ActionRecord) {
        self.channel.send(record);
    }

    async fn finish(&self) -> Result<(), SinkError> {
        let handle = self
            .worker
            .lock()
            .expect("sink worker lock poisoned")
            .take()
            .ok_or(SinkError::NotStarted)?;
        self.channel.close();
        join_worker(handle).await
    }
}

// =============================================================================
// JsonFileSink
// =============================================================================

/// Accumulates records and writes one JSON array to a file at drain time.
///
/// The persisted objects follow the external contract:
/// `{"action": "...", "timestamp": <epoch ms>, "id": "..."}`.
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
    channel: SinkChannel,
    worker: Mutex<Option<JoinHandle<Result<(), SinkError>>>>,
}

impl JsonFileSink {
    /// Create a sink that will write to `path`.
    #[must_use]
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            channel: SinkChannel::new(),
            worker: Mutex::new(None),
        }
    }

    /// Where the action log will be written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ActionSink for JsonFileSink {
    fn run(&self) {
        let Some(mut rx) = self.channel.take_receiver() else {
            return; // already running
        };
        let path = self.path.clone();

        let handle = tokio::spawn(async move {
            let mut records = Vec::new();
            while let Some(record) = rx.recv().await {
                records.push(record);
            }
            let json = serde_json::to_vec_pretty(&records)?;
            tokio::fs::write(&path, json).await?;
            Ok(())
        });
        *self.worker.lock().expect("sink worker lock poisoned") = Some(handle);
    }

    fn log_action(&self, record: ActionRecord) {
        self.channel.send(record);
    }

    async fn finish(&self) -> Result<(), SinkError> {
        let handle = self
            .worker
            .lock()
            .expect("sink worker lock poisoned")
            .take()
            .ok_or(SinkError::NotStarted)?;
        self.channel.close();
        join_worker(handle).await
    }
}

// =============================================================================
// MultiSink
// =============================================================================

/// Fans the full event stream out to every composed sink.
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn ActionSink>>,
}

impl MultiSink {
    /// Create an empty composite.
    #[must_use]
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a sink to the composite.
    #[must_use]
    pub fn with_sink(mut self, sink: impl ActionSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Number of composed sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether no sinks are composed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl ActionSink for MultiSink {
    fn run(&self) {
        for sink in &self.sinks {
            sink.run();
        }
    }

    fn log_action(&self, record: ActionRecord) {
        for sink in &self.sinks {
            sink.log_action(record.clone());
        }
    }

    async fn finish(&self) -> Result<(), SinkError> {
        for sink in &self.sinks {
            sink.finish().await?;
        }
        Ok(())
    }
}

// =============================================================================
// NullSink
// =============================================================================

/// Drops every record. Useful as a test stub.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NullSink {
    /// Create a null sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActionSink for NullSink {
    fn run(&self) {}

    fn log_action(&self, _record: ActionRecord) {}

    async fn finish(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
