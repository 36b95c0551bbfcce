//! Diagnostics sink for non-fatal protocol anomalies.
//!
//! The emulation never fails a call. Clock desynchronisation and FIFO
//! over/underflow are clamped to a safe value and reported here instead.
//! The sink is injected at construction; [`LogDiagnostics`] forwards to the
//! `log` facade and [`RecordingDiagnostics`] keeps anomalies for inspection.

use std::sync::Arc;

use log::Level;
use parking_lot::Mutex;

/// Log target used by [`LogDiagnostics`] and the module's own trace output
pub const LOG_TARGET: &str = "ste_dma_sound";

/// Recoverable protocol anomaly
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// The module clock lags behind the clock presented by the host
    #[error("{op}: clock unsynchronised (module {module}, host {host})")]
    ClockUnsynchronised {
        /// Port operation that observed the lag
        op: &'static str,
        /// Module tick count
        module: u64,
        /// Host tick count
        host: u64,
    },

    /// Push into a full FIFO; the byte was dropped
    #[error("FIFO full")]
    FifoFull,

    /// Pop from an empty FIFO; 0 was returned
    #[error("FIFO empty")]
    FifoEmpty,
}

/// Receiver of anomaly reports
///
/// Implementations must not block or panic.
pub trait Diagnostics: Send {
    /// Report an anomaly at the given severity
    fn report(&self, level: Level, anomaly: &Anomaly);
}

/// Forwards anomalies to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, level: Level, anomaly: &Anomaly) {
        log::log!(target: LOG_TARGET, level, "{anomaly}");
    }
}

/// Keeps every reported anomaly in a shared list
///
/// Clones share the same list, so a host can keep one handle and give
/// another to the sound module.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    anomalies: Arc<Mutex<Vec<Anomaly>>>,
}

impl RecordingDiagnostics {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the anomalies reported so far
    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.anomalies.lock().clone()
    }

    /// Remove and return the anomalies reported so far
    pub fn take(&self) -> Vec<Anomaly> {
        std::mem::take(&mut *self.anomalies.lock())
    }

    /// Number of anomalies reported so far
    pub fn len(&self) -> usize {
        self.anomalies.lock().len()
    }

    /// True if nothing has been reported
    pub fn is_empty(&self) -> bool {
        self.anomalies.lock().is_empty()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, level: Level, anomaly: &Anomaly) {
        log::log!(target: LOG_TARGET, level, "{anomaly}");
        self.anomalies.lock().push(anomaly.clone());
    }
}
