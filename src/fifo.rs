//! Sample FIFO
//!
//! Eight byte circular buffer between the DMA fetch and the sample output.
//! DMA fills it a byte pair at a time so stereo interleave is kept even in
//! mono mode.

use log::Level;

use crate::diagnostics::{Anomaly, Diagnostics};

/// FIFO depth in bytes
pub const FIFO_SIZE: usize = 8;

/// Circular sample buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fifo {
    index: usize,
    size: usize,
    buffer: [i8; FIFO_SIZE],
}

impl Fifo {
    /// Create an empty FIFO
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes queued
    pub fn len(&self) -> usize {
        self.size
    }

    /// True if no bytes are queued
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Free slots left
    pub fn capacity(&self) -> usize {
        FIFO_SIZE - self.size
    }

    /// Drop all queued bytes
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Queue a byte; a full FIFO drops it and reports [`Anomaly::FifoFull`]
    pub fn push(&mut self, sample: i8, diagnostics: &dyn Diagnostics) {
        if self.size >= FIFO_SIZE {
            diagnostics.report(Level::Error, &Anomaly::FifoFull);
            return;
        }

        self.buffer[(self.index + self.size) % FIFO_SIZE] = sample;
        self.size += 1;
    }

    /// Dequeue a byte; an empty FIFO yields 0 and reports [`Anomaly::FifoEmpty`]
    pub fn pop(&mut self, diagnostics: &dyn Diagnostics) -> i8 {
        if self.size == 0 {
            diagnostics.report(Level::Error, &Anomaly::FifoEmpty);
            return 0;
        }

        let sample = self.buffer[self.index];
        self.index = (self.index + 1) % FIFO_SIZE;
        self.size -= 1;
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;

    #[test]
    fn test_fifo_order_and_wrap() {
        let diag = RecordingDiagnostics::new();
        let mut fifo = Fifo::new();

        for round in 0..3i8 {
            for i in 0..6 {
                fifo.push(round * 10 + i, &diag);
            }
            for i in 0..6 {
                assert_eq!(fifo.pop(&diag), round * 10 + i);
            }
        }
        assert!(fifo.is_empty());
        assert!(diag.is_empty());
    }

    #[test]
    fn test_fifo_overflow_keeps_contents() {
        let diag = RecordingDiagnostics::new();
        let mut fifo = Fifo::new();

        for i in 0..FIFO_SIZE as i8 {
            fifo.push(i, &diag);
        }
        assert_eq!(fifo.capacity(), 0);

        let before = fifo;
        fifo.push(99, &diag);
        assert_eq!(fifo, before);
        assert_eq!(diag.take(), vec![Anomaly::FifoFull]);

        for i in 0..FIFO_SIZE as i8 {
            assert_eq!(fifo.pop(&diag), i);
        }
        assert!(diag.is_empty());
    }

    #[test]
    fn test_fifo_underflow_returns_zero() {
        let diag = RecordingDiagnostics::new();
        let mut fifo = Fifo::new();

        assert_eq!(fifo.pop(&diag), 0);
        assert_eq!(fifo.len(), 0);
        assert_eq!(diag.anomalies(), vec![Anomaly::FifoEmpty]);
    }
}
