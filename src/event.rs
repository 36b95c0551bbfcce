//! DMA completion prediction
//!
//! The host interrupt controller schedules on the cycle returned here
//! instead of polling the chip every sample.

use crate::chip::{SoundModule, SAMPLE_RATE_CLK_DIVISOR};
use crate::cycle::Cycle;
use crate::dma::InterruptSignal;
use crate::fifo::FIFO_SIZE;

/// Frames shorter than this never get a predicted completion cycle
///
/// Tiny looping frames would otherwise flood the interrupt controller.
pub const MIN_EVENT_FRAME: u32 = 16;

/// Interrupt state returned after every register write and poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Event {
    /// Signal snapshot, edge count since the previous event
    pub signal: InterruptSignal,
    /// Host cycle at which the FIFO is expected to read the last sample
    pub cycle: Option<Cycle>,
}

impl SoundModule {
    /// Consume the interrupt signal and predict the next completion
    pub fn poll_event(&mut self, cycle: Cycle) -> Event {
        self.check_clock("poll_event", cycle);
        self.predict()
    }

    pub(crate) fn predict(&mut self) -> Event {
        let signal = self.sint.take();

        if !self.regs.play() || self.dma.size() < MIN_EVENT_FRAME {
            return Event {
                signal,
                cycle: None,
            };
        }

        let mode = self.regs.mode();
        let m = mode.bytes_per_sample() as u64;
        let remaining = self.dma.remaining() as u64 / m;
        let margin = FIFO_SIZE as u64 / m;
        let n = mode.rate().period() as u64;
        let timeout = if remaining > margin {
            SAMPLE_RATE_CLK_DIVISOR * n * (remaining - margin)
        } else {
            0
        };

        Event {
            signal,
            cycle: Some(self.cycle.after(timeout)),
        }
    }
}
