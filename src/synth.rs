//! Sample synthesis
//!
//! One output sample pair is produced every `8 × d` host ticks. The rate
//! selector does not change that cadence; it sets how many consecutive
//! samples reuse one FIFO fetch (40, 20, 10 or 5).

use crate::chip::{SoundModule, SAMPLE_RATE_CLK_DIVISOR};
use crate::cycle::Cycle;
use crate::dma::DmaMap;

/// Signed 8-bit stereo sample pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sample {
    /// Left channel
    pub left: i8,
    /// Right channel
    pub right: i8,
}

impl Sample {
    /// Pair from separate channel values
    pub const fn new(left: i8, right: i8) -> Self {
        Sample { left, right }
    }

    /// Same value on both channels
    pub const fn mono(value: i8) -> Self {
        Sample {
            left: value,
            right: value,
        }
    }

    /// Normalise both channels to `[-1.0, 1.0)`
    pub fn to_f32(self) -> (f32, f32) {
        (self.left as f32 / 128.0, self.right as f32 / 128.0)
    }
}

impl SoundModule {
    /// Generate samples up to the host clock `cycle`
    ///
    /// Writes at most `samples.len()` pairs and returns how many were
    /// written. Fewer are produced once the module clock has caught up with
    /// `cycle`.
    pub fn synthesize(&mut self, cycle: Cycle, samples: &mut [Sample], map: DmaMap<'_>) -> usize {
        let step = SAMPLE_RATE_CLK_DIVISOR.saturating_mul(self.cycle.d);
        let mut written = 0;

        if !self.regs.play() && self.fifo.is_empty() {
            for slot in samples.iter_mut() {
                if !self.sample_due(step, cycle) {
                    break;
                }
                *slot = self.sample;
                written += 1;
                self.cycle.advance(step);
            }
            return written;
        }

        let n = self.regs.mode().rate().period();

        for slot in samples.iter_mut() {
            if !self.sample_due(step, cycle) {
                break;
            }
            *slot = self.dma_sample(&map, n);
            written += 1;
            self.cycle.advance(step);
        }

        self.regs.set_counter(self.dma.counter);

        written
    }

    /// True if a whole sample period fits before the host clock
    fn sample_due(&self, step: u64, cycle: Cycle) -> bool {
        self.cycle
            .c
            .checked_add(step)
            .is_some_and(|next| next <= cycle.c)
    }

    fn dma_sample(&mut self, map: &DmaMap<'_>, n: u32) -> Sample {
        if self.k == 0 && self.fill_fifo(map) {
            let diagnostics = &*self.diagnostics;

            self.sample = if self.regs.mode().mono() {
                Sample::mono(self.fifo.pop(diagnostics))
            } else {
                let left = self.fifo.pop(diagnostics);
                // FIFO starved mid-pair
                let right = if self.fifo.is_empty() {
                    left
                } else {
                    self.fifo.pop(diagnostics)
                };
                Sample::new(left, right)
            };
        }

        self.k += 1;
        if self.k >= n {
            self.k = 0;
        }

        self.sample
    }
}
