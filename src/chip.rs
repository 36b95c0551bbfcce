//! STE DMA sound chip
//!
//! Register file and DMA state machine. Writes land in the *hold* bank; the
//! effective bank only follows while playback is idle or when the play bit
//! changes, so address changes made during playback wait for the next frame
//! start.
//!
//! Sample generation lives in [`crate::synth`], interrupt prediction in
//! [`crate::event`].

use log::{debug, trace, Level};

use crate::cycle::Cycle;
use crate::diagnostics::{Anomaly, Diagnostics, LogDiagnostics, LOG_TARGET};
use crate::dma::{DmaMap, DmaState, DmaWindow, InterruptSignal};
use crate::event::Event;
use crate::fifo::Fifo;
use crate::registers::{RegisterBank, REG_COUNT};
use crate::synth::Sample;

/// Host clock increments per output sample
pub const SAMPLE_RATE_CLK_DIVISOR: u64 = 8;

/// STE DMA sound emulator
pub struct SoundModule {
    pub(crate) cycle: Cycle,
    pub(crate) regs: RegisterBank,
    pub(crate) hold: RegisterBank,
    pub(crate) dma: DmaState,
    pub(crate) k: u32,
    pub(crate) sint: InterruptSignal,
    pub(crate) sample: Sample,
    pub(crate) fifo: Fifo,
    pub(crate) diagnostics: Box<dyn Diagnostics>,
}

impl SoundModule {
    /// Create a sound module synchronised to `cycle`, reporting through `log`
    pub fn new(cycle: Cycle) -> Self {
        Self::with_diagnostics(cycle, Box::new(LogDiagnostics))
    }

    /// Create a sound module with a custom anomaly sink
    pub fn with_diagnostics(cycle: Cycle, diagnostics: Box<dyn Diagnostics>) -> Self {
        SoundModule {
            cycle,
            regs: RegisterBank::new(),
            hold: RegisterBank::new(),
            dma: DmaState::default(),
            k: 0,
            sint: InterruptSignal::default(),
            sample: Sample::default(),
            fifo: Fifo::new(),
            diagnostics,
        }
    }

    /// Return to power-on state, keeping the clock
    pub fn reset(&mut self) {
        self.regs = RegisterBank::new();
        self.hold = RegisterBank::new();
        self.dma = DmaState::default();
        self.k = 0;
        self.sint = InterruptSignal::default();
        self.sample = Sample::default();
        self.fifo.clear();
    }

    /// Module clock
    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    /// True while a frame is being played
    pub fn is_playing(&self) -> bool {
        self.regs.play()
    }

    /// Bytes waiting in the FIFO
    pub fn fifo_len(&self) -> usize {
        self.fifo.len()
    }

    /// Effective register bank
    pub fn registers(&self) -> &RegisterBank {
        &self.regs
    }

    /// Staged register bank
    pub fn staged_registers(&self) -> &RegisterBank {
        &self.hold
    }

    /// Read an effective register, 0 for unknown indices
    pub fn read_register(&self, cycle: Cycle, reg: u8) -> u8 {
        self.check_clock("read_register", cycle);
        self.regs.read(reg)
    }

    /// Write a register and return the resulting interrupt prediction
    pub fn write_register(&mut self, cycle: Cycle, reg: u8, value: u8) -> Event {
        self.check_clock("write_register", cycle);

        if (reg as usize) < REG_COUNT {
            self.hold.write(reg, value);
            self.hold.hardwire();

            let play_edge = self.hold.play() != self.regs.play();

            if play_edge || !self.regs.play() {
                self.regs.write(reg, self.hold.read(reg));
            }

            if play_edge {
                if self.regs.play() {
                    self.start();
                } else {
                    self.stop();
                }
            }
        }

        self.predict()
    }

    /// Memory range claimed by the active frame, empty when idle
    pub fn dma_window(&self) -> DmaWindow {
        if !self.regs.play() {
            return DmaWindow::default();
        }
        self.dma.window()
    }

    /// True if a host write to `[addr, addr + size)` hits the active frame
    pub fn write_overlaps_dma(&self, addr: u32, size: u32) -> bool {
        self.regs.play() && self.dma.overlaps(addr, size)
    }

    pub(crate) fn check_clock(&self, op: &'static str, cycle: Cycle) {
        if self.cycle.lags(cycle) {
            self.diagnostics.report(
                Level::Error,
                &Anomaly::ClockUnsynchronised {
                    op,
                    module: self.cycle.c,
                    host: cycle.c,
                },
            );
        }
    }

    fn start(&mut self) {
        self.regs = self.hold;

        let base = self.regs.base();
        self.dma = DmaState {
            base,
            counter: base,
            end: self.regs.end(),
        };

        debug!(
            target: LOG_TARGET,
            "start frame {:06x}-{:06x} mode {:02x}",
            self.dma.base,
            self.dma.end,
            self.regs.mode().0
        );

        self.sint.set(true);
    }

    fn stop(&mut self) {
        self.hold.set_play(false);
        self.regs = self.hold;
        self.dma = DmaState::default();

        debug!(target: LOG_TARGET, "stop");

        self.sint.set(false);
    }

    fn end_of_frame(&mut self) {
        let repeat = self.regs.play_repeat();

        self.stop();

        if repeat {
            trace!(target: LOG_TARGET, "frame loop");
            self.regs.set_play(true);
            self.hold.set_play(true);
            self.start();
        }
    }

    /// Top up the FIFO from DMA a byte pair at a time
    ///
    /// Returns whether the FIFO holds data afterwards.
    pub(crate) fn fill_fifo(&mut self, map: &DmaMap<'_>) -> bool {
        while self.regs.play() && self.fifo.capacity() >= 2 && !self.dma.at_end() {
            for _ in 0..2 {
                let byte = self.dma.read(map) as i8;
                self.fifo.push(byte, &*self.diagnostics);
            }

            if self.dma.at_end() {
                self.end_of_frame();
            }
        }

        !self.fifo.is_empty()
    }
}

impl Default for SoundModule {
    fn default() -> Self {
        Self::new(Cycle::new(0, 1))
    }
}
