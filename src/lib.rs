//! Atari STE DMA Sound Emulator
//!
//! A cycle-accurate emulation of the STE DMA sound chip for use inside a
//! larger Atari emulator. It reproduces what software driving the real chip
//! can observe: staged versus effective registers, the 8 byte FIFO, frame
//! start/stop/loop, and the cycle at which the end-of-frame interrupt fires.
//!
//! # Features
//! - Hold/effective register banks with hardware bit masks
//! - DMA frame looping without host intervention
//! - Mono and stereo playback at 6258, 12517, 25033 and 50066 Hz
//! - Completion interrupt prediction for the host interrupt controller
//! - Overlap check for host writes into the active frame
//!
//! # Register map
//!
//! | Index | Register |
//! |-------|----------|
//! | 0     | Control: bit 0 play, bit 1 play repeat |
//! | 1-3   | Frame base address high/middle/low |
//! | 4-6   | Frame address counter high/middle/low |
//! | 7-9   | Frame end address high/middle/low |
//! | 16    | Mode: bit 7 mono, bits 0-1 rate |
//!
//! # Quick start
//! ```
//! use ste_dma_sound::{Cycle, DmaMap, Register, Sample, SoundModule};
//!
//! let ram: Vec<u8> = (0..=255).collect();
//! let now = Cycle::new(0, 1);
//! let mut chip = SoundModule::new(now);
//! chip.write_register(now, Register::EndMi.addr(), 0x01); // frame 0x000000-0x000100
//! chip.write_register(now, Register::Mode.addr(), 0x83); // mono, 50066 Hz
//! let event = chip.write_register(now, Register::Ctrl.addr(), 0x01);
//! assert!(event.signal.active);
//!
//! let mut samples = [Sample::default(); 10];
//! let written = chip.synthesize(Cycle::new(80, 1), &mut samples, DmaMap::new(0, &ram));
//! assert_eq!(written, 10);
//! assert_eq!(samples[5], Sample::mono(1));
//! ```

#![warn(missing_docs)]

pub mod chip;
pub mod cycle;
pub mod diagnostics;
pub mod dma;
mod error;
pub mod event;
pub mod fifo;
pub mod port;
pub mod registers;
pub mod synth;

pub use chip::{SoundModule, SAMPLE_RATE_CLK_DIVISOR};
pub use cycle::Cycle;
pub use diagnostics::{Anomaly, Diagnostics, LogDiagnostics, RecordingDiagnostics};
pub use dma::{DmaMap, DmaWindow, InterruptSignal};
pub use error::SoundError;
pub use event::{Event, MIN_EVENT_FRAME};
pub use fifo::FIFO_SIZE;
pub use port::SoundPort;
pub use registers::{Control, Mode, Rate, Register, RegisterBank};
pub use synth::Sample;
