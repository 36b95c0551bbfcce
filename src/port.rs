//! Port trait abstraction for the DMA sound chip
//!
//! The host bus decoder, interrupt controller and audio pump only talk to
//! the chip through this interface. Every call presents the host clock; the
//! chip never runs ahead of it.

use crate::chip::SoundModule;
use crate::cycle::Cycle;
use crate::dma::{DmaMap, DmaWindow};
use crate::event::Event;
use crate::synth::Sample;

/// Host-facing interface of a DMA sound chip
///
/// # Example
///
/// ```
/// use ste_dma_sound::{Cycle, DmaMap, Sample, SoundModule, SoundPort};
///
/// fn pump<P: SoundPort>(chip: &mut P, now: Cycle, ram: &[u8]) -> Vec<Sample> {
///     let mut samples = vec![Sample::default(); 64];
///     let written = chip.synthesize(now, &mut samples, DmaMap::new(0, ram));
///     samples.truncate(written);
///     samples
/// }
///
/// let ram = vec![0u8; 0x1000];
/// let mut chip = SoundModule::new(Cycle::new(0, 1));
/// chip.write_register(Cycle::new(0, 1), 0x02, 0x08); // base 0x000800
/// chip.write_register(Cycle::new(0, 1), 0x08, 0x09); // end  0x000900
/// chip.write_register(Cycle::new(0, 1), 0x00, 0x01); // play
/// assert_eq!(pump(&mut chip, Cycle::new(80, 1), &ram).len(), 10);
/// ```
pub trait SoundPort: Send {
    /// Read a register; unknown indices read 0
    fn read_register(&self, cycle: Cycle, reg: u8) -> u8;

    /// Write a register; unknown indices are ignored
    ///
    /// # Returns
    ///
    /// The interrupt state after the write, see [`SoundPort::poll_event`]
    fn write_register(&mut self, cycle: Cycle, reg: u8, value: u8) -> Event;

    /// Consume the interrupt signal edges and predict the next completion
    fn poll_event(&mut self, cycle: Cycle) -> Event;

    /// Memory range claimed by the active transfer, empty when idle
    fn dma_window(&self) -> DmaWindow;

    /// True if a host write to `[addr, addr + size)` would hit the active transfer
    fn write_overlaps_dma(&self, addr: u32, size: u32) -> bool;

    /// Generate samples up to the host clock
    ///
    /// # Arguments
    ///
    /// * `cycle` - Host clock to catch up with
    /// * `samples` - Output buffer, at most this many pairs are produced
    /// * `map` - Memory the DMA fetches from during this call
    ///
    /// # Returns
    ///
    /// Number of sample pairs written
    fn synthesize(&mut self, cycle: Cycle, samples: &mut [Sample], map: DmaMap<'_>) -> usize;
}

impl SoundPort for SoundModule {
    fn read_register(&self, cycle: Cycle, reg: u8) -> u8 {
        SoundModule::read_register(self, cycle, reg)
    }

    fn write_register(&mut self, cycle: Cycle, reg: u8, value: u8) -> Event {
        SoundModule::write_register(self, cycle, reg, value)
    }

    fn poll_event(&mut self, cycle: Cycle) -> Event {
        SoundModule::poll_event(self, cycle)
    }

    fn dma_window(&self) -> DmaWindow {
        SoundModule::dma_window(self)
    }

    fn write_overlaps_dma(&self, addr: u32, size: u32) -> bool {
        SoundModule::write_overlaps_dma(self, addr, size)
    }

    fn synthesize(&mut self, cycle: Cycle, samples: &mut [Sample], map: DmaMap<'_>) -> usize {
        SoundModule::synthesize(self, cycle, samples, map)
    }
}
