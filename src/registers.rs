//! DMA Sound Register Definitions
//!
//! The chip decodes 17 consecutive byte registers. Positions 0-9 hold the
//! control byte and the base/counter/end address triples, 10-15 are unused
//! and position 16 holds the mode byte. Named fields are read through
//! accessors over the raw byte array.

use std::fmt;

use bitflags::bitflags;

use crate::error::SoundError;

/// Number of byte registers decoded by the chip
pub const REG_COUNT: usize = 17;

const _: () = assert!(REG_COUNT == 17);

/// Per-register mask of the bits that exist in hardware
///
/// Address high bytes are 6 bits wide and base/end low bytes are word
/// aligned. Counter registers keep whatever the host writes until the DMA
/// cursor refreshes them.
pub const REG_MASK: [u8; REG_COUNT] = [
    0x03, // control
    0x3f, 0xff, 0xfe, // base
    0xff, 0xff, 0xff, // counter
    0x3f, 0xff, 0xfe, // end
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // unused
    0x83, // mode
];

/// DMA Sound Register Address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Sound DMA control
    Ctrl = 0,
    /// Frame base address high byte
    BaseHi = 1,
    /// Frame base address middle byte
    BaseMi = 2,
    /// Frame base address low byte
    BaseLo = 3,
    /// Frame address counter high byte
    CounterHi = 4,
    /// Frame address counter middle byte
    CounterMi = 5,
    /// Frame address counter low byte
    CounterLo = 6,
    /// Frame end address high byte
    EndHi = 7,
    /// Frame end address middle byte
    EndMi = 8,
    /// Frame end address low byte
    EndLo = 9,
    /// Sound mode control
    Mode = 16,
}

impl Register {
    /// Every architectural register in address order
    pub const ALL: [Register; 11] = [
        Register::Ctrl,
        Register::BaseHi,
        Register::BaseMi,
        Register::BaseLo,
        Register::CounterHi,
        Register::CounterMi,
        Register::CounterLo,
        Register::EndHi,
        Register::EndMi,
        Register::EndLo,
        Register::Mode,
    ];

    /// Convert a raw register number to Register enum
    pub fn from_addr(addr: u8) -> Option<Self> {
        match addr {
            0 => Some(Register::Ctrl),
            1 => Some(Register::BaseHi),
            2 => Some(Register::BaseMi),
            3 => Some(Register::BaseLo),
            4 => Some(Register::CounterHi),
            5 => Some(Register::CounterMi),
            6 => Some(Register::CounterLo),
            7 => Some(Register::EndHi),
            8 => Some(Register::EndMi),
            9 => Some(Register::EndLo),
            16 => Some(Register::Mode),
            _ => None,
        }
    }

    /// Get the register address value
    pub fn addr(&self) -> u8 {
        *self as u8
    }

    /// Bits of this register that exist in hardware
    pub fn mask(&self) -> u8 {
        REG_MASK[*self as usize]
    }
}

impl TryFrom<u8> for Register {
    type Error = SoundError;

    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        Register::from_addr(addr).ok_or(SoundError::UnknownRegister(addr))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::Ctrl => write!(f, "R0 (Sound DMA control)"),
            Register::BaseHi => write!(f, "R1 (Frame base address high byte)"),
            Register::BaseMi => write!(f, "R2 (Frame base address middle byte)"),
            Register::BaseLo => write!(f, "R3 (Frame base address low byte)"),
            Register::CounterHi => write!(f, "R4 (Frame address counter high byte)"),
            Register::CounterMi => write!(f, "R5 (Frame address counter middle byte)"),
            Register::CounterLo => write!(f, "R6 (Frame address counter low byte)"),
            Register::EndHi => write!(f, "R7 (Frame end address high byte)"),
            Register::EndMi => write!(f, "R8 (Frame end address middle byte)"),
            Register::EndLo => write!(f, "R9 (Frame end address low byte)"),
            Register::Mode => write!(f, "R16 (Sound mode control)"),
        }
    }
}

bitflags! {
    /// Control register bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Control: u8 {
        /// DMA playback enabled
        const PLAY = 0x01;
        /// Restart at the base address when the end is reached
        const PLAY_REPEAT = 0x02;
    }
}

/// Playback rate selector (mode bits 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rate {
    /// 6258 Hz
    Hz6258 = 0,
    /// 12517 Hz
    Hz12517 = 1,
    /// 25033 Hz
    Hz25033 = 2,
    /// 50066 Hz
    Hz50066 = 3,
}

impl Rate {
    /// Decode the two rate bits
    pub fn from_bits(bits: u8) -> Self {
        match bits & MODE_RATE_MASK {
            0 => Rate::Hz6258,
            1 => Rate::Hz12517,
            2 => Rate::Hz25033,
            _ => Rate::Hz50066,
        }
    }

    /// Output samples per FIFO fetch: 40, 20, 10 or 5
    pub fn period(self) -> u32 {
        5 << (3 - self as u32)
    }
}

/// Mono flag in the mode register
pub const MODE_MONO: u8 = 0x80;

/// Rate selector bits in the mode register
pub const MODE_RATE_MASK: u8 = 0x03;

/// Decoded mode register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(pub u8);

impl Mode {
    /// Build a mode byte from its fields
    pub fn new(mono: bool, rate: Rate) -> Self {
        let mono = if mono { MODE_MONO } else { 0 };
        Mode(mono | rate as u8)
    }

    /// One byte per sample on both channels
    pub fn mono(self) -> bool {
        self.0 & MODE_MONO != 0
    }

    /// Selected playback rate
    pub fn rate(self) -> Rate {
        Rate::from_bits(self.0)
    }

    /// Bytes consumed per sample pair
    pub fn bytes_per_sample(self) -> u32 {
        if self.mono() {
            1
        } else {
            2
        }
    }
}

/// Raw register bank (17 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterBank {
    /// Register values R0-R16
    pub registers: [u8; REG_COUNT],
}

impl RegisterBank {
    /// Create a new register bank with all values set to 0
    pub fn new() -> Self {
        RegisterBank {
            registers: [0; REG_COUNT],
        }
    }

    /// Read a register value, 0 for indices past the bank
    pub fn read(&self, addr: u8) -> u8 {
        self.registers.get(addr as usize).copied().unwrap_or(0)
    }

    /// Write a register value, ignored for indices past the bank
    pub fn write(&mut self, addr: u8, value: u8) {
        if let Some(reg) = self.registers.get_mut(addr as usize) {
            *reg = value;
        }
    }

    /// Clear every bit that does not exist in hardware
    pub fn hardwire(&mut self) {
        for (reg, mask) in self.registers.iter_mut().zip(REG_MASK) {
            *reg &= mask;
        }
    }

    /// Control register
    pub fn ctrl(&self) -> Control {
        Control::from_bits_truncate(self.registers[Register::Ctrl as usize])
    }

    /// Replace the control register
    pub fn set_ctrl(&mut self, ctrl: Control) {
        self.registers[Register::Ctrl as usize] = ctrl.bits();
    }

    /// Play bit of the control register
    pub fn play(&self) -> bool {
        self.ctrl().contains(Control::PLAY)
    }

    /// Set or clear the play bit
    pub fn set_play(&mut self, play: bool) {
        let mut ctrl = self.ctrl();
        ctrl.set(Control::PLAY, play);
        self.set_ctrl(ctrl);
    }

    /// Play-repeat bit of the control register
    pub fn play_repeat(&self) -> bool {
        self.ctrl().contains(Control::PLAY_REPEAT)
    }

    /// Mode register
    pub fn mode(&self) -> Mode {
        Mode(self.registers[Register::Mode as usize])
    }

    /// Frame base address assembled from R1-R3
    pub fn base(&self) -> u32 {
        self.address(Register::BaseHi)
    }

    /// Frame end address assembled from R7-R9
    pub fn end(&self) -> u32 {
        self.address(Register::EndHi)
    }

    /// Frame address counter assembled from R4-R6
    pub fn counter(&self) -> u32 {
        self.address(Register::CounterHi)
    }

    /// Mirror the DMA cursor into R4-R6
    pub fn set_counter(&mut self, counter: u32) {
        let hi = Register::CounterHi as usize;
        self.registers[hi] = ((counter >> 16) & 0x3f) as u8;
        self.registers[hi + 1] = (counter >> 8) as u8;
        self.registers[hi + 2] = (counter & 0xfe) as u8;
    }

    fn address(&self, hi: Register) -> u32 {
        let hi = hi as usize;
        (self.registers[hi] as u32) << 16
            | (self.registers[hi + 1] as u32) << 8
            | self.registers[hi + 2] as u32
    }
}

impl Default for RegisterBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_conversion() {
        assert_eq!(Register::from_addr(0x00), Some(Register::Ctrl));
        assert_eq!(Register::from_addr(0x09), Some(Register::EndLo));
        assert_eq!(Register::from_addr(0x10), Some(Register::Mode));
        assert_eq!(Register::from_addr(0x0a), None);
        assert_eq!(Register::try_from(17), Err(SoundError::UnknownRegister(17)));

        for reg in Register::ALL {
            assert_eq!(Register::from_addr(reg.addr()), Some(reg));
        }
    }

    #[test]
    fn test_register_bank_bounds() {
        let mut bank = RegisterBank::new();
        bank.write(0x01, 0x42);
        assert_eq!(bank.read(0x01), 0x42);

        bank.write(17, 0xff);
        assert_eq!(bank.read(17), 0);
        assert_eq!(bank.read(255), 0);
    }

    #[test]
    fn test_hardwire_clears_undefined_bits() {
        let mut bank = RegisterBank {
            registers: [0xff; REG_COUNT],
        };
        bank.hardwire();
        assert_eq!(bank.registers, REG_MASK);
        assert_eq!(bank.ctrl(), Control::PLAY | Control::PLAY_REPEAT);

        for reg in Register::ALL {
            assert_eq!(bank.read(reg.addr()), reg.mask(), "{reg}");
        }
    }

    #[test]
    fn test_addresses() {
        let mut bank = RegisterBank::new();
        for (reg, value) in [(1, 0x12), (2, 0x34), (3, 0x56), (7, 0x12), (8, 0x40), (9, 0x00)] {
            bank.write(reg, value);
        }
        assert_eq!(bank.base(), 0x12_3456);
        assert_eq!(bank.end(), 0x12_4000);

        bank.set_counter(0xff_1235);
        assert_eq!(bank.counter(), 0x3f_1234);
    }

    #[test]
    fn test_mode_fields() {
        let mode = Mode::new(true, Rate::Hz50066);
        assert_eq!(mode.0, 0x83);
        assert!(mode.mono());
        assert_eq!(mode.rate(), Rate::Hz50066);
        assert_eq!(mode.bytes_per_sample(), 1);

        let mode = Mode(0x01);
        assert!(!mode.mono());
        assert_eq!(mode.bytes_per_sample(), 2);
    }

    #[test]
    fn test_rate_period() {
        assert_eq!(Rate::Hz6258.period(), 40);
        assert_eq!(Rate::Hz12517.period(), 20);
        assert_eq!(Rate::Hz25033.period(), 10);
        assert_eq!(Rate::Hz50066.period(), 5);
    }

    #[test]
    fn test_play_bits() {
        let mut bank = RegisterBank::new();
        bank.write(0, 0x02);
        assert!(bank.play_repeat());
        assert!(!bank.play());

        bank.set_play(true);
        assert_eq!(bank.read(0), 0x03);
        bank.set_play(false);
        assert_eq!(bank.read(0), 0x02);
    }
}
