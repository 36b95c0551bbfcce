//! DMA Address Window
//!
//! The DMA engine streams the half-open byte range `[base, end)` through a
//! fetch cursor. Memory is not owned by the chip: the host lends a
//! [`DmaMap`] view for the duration of one sample call.

/// Borrowed view of host memory used for DMA fetches
#[derive(Debug, Clone, Copy, Default)]
pub struct DmaMap<'a> {
    /// Bus address of `data[0]`
    pub addr: u32,
    /// Readable bytes
    pub data: &'a [u8],
}

impl<'a> DmaMap<'a> {
    /// View `data` as mapped at bus address `addr`
    pub fn new(addr: u32, data: &'a [u8]) -> Self {
        DmaMap { addr, data }
    }

    /// Byte at `addr`, or `None` outside the mapped range
    pub fn get(&self, addr: u32) -> Option<u8> {
        let offset = addr.checked_sub(self.addr)?;
        self.data.get(offset as usize).copied()
    }
}

/// Memory range claimed by an active transfer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DmaWindow {
    /// First byte address
    pub addr: u32,
    /// Length in bytes, 0 when idle
    pub size: u32,
}

impl DmaWindow {
    /// True if no transfer is active
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// DMA completion interrupt signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InterruptSignal {
    /// Current level
    pub active: bool,
    /// Level changes since the signal was last consumed
    pub count: usize,
}

impl InterruptSignal {
    /// Drive the signal, counting the edge if the level changes
    pub fn set(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        self.count += 1;
    }

    /// Snapshot the signal and clear its edge count
    pub fn take(&mut self) -> Self {
        let snapshot = *self;
        self.count = 0;
        snapshot
    }
}

/// Cursor state of the DMA engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DmaState {
    /// Frame base address
    pub base: u32,
    /// Fetch cursor
    pub counter: u32,
    /// Frame end address (exclusive)
    pub end: u32,
}

impl DmaState {
    /// Configured frame length
    pub fn size(&self) -> u32 {
        self.end.saturating_sub(self.base)
    }

    /// Bytes left to fetch
    pub fn remaining(&self) -> u32 {
        self.end.saturating_sub(self.counter)
    }

    /// True once the cursor has reached the end address
    pub fn at_end(&self) -> bool {
        self.counter == self.end
    }

    /// Window claimed by the frame
    pub fn window(&self) -> DmaWindow {
        DmaWindow {
            addr: self.base,
            size: self.size(),
        }
    }

    /// True if `[addr, addr + size)` intersects `[base, end)`
    pub fn overlaps(&self, addr: u32, size: u32) -> bool {
        size > 0 && (self.base as u64) < addr as u64 + size as u64 && addr < self.end
    }

    /// Fetch the byte under the cursor
    ///
    /// Unmapped addresses read 0 and leave the cursor where it is.
    pub fn read(&mut self, map: &DmaMap<'_>) -> u8 {
        match map.get(self.counter) {
            Some(byte) => {
                self.counter += 1;
                byte
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_bounds() {
        let data = [1, 2, 3];
        let map = DmaMap::new(0x100, &data);
        assert_eq!(map.get(0xff), None);
        assert_eq!(map.get(0x100), Some(1));
        assert_eq!(map.get(0x102), Some(3));
        assert_eq!(map.get(0x103), None);
    }

    #[test]
    fn test_read_advances_only_when_mapped() {
        let data = [0x10, 0x20];
        let map = DmaMap::new(0x200, &data);
        let mut dma = DmaState {
            base: 0x200,
            counter: 0x200,
            end: 0x204,
        };

        assert_eq!(dma.read(&map), 0x10);
        assert_eq!(dma.read(&map), 0x20);
        assert_eq!(dma.counter, 0x202);
        assert_eq!(dma.read(&map), 0);
        assert_eq!(dma.counter, 0x202);
    }

    #[test]
    fn test_overlaps_half_open() {
        let dma = DmaState {
            base: 0x1000,
            counter: 0x1000,
            end: 0x1010,
        };
        assert!(dma.overlaps(0x1000, 1));
        assert!(dma.overlaps(0x100f, 1));
        assert!(dma.overlaps(0x0ff0, 0x11));
        assert!(!dma.overlaps(0x0ff0, 0x10));
        assert!(!dma.overlaps(0x1010, 4));
        assert!(!dma.overlaps(0x1004, 0));
        assert!(dma.overlaps(0x0000, u32::MAX));
    }

    #[test]
    fn test_signal_edges() {
        let mut sint = InterruptSignal::default();
        sint.set(true);
        sint.set(true);
        sint.set(false);
        assert_eq!(
            sint.take(),
            InterruptSignal {
                active: false,
                count: 2
            }
        );
        assert_eq!(sint.count, 0);
        assert!(!sint.active);
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let dma = DmaState {
            base: 0x2000,
            counter: 0x2000,
            end: 0x1000,
        };
        assert_eq!(dma.size(), 0);
        assert_eq!(dma.remaining(), 0);
    }
}
