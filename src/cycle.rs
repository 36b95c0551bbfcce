//! Host Clock
//!
//! The host presents time as a cumulative tick count `c` together with the
//! tick increment `d` of one emulated bus cycle. The sound module mirrors
//! its own copy and advances it only while generating samples.

/// Host clock value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cycle {
    /// Cumulative tick count
    pub c: u64,
    /// Tick increment of one bus cycle
    pub d: u64,
}

impl Cycle {
    /// Create a clock value from a tick count and increment
    pub const fn new(c: u64, d: u64) -> Self {
        Cycle { c, d }
    }

    /// Advance the tick count by `n` ticks, saturating at `u64::MAX`
    pub fn advance(&mut self, n: u64) {
        self.c = self.c.saturating_add(n);
    }

    /// Clock value `n` increments ahead of this one, saturating at `u64::MAX`
    pub fn after(self, n: u64) -> Self {
        Cycle {
            c: self.c.saturating_add(self.d.saturating_mul(n)),
            d: self.d,
        }
    }

    /// True if this clock has fallen behind `host`
    pub fn lags(&self, host: Cycle) -> bool {
        self.c < host.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_advance() {
        let mut cycle = Cycle::new(0, 4);
        cycle.advance(32);
        assert_eq!(cycle.c, 32);
        assert_eq!(cycle.after(10), Cycle::new(72, 4));
    }

    #[test]
    fn test_cycle_lags() {
        let module = Cycle::new(100, 1);
        assert!(module.lags(Cycle::new(101, 1)));
        assert!(!module.lags(Cycle::new(100, 1)));
        assert!(!module.lags(Cycle::new(50, 1)));
    }

    #[test]
    fn test_cycle_saturates() {
        let mut cycle = Cycle::new(u64::MAX - 4, u64::MAX / 2);
        cycle.advance(8);
        assert_eq!(cycle.c, u64::MAX);
        assert_eq!(Cycle::new(10, u64::MAX).after(3).c, u64::MAX);
    }
}
