//! Busy-wait timing against the CPU cycle counter
//!
//! The frequency estimator needs an interval that is timed by the accurate
//! core clock, not by anything derived from the LPRC. The CPU cycle counter
//! runs at half the core clock and wraps at 2^32, so every comparison here is
//! done on the wrapping difference from the start reading.
//!
//! This is a true spin: nothing else runs on this context while waiting.

use embedded_hal::delay::DelayNs;
use hal_abstractions::CycleCounter;

/// Counter ticks that make up one second for a given core clock
///
/// The counter advances at `sys_clk_hz / 2`; computing it as
/// `(sys_clk_hz / 2000) * 1000` keeps the arithmetic in 32 bits.
#[inline]
pub const fn one_second_threshold(sys_clk_hz: u32) -> u32 {
    (sys_clk_hz / 2000) * 1000
}

/// Returns `true` while fewer than `threshold` ticks have passed since `start`
#[inline]
pub const fn still_waiting(start: u32, now: u32, threshold: u32) -> bool {
    now.wrapping_sub(start) < threshold
}

/// Spin until `threshold` counter ticks have passed
///
/// Returns the counter reading taken at the start of the wait.
pub fn spin_wait<C: CycleCounter + ?Sized>(counter: &C, threshold: u32) -> u32 {
    let start = counter.read_cycle_counter();
    while still_waiting(start, counter.read_cycle_counter(), threshold) {
        core::hint::spin_loop();
    }
    start
}

/// [`DelayNs`] implementation on top of a [`CycleCounter`]
///
/// Resolution is one counter tick (two core clocks). Delays are rounded up.
#[derive(Debug)]
pub struct SpinDelay<C> {
    counter: C,
    counter_hz: u32,
}

impl<C: CycleCounter> SpinDelay<C> {
    /// Longest single spin, in ticks; keeps each wrapping comparison unambiguous
    const MAX_SPIN: u32 = u32::MAX / 2;

    /// Create a delay for a counter fed by a core clock of `sys_clk_hz`
    pub fn new(counter: C, sys_clk_hz: u32) -> Self {
        Self {
            counter,
            counter_hz: (sys_clk_hz / 2).max(1),
        }
    }

    /// Give back the counter
    pub fn free(self) -> C {
        self.counter
    }

    fn ticks_for_ns(&self, ns: u32) -> u64 {
        (u64::from(ns) * u64::from(self.counter_hz)).div_ceil(1_000_000_000)
    }
}

impl<C: CycleCounter> DelayNs for SpinDelay<C> {
    fn delay_ns(&mut self, ns: u32) {
        let mut remaining = self.ticks_for_ns(ns);
        while remaining > 0 {
            let chunk = remaining.min(u64::from(Self::MAX_SPIN)) as u32;
            spin_wait(&self.counter, chunk);
            remaining -= u64::from(chunk);
        }
    }
}
