//! CPU cycle counter source

/// A free-running, monotonically increasing 32-bit cycle counter
///
/// On PIC32 parts this is the CP0 `Count` register, which increments at half
/// the core clock. The counter wraps silently at 2^32, so consumers must
/// compare readings with [`u32::wrapping_sub`] and never with `<`/`>`.
pub trait CycleCounter {
    /// Read the current counter value
    fn read_cycle_counter(&self) -> u32;
}

impl<F> CycleCounter for F
where
    F: Fn() -> u32,
{
    #[inline]
    fn read_cycle_counter(&self) -> u32 {
        self()
    }
}
