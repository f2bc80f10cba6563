//! Alarm event flag
//!
//! The only state shared between the RTCC interrupt and normal execution.
//! Single writer per transition: the interrupt handler sets the flag, normal
//! code clears it. Both sides use plain atomic loads and stores, no
//! read-modify-write, so nothing here needs a lock or CAS support and it is
//! safe to touch from the handler.

use core::sync::atomic::{compiler_fence, AtomicBool, Ordering};

use hal_abstractions::RtccInterrupt;

/// Edge flag raised by the alarm interrupt
#[derive(Debug)]
pub struct AlarmFlag(AtomicBool);

impl AlarmFlag {
    /// A cleared flag
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Raise the flag (interrupt context)
    #[inline]
    pub fn signal(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Lower the flag (normal context)
    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Current value; does not clear
    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Interrupt body: raise the flag, then acknowledge the interrupt
    ///
    /// The flag store is ordered before the pending-bit clear, so code that
    /// sees the pending bit cleared also sees the flag.
    #[inline]
    pub fn handle_interrupt<I: RtccInterrupt + ?Sized>(&self, irq: &mut I) {
        self.signal();
        compiler_fence(Ordering::SeqCst);
        irq.clear_rtcc_interrupt_pending();
    }
}

impl Default for AlarmFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide alarm event flag
pub static ALARM_EVENT: AlarmFlag = AlarmFlag::new();

/// RTCC alarm interrupt handler body; call from the board's vector
#[inline]
pub fn on_alarm_interrupt<I: RtccInterrupt + ?Sized>(irq: &mut I) {
    ALARM_EVENT.handle_interrupt(irq);
}

/// Clear the alarm event flag after acting on it
#[inline]
pub fn reset_alarm_flag() {
    ALARM_EVENT.reset();
}

/// Whether an alarm has fired since the last [`reset_alarm_flag`]
#[inline]
pub fn is_alarm_flag_set() -> bool {
    ALARM_EVENT.is_set()
}
