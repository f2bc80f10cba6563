//! Protected register access
//!
//! The RTCC control, date/time and alarm registers only accept writes after
//! the system key unlock sequence. A protected write issued without it, or
//! after an intervening key write, is silently dropped by hardware.
//!
//! [`unlock`] writes the sequence and returns an [`Unlocked`] guard that
//! derefs to the register file; dropping the guard writes the lock value. The
//! lock therefore happens on every exit path, including early returns and
//! every pass of a loop.
//!
//! ```ignore
//! {
//!     let mut rtcc = unlock(&mut regs);
//!     rtcc.clear_rtccon1(rtccon1::WRLOCK);
//!     rtcc.write_rtccon2(divider.bits());
//! } // locked here
//! ```

use core::ops::{Deref, DerefMut};

use hal_abstractions::SystemKey;

use crate::regs::syskey;

/// An open write-protection window on `R`
///
/// Only obtainable from [`unlock`]. Holds the exclusive borrow of the register
/// file for its lifetime, so no other code can interleave key writes.
#[must_use = "dropping the guard re-locks immediately"]
pub struct Unlocked<'a, R: SystemKey> {
    regs: &'a mut R,
}

/// Write the unlock sequence and return the guard
pub fn unlock<R: SystemKey>(regs: &mut R) -> Unlocked<'_, R> {
    regs.write_syskey(syskey::LOCK);
    regs.write_syskey(syskey::KEY1);
    regs.write_syskey(syskey::KEY2);
    trace!("system key unlocked");
    Unlocked { regs }
}

/// Run `f` inside an unlock/lock window
pub fn with_unlocked<R, T, F>(regs: &mut R, f: F) -> T
where
    R: SystemKey,
    F: FnOnce(&mut R) -> T,
{
    let mut guard = unlock(regs);
    f(&mut *guard)
}

impl<R: SystemKey> Deref for Unlocked<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.regs
    }
}

impl<R: SystemKey> DerefMut for Unlocked<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.regs
    }
}

impl<R: SystemKey> Drop for Unlocked<'_, R> {
    fn drop(&mut self) {
        self.regs.write_syskey(syskey::LOCK);
        trace!("system key locked");
    }
}
