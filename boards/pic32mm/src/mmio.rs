//! Memory-mapped PIC32MM registers
//!
//! This is the only module in the crate that may use `unsafe`: it turns the
//! fixed peripheral addresses into references.
//!
//! Every PIC32 SFR is followed by CLR, SET and INV aliases at +0x4, +0x8 and
//! +0xC. Writing a mask to an alias clears, sets or toggles those bits
//! atomically; single control bits and interrupt flags are only changed
//! through them.
//!
//! Addresses are from the PIC32MM0256GPM064 family data sheet, DS60001387
//! (KSEG1, uncached).

#![allow(unsafe_code)]

use core::cell::Cell;

use critical_section::Mutex;
use hal_abstractions::{RtccInterrupt, RtccRegisters, SystemKey};
use vcell::VolatileCell;

/// RTCC register block; DS60001387 RTCC register map
const RTCC_BASE: usize = 0xBF80_0000;

/// System key register; DS60001387 oscillator register map
const SYSKEY_ADDR: usize = 0xBF80_3B30;

/// Interrupt flag status register 0; DS60001387 interrupt register map
const IFS0_ADDR: usize = 0xBF80_F040;

/// Interrupt enable control register 0
const IEC0_ADDR: usize = 0xBF80_F0C0;

/// Interrupt priority control register holding the RTCC priority
const IPC2_ADDR: usize = 0xBF80_F160;

/// RTCC interrupt request number (bit in IFS0/IEC0); DS60001387 interrupt vector table
const RTCC_IRQ: u32 = 10;

/// RTCC priority field in IPC2 (bits 20..18), sub-priority at 17..16; see DS60001387
const RTCC_IP_SHIFT: u32 = 18;

/// One SFR with its CLR/SET/INV aliases
#[repr(C)]
struct Sfr {
    value: VolatileCell<u32>,
    clr: VolatileCell<u32>,
    set: VolatileCell<u32>,
    _inv: VolatileCell<u32>,
}

impl Sfr {
    #[inline(always)]
    fn read(&self) -> u32 {
        self.value.get()
    }

    #[inline(always)]
    fn write(&self, value: u32) {
        self.value.set(value)
    }

    #[inline(always)]
    fn set_bits(&self, mask: u32) {
        self.set.set(mask)
    }

    #[inline(always)]
    fn clear_bits(&self, mask: u32) {
        self.clr.set(mask)
    }
}

/// RTCC registers, 0x10 apart starting at [`RTCC_BASE`]
#[repr(C)]
struct RtccBlock {
    rtccon1: Sfr,
    rtccon2: Sfr,
    _reserved: Sfr,
    rtcstat: Sfr,
    rtctime: Sfr,
    rtcdate: Sfr,
    almtime: Sfr,
    almdate: Sfr,
}

#[inline(always)]
fn rtcc_block() -> &'static RtccBlock {
    // safety: fixed, always-mapped peripheral address; all access is volatile
    unsafe { &*(RTCC_BASE as *const RtccBlock) }
}

#[inline(always)]
fn sfr(addr: usize) -> &'static Sfr {
    // safety: fixed, always-mapped peripheral address; all access is volatile
    unsafe { &*(addr as *const Sfr) }
}

static RTCC_TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

/// Exclusive handle on the RTCC and system key registers
///
/// At most one exists; protected-register sequences rely on nobody else
/// writing `SYSKEY` in between.
#[derive(Debug)]
pub struct Pic32mmRtcc {
    _private: (),
}

impl Pic32mmRtcc {
    /// Take the handle; `None` if it was already taken
    pub fn take() -> Option<Self> {
        critical_section::with(|cs| {
            let taken = RTCC_TAKEN.borrow(cs);
            if taken.get() {
                None
            } else {
                taken.set(true);
                Some(Self { _private: () })
            }
        })
    }

    /// Raw `RTCSTAT` (sync, alarm pulse and half-second status bits)
    pub fn status(&self) -> u32 {
        rtcc_block().rtcstat.read()
    }
}

impl SystemKey for Pic32mmRtcc {
    #[inline]
    fn write_syskey(&mut self, value: u32) {
        sfr(SYSKEY_ADDR).write(value)
    }
}

impl RtccRegisters for Pic32mmRtcc {
    fn write_rtccon1(&mut self, value: u32) {
        rtcc_block().rtccon1.write(value)
    }

    fn set_rtccon1(&mut self, mask: u32) {
        rtcc_block().rtccon1.set_bits(mask)
    }

    fn clear_rtccon1(&mut self, mask: u32) {
        rtcc_block().rtccon1.clear_bits(mask)
    }

    fn write_rtccon2(&mut self, value: u32) {
        rtcc_block().rtccon2.write(value)
    }

    fn read_rtctime(&self) -> u32 {
        rtcc_block().rtctime.read()
    }

    fn write_rtctime(&mut self, value: u32) {
        rtcc_block().rtctime.write(value)
    }

    fn read_rtcdate(&self) -> u32 {
        rtcc_block().rtcdate.read()
    }

    fn write_rtcdate(&mut self, value: u32) {
        rtcc_block().rtcdate.write(value)
    }

    fn write_almtime(&mut self, value: u32) {
        rtcc_block().almtime.write(value)
    }

    fn write_almdate(&mut self, value: u32) {
        rtcc_block().almdate.write(value)
    }
}

/// The RTCC interrupt source
///
/// Stateless: every access goes through the SET/CLR aliases, so handles in
/// the interrupt and in normal context cannot corrupt each other.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pic32mmInterrupts;

impl Pic32mmInterrupts {
    /// Handle on the RTCC interrupt bits
    pub const fn new() -> Self {
        Self
    }

    /// Set the RTCC interrupt priority (1..=7), sub-priority 0
    pub fn set_priority(&mut self, priority: u8) {
        let ipc = sfr(IPC2_ADDR);
        ipc.clear_bits(0b1_1111 << (RTCC_IP_SHIFT - 2));
        ipc.set_bits(u32::from(priority & 0b111) << RTCC_IP_SHIFT);
    }
}

impl RtccInterrupt for Pic32mmInterrupts {
    #[inline]
    fn enable_rtcc_interrupt(&mut self) {
        sfr(IEC0_ADDR).set_bits(1 << RTCC_IRQ)
    }

    #[inline]
    fn clear_rtcc_interrupt_pending(&mut self) {
        sfr(IFS0_ADDR).clear_bits(1 << RTCC_IRQ)
    }
}
