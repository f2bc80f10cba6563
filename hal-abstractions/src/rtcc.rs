//! RTCC register file and interrupt source
//!
//! The RTCC control, date/time and alarm registers share one write-protection
//! domain guarded by the system key register. These traits expose raw register
//! access only; the unlock/lock sequencing lives in `rtcc-core`, which is the
//! only code expected to call the mutating methods.

/// The system key register (`SYSKEY`)
///
/// Writing the two-word unlock sequence opens the protection domain for the
/// next protected writes; writing zero closes it again. A broken sequence is
/// not reported by hardware, the protected writes are silently dropped.
pub trait SystemKey {
    /// Write a raw value to the system key register
    fn write_syskey(&mut self, value: u32);
}

/// The RTCC register file
///
/// `RTCCON1` is written through its atomic SET/CLR aliases so that single
/// bits (`ON`, `WRLOCK`) can change without a read-modify-write.
pub trait RtccRegisters: SystemKey {
    /// Write the whole `RTCCON1` register
    fn write_rtccon1(&mut self, value: u32);
    /// Set the bits of `mask` in `RTCCON1` (`RTCCON1SET`)
    fn set_rtccon1(&mut self, mask: u32);
    /// Clear the bits of `mask` in `RTCCON1` (`RTCCON1CLR`)
    fn clear_rtccon1(&mut self, mask: u32);
    /// Write the whole `RTCCON2` register (divider and clock source)
    fn write_rtccon2(&mut self, value: u32);

    /// Read the packed BCD time (`RTCTIME`)
    fn read_rtctime(&self) -> u32;
    /// Write the packed BCD time (`RTCTIME`)
    fn write_rtctime(&mut self, value: u32);
    /// Read the packed BCD date (`RTCDATE`)
    fn read_rtcdate(&self) -> u32;
    /// Write the packed BCD date (`RTCDATE`)
    fn write_rtcdate(&mut self, value: u32);

    /// Write the packed BCD alarm time (`ALMTIME`)
    fn write_almtime(&mut self, value: u32);
    /// Write the packed BCD alarm date (`ALMDATE`)
    fn write_almdate(&mut self, value: u32);
}

/// The RTCC interrupt source at the interrupt controller
pub trait RtccInterrupt {
    /// Enable the RTCC interrupt source (`IECx.RTCCIE = 1`)
    fn enable_rtcc_interrupt(&mut self);
    /// Clear the RTCC interrupt-pending bit (`IFSxCLR = RTCCIF`)
    fn clear_rtcc_interrupt_pending(&mut self);
}
