//! PIC32MM board support for the LPRC-calibrated RTCC
//!
//! Wires the `rtcc-core` logic to the PIC32MM0256GPM register map:
//! memory-mapped RTCC and system key registers, the RTCC interrupt bits, and a
//! defmt-backed diagnostic sink.
//!
//! ## Startup
//! ```ignore
//! let mut rtcc = Pic32mmRtcc::take().unwrap();
//! match pic32mm_rtcc::bring_up(&mut rtcc, &read_cp0_count, &AlarmConfig::default()) {
//!     Ok(lprc) => info!("RTCC calibrated to {} Hz", lprc.raw()),
//!     Err(e) => error!("RTCC calibration failed: {}", e),
//! }
//! ```
//!
//! The RTCC interrupt vector must call [`rtcc_isr`].

#![no_std]
#![deny(unsafe_code)]
#![deny(warnings)]

mod mmio;
mod sink;

pub use mmio::{Pic32mmInterrupts, Pic32mmRtcc};
pub use rtcc_core::{
    is_alarm_flag_set, reset_alarm_flag, AlarmConfig, AlarmRepeat, CalibrationError, Hertz,
};
pub use sink::DefmtSink;

use hal_abstractions::CycleCounter;
use rtcc_core::CalibrationConfig;

/// CPU core clock: 8 MHz FRC through the PLL (x3)
///
/// Must match the oscillator configuration bits; the calibration is only as
/// good as this number.
pub const SYS_CLK_FREQ: u32 = 24_000_000;

/// Interrupt priority level the RTCC vector is registered at
pub const RTCC_PRIORITY: u8 = 1;

/// Calibrate the RTCC against the core clock and start the periodic alarm
///
/// Blocks for about six seconds. `counter` reads the CP0 `Count` register.
pub fn bring_up<C>(
    rtcc: &mut Pic32mmRtcc,
    counter: &C,
    alarm: &AlarmConfig,
) -> Result<Hertz, CalibrationError>
where
    C: CycleCounter + ?Sized,
{
    let config = CalibrationConfig::new(SYS_CLK_FREQ);
    let mut irq = Pic32mmInterrupts::new();
    irq.set_priority(RTCC_PRIORITY);

    defmt::info!("RTCC bring-up, core clock {} Hz", SYS_CLK_FREQ);
    let lprc = rtcc_core::calibrate(rtcc, &mut irq, counter, &mut DefmtSink, &config, alarm)?;
    defmt::info!(
        "RTCC alarm {}, time {=u32:#x}",
        alarm.repeat,
        rtcc_core::read_time(&*rtcc).bits()
    );
    Ok(lprc)
}

/// RTCC interrupt vector body
#[inline]
pub fn rtcc_isr() {
    rtcc_core::on_alarm_interrupt(&mut Pic32mmInterrupts::new());
}
