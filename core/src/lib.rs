//! Platform-agnostic LPRC frequency estimation and RTCC calibration
//!
//! The RTCC on PIC32MM parts can run from the low-power internal RC
//! oscillator (LPRC), whose frequency is only loosely specified. This crate
//! measures the real LPRC frequency against the CPU cycle counter and then
//! programs the RTCC divider so that wall-clock time and periodic alarms come
//! out right.
//!
//! ## Flow
//! 1. [`estimate_frequency`] restarts the RTCC uncalibrated six times, lets it
//!    run for one CPU-timed second each, and averages the elapsed time.
//! 2. [`initialize`] programs date/time, the periodic alarm and the divider
//!    derived from the estimate, then enables the RTCC interrupt.
//! 3. The board's interrupt vector calls [`on_alarm_interrupt`]; normal code
//!    polls [`is_alarm_flag_set`] and acknowledges with [`reset_alarm_flag`].
//!
//! [`calibrate`] runs 1 and 2 with a range check in between.
//!
//! Every write to the RTCC's protected registers goes through the
//! [`unlock`](unlock::unlock) guard, which re-locks on drop.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
#![deny(warnings)]

// must stay first so the logging macros are visible everywhere
mod fmt;

pub mod alarm;
pub mod bcd;
pub mod config;
pub mod controller;
pub mod error;
pub mod estimator;
pub mod regs;
pub mod unlock;
pub mod wait;

#[cfg(test)]
mod fake;

pub use alarm::{is_alarm_flag_set, on_alarm_interrupt, reset_alarm_flag, AlarmFlag, ALARM_EVENT};
pub use config::{AlarmConfig, AlarmRepeat, CalibrationConfig};
pub use controller::{calibrate, initialize, read_time, DividerConfig};
pub use error::CalibrationError;
pub use estimator::{check_frequency, estimate_frequency, Sample};
pub use wait::SpinDelay;

/// Frequencies are plain `u32` hertz
pub type Hertz = fugit::HertzU32;
