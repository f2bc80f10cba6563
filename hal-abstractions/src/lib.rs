//! Hardware abstraction traits for the LPRC-calibrated RTCC driver
//!
//! This crate defines the seams between the platform-agnostic calibration
//! logic in `rtcc-core` and the board. Boards implement these traits on top
//! of their memory-mapped registers; tests implement them with fakes.

#![no_std]
#![deny(unsafe_code)]
#![deny(warnings)]

pub mod clock;
pub mod rtcc;
pub mod sink;

pub use clock::CycleCounter;
pub use rtcc::{RtccInterrupt, RtccRegisters, SystemKey};
pub use sink::{IoLineSink, LineSink, NullSink};
