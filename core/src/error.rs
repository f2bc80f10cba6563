//! Calibration error types

use crate::Hertz;

/// Reasons an LPRC estimate is rejected before it reaches the divider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// The estimate falls outside the accepted window
    ///
    /// Usually means the CPU clock is not what `sys_clk_hz` claims (e.g. a
    /// missing crystal), since the LPRC itself cannot drift this far.
    OutOfRange {
        /// The rejected estimate
        measured: Hertz,
        /// Lowest accepted value
        min: Hertz,
        /// Highest accepted value
        max: Hertz,
    },
    /// The estimate would program a zero clock divider
    ZeroDivider,
}

impl core::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange { measured, min, max } => write!(
                f,
                "calibration out of range: {}Hz not in {}Hz..={}Hz",
                measured.raw(),
                min.raw(),
                max.raw()
            ),
            Self::ZeroDivider => write!(f, "calibration would program a zero divider"),
        }
    }
}

impl core::error::Error for CalibrationError {}
