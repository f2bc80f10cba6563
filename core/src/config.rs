//! Calibration and alarm configuration

use crate::bcd::{PackedDate, PackedTime};
use crate::regs::rtccon1;
use crate::Hertz;

/// Samples taken per calibration run
pub const DEFAULT_SAMPLE_COUNT: u32 = 6;

/// Leading samples dropped; the first window after re-enabling the RTCC runs short
pub const DEFAULT_DISCARDED_SAMPLES: u32 = 1;

/// The RTCC counts in half seconds, so the averaged count is doubled
pub const DEFAULT_TICK_COMPENSATION: u32 = 2;

/// Empirical offset added to the averaged estimate
///
/// Tuned on one hardware revision; recalibrate for others.
pub const DEFAULT_TRIM_HZ: u32 = 130;

/// Lowest accepted estimate
pub const DEFAULT_MIN_HZ: Hertz = Hertz::kHz(25);

/// Highest accepted estimate
pub const DEFAULT_MAX_HZ: Hertz = Hertz::kHz(39);

/// Frequency estimator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationConfig {
    /// CPU core clock; the cycle counter runs at half of this
    pub sys_clk_hz: u32,
    /// One-second windows sampled per run
    pub sample_count: u32,
    /// Leading samples excluded from the average
    pub discarded_samples: u32,
    /// Multiplier applied to the averaged count
    pub tick_compensation: u32,
    /// Offset added after averaging
    pub trim_hz: u32,
    /// Lower bound used by [`check_frequency`](crate::check_frequency)
    pub min_hz: Hertz,
    /// Upper bound used by [`check_frequency`](crate::check_frequency)
    pub max_hz: Hertz,
}

impl CalibrationConfig {
    /// Defaults for a given core clock
    pub const fn new(sys_clk_hz: u32) -> Self {
        Self {
            sys_clk_hz,
            sample_count: DEFAULT_SAMPLE_COUNT,
            discarded_samples: DEFAULT_DISCARDED_SAMPLES,
            tick_compensation: DEFAULT_TICK_COMPENSATION,
            trim_hz: DEFAULT_TRIM_HZ,
            min_hz: DEFAULT_MIN_HZ,
            max_hz: DEFAULT_MAX_HZ,
        }
    }

    /// Number of samples that enter the average (never zero)
    pub const fn averaged_samples(&self) -> u32 {
        let kept = self.sample_count.saturating_sub(self.discarded_samples);
        if kept == 0 {
            1
        } else {
            kept
        }
    }
}

/// Alarm repeat granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmRepeat {
    /// Fire when minutes and seconds match, i.e. once an hour
    EveryHour,
    /// Fire when seconds match, i.e. once a minute
    EveryMinute,
}

impl AlarmRepeat {
    /// The `AMASK` bits for this granularity
    pub const fn amask(self) -> u32 {
        match self {
            Self::EveryHour => rtccon1::AMASK_EVERY_HOUR,
            Self::EveryMinute => rtccon1::AMASK_EVERY_MINUTE,
        }
    }
}

impl Default for AlarmRepeat {
    fn default() -> Self {
        if cfg!(feature = "alarm-every-minute") {
            Self::EveryMinute
        } else {
            Self::EveryHour
        }
    }
}

/// Periodic alarm configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmConfig {
    /// Repeat granularity
    pub repeat: AlarmRepeat,
    /// `ALMDATE` value
    pub date: PackedDate,
    /// `ALMTIME` value; with the hourly mask only minutes and seconds matter
    pub time: PackedTime,
}

impl AlarmConfig {
    /// Default alarm target: April 11, 00:00:00
    pub const DEFAULT_DATE: PackedDate = PackedDate(0x0004_1100);

    /// Alarm with the default target and the given granularity
    pub const fn new(repeat: AlarmRepeat) -> Self {
        Self {
            repeat,
            date: Self::DEFAULT_DATE,
            time: PackedTime::MIDNIGHT,
        }
    }

    /// The `RTCCON1` word for this alarm
    ///
    /// Alarm enabled, chime (repeat forever), output on alarm event, `RTCOE`
    /// off, module on, write lock off.
    pub const fn control_word(&self) -> u32 {
        rtccon1::ALRMEN
            | rtccon1::CHIME
            | self.repeat.amask()
            | rtccon1::ON
            | rtccon1::OUTSEL_ALARM_EVENT
    }
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self::new(AlarmRepeat::default())
    }
}
