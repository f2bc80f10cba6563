//! RTCC calibration and alarm controller
//!
//! Brings the RTCC up from a frequency estimate: epoch date/time, periodic
//! chime alarm, LPRC clock with the matching divider, then the interrupt.

use hal_abstractions::{CycleCounter, LineSink, RtccInterrupt, RtccRegisters};

use crate::bcd::{PackedDate, PackedTime};
use crate::config::{AlarmConfig, CalibrationConfig};
use crate::error::CalibrationError;
use crate::estimator::{check_frequency, estimate_frequency};
use crate::regs::{rtccon1, rtccon2};
use crate::Hertz;
use crate::unlock::unlock;

/// `RTCCON2` value: clock divider and clock source
///
/// Computed once per [`initialize`] and written once; recalibrating means
/// running [`initialize`] again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DividerConfig(u32);

impl DividerConfig {
    /// LPRC with no division; used while measuring
    pub const UNCALIBRATED: Self = Self::lprc(0);

    /// LPRC with an explicit divider
    pub const fn lprc(divider: u16) -> Self {
        Self(((divider as u32) << rtccon2::DIV_SHIFT) | rtccon2::CLKSEL_LPRC)
    }

    /// Largest value the 16-bit `DIV` field holds
    pub const MAX_DIVIDER: u32 = rtccon2::DIV_MASK >> rtccon2::DIV_SHIFT;

    /// Highest frequency whose divider still fits the `DIV` field
    pub const MAX_FREQUENCY: Hertz = Hertz::from_raw(Self::MAX_DIVIDER * 2 + 1);

    /// LPRC with the divider for a measured frequency (`frequency / 2`)
    ///
    /// Not validated: a zero frequency yields a zero divider, and quotients
    /// above [`MAX_DIVIDER`](Self::MAX_DIVIDER) lose their upper bits.
    /// [`check_frequency`](crate::check_frequency) rejects both.
    pub const fn for_frequency(frequency: Hertz) -> Self {
        Self(((frequency.raw() / 2) << rtccon2::DIV_SHIFT) | rtccon2::CLKSEL_LPRC)
    }

    /// Raw register value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The `DIV` field
    pub const fn divider(self) -> u32 {
        (self.0 & rtccon2::DIV_MASK) >> rtccon2::DIV_SHIFT
    }

    /// The `CLKSEL` field
    pub const fn clock_source(self) -> u32 {
        self.0 & rtccon2::CLKSEL_MASK
    }
}

/// Program the RTCC for `frequency` and start the periodic alarm
///
/// Leaves the RTCC running and write-locked, the system key locked, and the
/// RTCC interrupt enabled. Nothing is validated; see [`calibrate`].
pub fn initialize<R, I>(regs: &mut R, irq: &mut I, frequency: Hertz, alarm: &AlarmConfig)
where
    R: RtccRegisters,
    I: RtccInterrupt + ?Sized,
{
    let divider = DividerConfig::for_frequency(frequency);
    {
        let mut rtcc = unlock(regs);
        rtcc.clear_rtccon1(rtccon1::WRLOCK);
        rtcc.clear_rtccon1(rtccon1::ON);

        rtcc.write_rtcdate(PackedDate::EPOCH.bits());
        rtcc.write_rtctime(PackedTime::MIDNIGHT.bits());

        rtcc.write_almdate(alarm.date.bits());
        rtcc.write_almtime(alarm.time.bits());
        rtcc.write_rtccon1(alarm.control_word());

        rtcc.write_rtccon2(divider.bits());

        rtcc.set_rtccon1(rtccon1::ON);
        rtcc.set_rtccon1(rtccon1::WRLOCK);
    }
    irq.enable_rtcc_interrupt();

    info!(
        "RTCC running from LPRC at {} Hz, divider {}",
        frequency.raw(),
        divider.divider()
    );
}

/// Current RTCC time
pub fn read_time<R: RtccRegisters + ?Sized>(regs: &R) -> PackedTime {
    PackedTime(regs.read_rtctime())
}

/// Measure, validate, and program the RTCC
///
/// On a rejected estimate the RTCC is left in its measuring state (LPRC,
/// zero divider) and the interrupt stays disabled.
pub fn calibrate<R, I, C, S>(
    regs: &mut R,
    irq: &mut I,
    counter: &C,
    sink: &mut S,
    config: &CalibrationConfig,
    alarm: &AlarmConfig,
) -> Result<Hertz, CalibrationError>
where
    R: RtccRegisters,
    I: RtccInterrupt + ?Sized,
    C: CycleCounter + ?Sized,
    S: LineSink + ?Sized,
{
    let estimate = estimate_frequency(regs, counter, sink, config);
    let frequency = check_frequency(estimate, config).inspect_err(|e| {
        error!("LPRC calibration rejected: {}", e);
    })?;
    initialize(regs, irq, frequency, alarm);
    Ok(frequency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlarmRepeat;
    use crate::fake::{FakeIrq, FakeRtcc, RecordingSink, SteppingCounter, Write};
    use crate::regs::syskey;

    #[test]
    fn test_divider_for_132_hz() {
        let divider = DividerConfig::for_frequency(Hertz::Hz(132));
        assert_eq!(divider.divider(), 66);
        assert_eq!(divider.clock_source(), rtccon2::CLKSEL_LPRC);
        assert_eq!(divider.bits(), 0x0042_0001);
    }

    #[test]
    fn test_divider_is_half_frequency() {
        for f in [0, 1, 2, 3, 131, 32_000, 32_130, 32_131, 65_535, 131_071] {
            let divider = DividerConfig::for_frequency(Hertz::Hz(f));
            assert_eq!(divider.divider(), f / 2, "frequency {}", f);
            assert_eq!(divider.bits() & 0xFFFF, rtccon2::CLKSEL_LPRC);
        }
    }

    #[test]
    fn test_divider_truncates_to_field() {
        let divider = DividerConfig::for_frequency(Hertz::Hz(u32::MAX));
        assert_eq!(divider.bits(), 0xFFFF_0001);
    }

    #[test]
    fn test_max_frequency_fills_divider_field() {
        let divider = DividerConfig::for_frequency(DividerConfig::MAX_FREQUENCY);
        assert_eq!(divider.divider(), 0xFFFF);
        assert_eq!(DividerConfig::MAX_FREQUENCY, Hertz::Hz(131_071));
    }

    #[test]
    fn test_uncalibrated_divider() {
        assert_eq!(DividerConfig::UNCALIBRATED.bits(), 0x0000_0001);
        assert_eq!(DividerConfig::lprc(66), DividerConfig::for_frequency(Hertz::Hz(132)));
    }

    #[test]
    fn test_initialize_132_hz() {
        let mut regs = FakeRtcc::new();
        let mut irq = FakeIrq::default();
        initialize(&mut regs, &mut irq, Hertz::Hz(132), &AlarmConfig::new(AlarmRepeat::EveryHour));

        let rtccon2_writes = regs.writes_matching(|w| matches!(w, Write::Rtccon2(_)));
        assert_eq!(rtccon2_writes, [Write::Rtccon2(0x0042_0001)]);
        assert_eq!(regs.rtccon2, 0x0042_0001);
        assert_eq!(regs.dropped_writes, 0);
        assert!(regs.is_locked());
        assert!(irq.enabled);
    }

    #[test]
    fn test_initialize_write_sequence() {
        let mut regs = FakeRtcc::new();
        let mut irq = FakeIrq::default();
        initialize(&mut regs, &mut irq, Hertz::Hz(32_130), &AlarmConfig::new(AlarmRepeat::EveryHour));

        assert_eq!(
            regs.writes,
            [
                Write::SysKey(syskey::LOCK),
                Write::SysKey(syskey::KEY1),
                Write::SysKey(syskey::KEY2),
                Write::Rtccon1Clr(rtccon1::WRLOCK),
                Write::Rtccon1Clr(rtccon1::ON),
                Write::RtcDate(0x0001_0101),
                Write::RtcTime(0),
                Write::AlmDate(0x0004_1100),
                Write::AlmTime(0),
                Write::Rtccon1(0xC500_8000),
                Write::Rtccon2(0x3EC1_0001),
                Write::Rtccon1Set(rtccon1::ON),
                Write::Rtccon1Set(rtccon1::WRLOCK),
                Write::SysKey(syskey::LOCK),
            ]
        );
        assert_eq!(regs.rtccon1, 0xC500_8000 | rtccon1::WRLOCK);
    }

    #[test]
    fn test_initialize_every_minute() {
        let mut regs = FakeRtcc::new();
        let mut irq = FakeIrq::default();
        initialize(&mut regs, &mut irq, Hertz::Hz(32_130), &AlarmConfig::new(AlarmRepeat::EveryMinute));
        assert_eq!(
            regs.writes_matching(|w| matches!(w, Write::Rtccon1(_))),
            [Write::Rtccon1(0xC300_8000)]
        );
    }

    #[test]
    fn test_initialize_zero_frequency_is_not_validated() {
        let mut regs = FakeRtcc::new();
        let mut irq = FakeIrq::default();
        initialize(&mut regs, &mut irq, Hertz::Hz(0), &AlarmConfig::default());
        assert_eq!(regs.rtccon2, 0x0000_0001);
        assert!(irq.enabled);
    }

    #[test]
    fn test_read_time() {
        let regs = FakeRtcc::with_times(&[0x0012_3400]);
        let time = read_time(&regs);
        assert_eq!(time.minutes(), 12);
        assert_eq!(time.seconds(), 34);
    }

    #[test]
    fn test_calibrate_programs_measured_divider() {
        // 16000 uncalibrated seconds per window: 4:26:40
        let mut regs = FakeRtcc::with_times(&[0x0426_4000; 6]);
        let mut irq = FakeIrq::default();
        let counter = SteppingCounter::new(0, 4_000_000);
        let mut sink = RecordingSink::default();
        let config = CalibrationConfig::new(24_000_000);

        let frequency = calibrate(
            &mut regs,
            &mut irq,
            &counter,
            &mut sink,
            &config,
            &AlarmConfig::default(),
        );

        assert_eq!(frequency, Ok(Hertz::Hz(32_130)));
        assert_eq!(regs.rtccon2, DividerConfig::for_frequency(Hertz::Hz(32_130)).bits());
        assert!(irq.enabled);
        assert!(regs.is_locked());
    }

    #[test]
    fn test_calibrate_rejects_implausible_estimate() {
        let mut regs = FakeRtcc::with_times(&[0x0000_0100; 6]);
        let mut irq = FakeIrq::default();
        let counter = SteppingCounter::new(0, 4_000_000);
        let mut sink = RecordingSink::default();
        let config = CalibrationConfig::new(24_000_000);

        let result = calibrate(
            &mut regs,
            &mut irq,
            &counter,
            &mut sink,
            &config,
            &AlarmConfig::default(),
        );

        assert!(matches!(
            result,
            Err(CalibrationError::OutOfRange { measured, .. }) if measured == Hertz::Hz(132)
        ));
        assert!(!irq.enabled);
        assert_eq!(regs.rtccon2, DividerConfig::UNCALIBRATED.bits());
        assert!(regs.writes_matching(|w| matches!(w, Write::AlmDate(_))).is_empty());
    }
}
