//! LPRC frequency estimator
//!
//! The RTCC is restarted from 00:00:00 with the LPRC selected and a zero
//! divider, so it accumulates at its raw, uncalibrated rate. After one second
//! timed by the CPU cycle counter, the elapsed RTCC time is read back. With
//! the divider at zero the RTCC advances half a second per clock period, so
//! the decoded elapsed "seconds" count half the LPRC frequency.
//!
//! Six windows are sampled. The first is thrown away (the RTCC has not
//! settled after re-enabling), the other five are averaged, doubled for the
//! half-second tick, and trimmed by an empirical constant. Averaging five
//! windows brings the ±0.5 s tick quantization down to roughly ±0.1 s.

use core::fmt::Write as _;

use hal_abstractions::{CycleCounter, LineSink, RtccRegisters};
use heapless::String;

use crate::bcd::{PackedDate, PackedTime};
use crate::config::CalibrationConfig;
use crate::controller::DividerConfig;
use crate::error::CalibrationError;
use crate::regs::rtccon1;
use crate::Hertz;
use crate::unlock::unlock;
use crate::wait::{one_second_threshold, spin_wait};

/// Longest diagnostic line we emit
const LINE_CAPACITY: usize = 48;

/// One measurement window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Raw `RTCTIME` at the end of the window
    pub time: PackedTime,
    /// Raw `RTCDATE` at the end of the window
    pub date: PackedDate,
    /// Decoded elapsed time in (uncalibrated) seconds
    pub elapsed_secs: u32,
}

/// Measure the LPRC frequency
///
/// Blocks for `config.sample_count` CPU-timed seconds. Always returns a
/// value; use [`check_frequency`] to reject nonsense before programming it.
pub fn estimate_frequency<R, C, S>(
    regs: &mut R,
    counter: &C,
    sink: &mut S,
    config: &CalibrationConfig,
) -> Hertz
where
    R: RtccRegisters,
    C: CycleCounter + ?Sized,
    S: LineSink + ?Sized,
{
    sink.write_line("LPRC FRQ culc");
    info!(
        "estimating LPRC frequency: {} samples, {} discarded",
        config.sample_count,
        config.discarded_samples
    );

    let threshold = one_second_threshold(config.sys_clk_hz);
    let mut total: u32 = 0;

    for index in 0..config.sample_count {
        let sample = take_sample(regs, counter, threshold);
        report_sample(sink, &sample);

        if index < config.discarded_samples {
            debug!("sample {} discarded: {} s", index, sample.elapsed_secs);
        } else {
            debug!("sample {}: {} s", index, sample.elapsed_secs);
            total = total.wrapping_add(sample.elapsed_secs);
        }
    }

    let frequency = average(total, config);
    report_estimate(sink, frequency);
    info!("LPRC frequency estimate: {} Hz", frequency.raw());
    frequency
}

/// Run one measurement window of `threshold` counter ticks
pub fn take_sample<R, C>(regs: &mut R, counter: &C, threshold: u32) -> Sample
where
    R: RtccRegisters,
    C: CycleCounter + ?Sized,
{
    restart_uncalibrated(regs);
    spin_wait(counter, threshold);

    let time = PackedTime(regs.read_rtctime());
    let date = PackedDate(regs.read_rtcdate());
    Sample {
        time,
        date,
        elapsed_secs: time.elapsed_seconds(),
    }
}

/// Reset the RTCC to the epoch and let it free-run from the undivided LPRC
fn restart_uncalibrated<R: RtccRegisters>(regs: &mut R) {
    let mut rtcc = unlock(regs);
    rtcc.clear_rtccon1(rtccon1::WRLOCK);
    rtcc.clear_rtccon1(rtccon1::ON);

    rtcc.write_rtcdate(PackedDate::EPOCH.bits());
    rtcc.write_rtctime(PackedTime::MIDNIGHT.bits());
    rtcc.write_rtccon2(DividerConfig::UNCALIBRATED.bits());

    rtcc.set_rtccon1(rtccon1::ON);
    rtcc.set_rtccon1(rtccon1::WRLOCK);
}

/// Turn the summed elapsed seconds of the kept samples into hertz
///
/// Integer division truncates; the result is not rounded.
pub const fn average(total: u32, config: &CalibrationConfig) -> Hertz {
    average_over(total, config.averaged_samples(), config)
}

const fn average_over(total: u32, count: u32, config: &CalibrationConfig) -> Hertz {
    let count = if count == 0 { 1 } else { count };
    Hertz::from_raw((total / count) * config.tick_compensation + config.trim_hz)
}

/// Estimate from already collected per-window elapsed seconds
///
/// Applies the same discard and averaging rules as [`estimate_frequency`]:
/// the first `discarded_samples` entries are skipped and at most
/// `sample_count - discarded_samples` of the rest are averaged. A shorter
/// slice is averaged over the samples it actually holds; an empty one counts
/// as a single zero sample.
pub fn estimate_from_samples(elapsed_secs: &[u32], config: &CalibrationConfig) -> Hertz {
    let (total, count) = elapsed_secs
        .iter()
        .skip(config.discarded_samples as usize)
        .take(config.averaged_samples() as usize)
        .fold((0u32, 0u32), |(sum, n), s| (sum.wrapping_add(*s), n + 1));
    average_over(total, count, config)
}

/// Accept an estimate only if it is plausible for the LPRC
///
/// The upper bound is `config.max_hz` or [`DividerConfig::MAX_FREQUENCY`],
/// whichever is lower, so an accepted estimate always programs its exact
/// divider.
pub fn check_frequency(
    frequency: Hertz,
    config: &CalibrationConfig,
) -> Result<Hertz, CalibrationError> {
    if frequency.raw() / 2 == 0 {
        return Err(CalibrationError::ZeroDivider);
    }
    let max = if config.max_hz > DividerConfig::MAX_FREQUENCY {
        DividerConfig::MAX_FREQUENCY
    } else {
        config.max_hz
    };
    if frequency < config.min_hz || frequency > max {
        return Err(CalibrationError::OutOfRange {
            measured: frequency,
            min: config.min_hz,
            max,
        });
    }
    Ok(frequency)
}

fn report_sample<S: LineSink + ?Sized>(sink: &mut S, sample: &Sample) {
    let mut line: String<LINE_CAPACITY> = String::new();
    let _ = write!(line, "{:08X} {:08X}", sample.time.bits(), sample.elapsed_secs);
    sink.write_line(&line);
}

fn report_estimate<S: LineSink + ?Sized>(sink: &mut S, frequency: Hertz) {
    let mut line: String<LINE_CAPACITY> = String::new();
    let _ = write!(line, "LPRC FRQ = {}Hz [{:08X}] ", frequency.raw(), frequency.raw());
    sink.write_line(&line);
}
