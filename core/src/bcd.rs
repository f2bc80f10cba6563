//! Packed BCD time and date words
//!
//! `RTCTIME` holds hours, minutes and seconds as BCD byte pairs (tens digit in
//! the high nibble) with an unused low byte; `RTCDATE` packs year, month, day
//! and weekday the same way. Only the time word is decoded here, the date word
//! is carried around as an opaque value.

use core::fmt;

/// Decode the two-digit BCD field whose ones nibble starts at bit `offset`
///
/// Nibbles outside `0..=9` are out of domain; the result is then meaningless
/// but never panics.
#[inline]
pub const fn decode_field(word: u32, offset: u32) -> u32 {
    ((word >> (offset + 4)) & 0xF) * 10 + ((word >> offset) & 0xF)
}

/// Encode `value % 100` as a two-digit BCD byte
#[inline]
pub const fn encode_field(value: u8) -> u32 {
    let value = (value % 100) as u32;
    ((value / 10) << 4) | (value % 10)
}

/// Packed BCD time as found in `RTCTIME` and `ALMTIME`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackedTime(pub u32);

impl PackedTime {
    /// Bit offset of the hours field
    pub const HOURS_OFFSET: u32 = 24;
    /// Bit offset of the minutes field
    pub const MINUTES_OFFSET: u32 = 16;
    /// Bit offset of the seconds field
    pub const SECONDS_OFFSET: u32 = 8;

    /// 00:00:00
    pub const MIDNIGHT: Self = Self(0);

    /// Pack hours, minutes and seconds
    ///
    /// Values are reduced modulo 100; no calendar validation is done.
    pub const fn from_hms(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self(
            encode_field(hours) << Self::HOURS_OFFSET
                | encode_field(minutes) << Self::MINUTES_OFFSET
                | encode_field(seconds) << Self::SECONDS_OFFSET,
        )
    }

    /// The raw register value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Decoded hours
    pub const fn hours(self) -> u32 {
        decode_field(self.0, Self::HOURS_OFFSET)
    }

    /// Decoded minutes
    pub const fn minutes(self) -> u32 {
        decode_field(self.0, Self::MINUTES_OFFSET)
    }

    /// Decoded seconds
    pub const fn seconds(self) -> u32 {
        decode_field(self.0, Self::SECONDS_OFFSET)
    }

    /// Total seconds since 00:00:00
    pub const fn elapsed_seconds(self) -> u32 {
        self.hours() * 3600 + self.minutes() * 60 + self.seconds()
    }
}

impl fmt::Display for PackedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

/// Packed BCD date as found in `RTCDATE` and `ALMDATE`
///
/// Layout: year (bits 31..24), month (23..16), day (15..8), weekday (7..0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackedDate(pub u32);

impl PackedDate {
    /// 2000-01-01, weekday 1; the reference the RTCC is reset to
    pub const EPOCH: Self = Self(0x0001_0101);

    /// The raw register value
    pub const fn bits(self) -> u32 {
        self.0
    }
}
