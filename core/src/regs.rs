//! Register bit-field layouts
//!
//! Named constants for every value written to the system key and RTCC
//! control registers, following the PIC32MM family reference manual.

/// System key register (`SYSKEY`) values
pub mod syskey {
    /// Any write other than the key pair re-locks; zero is the canonical lock value
    pub const LOCK: u32 = 0x0000_0000;
    /// First unlock key
    pub const KEY1: u32 = 0xAA99_6655;
    /// Second unlock key, must immediately follow [`KEY1`]
    pub const KEY2: u32 = 0x5566_99AA;
}

/// `RTCCON1`: alarm and module control
///
/// ```text
/// 31      30     29..28  27..24  23..16  15  14..12  11      10..8  7      6..4    3..0
/// ALRMEN  CHIME  -       AMASK   ALMRPT  ON  -       WRLOCK  -      RTCOE  OUTSEL  -
/// ```
pub mod rtccon1 {
    /// Alarm enable
    pub const ALRMEN: u32 = 1 << 31;
    /// Chime: the alarm repeats indefinitely instead of counting `ALMRPT` down
    pub const CHIME: u32 = 1 << 30;
    /// Alarm mask field position
    pub const AMASK_SHIFT: u32 = 24;
    /// Alarm mask field
    pub const AMASK_MASK: u32 = 0xF << AMASK_SHIFT;
    /// Alarm once a minute (seconds compared)
    pub const AMASK_EVERY_MINUTE: u32 = 0b0011 << AMASK_SHIFT;
    /// Alarm once an hour (minutes and seconds compared)
    pub const AMASK_EVERY_HOUR: u32 = 0b0101 << AMASK_SHIFT;
    /// Alarm repeat counter field position
    pub const ALMRPT_SHIFT: u32 = 16;
    /// Module enable
    pub const ON: u32 = 1 << 15;
    /// Write lock; must be clear to modify the other control fields
    pub const WRLOCK: u32 = 1 << 11;
    /// Output enable for the RTCC pin
    pub const RTCOE: u32 = 1 << 7;
    /// Output select field position
    pub const OUTSEL_SHIFT: u32 = 4;
    /// Output select: alarm event
    pub const OUTSEL_ALARM_EVENT: u32 = 0b000 << OUTSEL_SHIFT;
}

/// `RTCCON2`: clock source and divider
///
/// ```text
/// 31..16  15..11  10..6  5..4  3..2  1..0
/// DIV     FDIV    -      PS    -     CLKSEL
/// ```
pub mod rtccon2 {
    /// Clock divider field position
    pub const DIV_SHIFT: u32 = 16;
    /// Clock divider field
    pub const DIV_MASK: u32 = 0xFFFF << DIV_SHIFT;
    /// Fractional divider field position
    pub const FDIV_SHIFT: u32 = 11;
    /// Clock source field
    pub const CLKSEL_MASK: u32 = 0b11;
    /// Clock source: low-power internal RC oscillator
    pub const CLKSEL_LPRC: u32 = 0b01;
}
