//! Host-side fakes for the hardware traits

#![allow(dead_code)]

use core::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use hal_abstractions::{CycleCounter, LineSink, RtccInterrupt, RtccRegisters, SystemKey};

use crate::alarm::AlarmFlag;
use crate::regs::syskey;

/// One register write, in issue order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    SysKey(u32),
    Rtccon1(u32),
    Rtccon1Set(u32),
    Rtccon1Clr(u32),
    Rtccon2(u32),
    RtcTime(u32),
    RtcDate(u32),
    AlmTime(u32),
    AlmDate(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyState {
    Locked,
    Cleared,
    FirstKey,
    Unlocked,
}

/// Register file that records writes and models the key protection
///
/// Protected writes arriving while locked are counted in `dropped_writes`
/// and have no effect, as on hardware. `RTCTIME` reads pop from a script;
/// once it runs dry the last stored time is returned.
pub struct FakeRtcc {
    pub writes: Vec<Write>,
    pub dropped_writes: usize,
    pub rtccon1: u32,
    pub rtccon2: u32,
    pub rtcdate: u32,
    pub almtime: u32,
    pub almdate: u32,
    rtctime: Cell<u32>,
    script: RefCell<VecDeque<u32>>,
    key: KeyState,
}

impl FakeRtcc {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            dropped_writes: 0,
            rtccon1: 0,
            rtccon2: 0,
            rtcdate: 0,
            almtime: 0,
            almdate: 0,
            rtctime: Cell::new(0),
            script: RefCell::new(VecDeque::new()),
            key: KeyState::Locked,
        }
    }

    /// Queue `RTCTIME` values returned by successive reads
    pub fn with_times(times: &[u32]) -> Self {
        let fake = Self::new();
        fake.script.borrow_mut().extend(times.iter().copied());
        fake
    }

    pub fn is_locked(&self) -> bool {
        self.key != KeyState::Unlocked
    }

    /// Writes of one kind, in order
    pub fn writes_matching(&self, pred: impl Fn(&Write) -> bool) -> Vec<Write> {
        self.writes.iter().copied().filter(|w| pred(w)).collect()
    }

    fn protected(&mut self, write: Write) -> bool {
        self.writes.push(write);
        if self.is_locked() {
            self.dropped_writes += 1;
            false
        } else {
            true
        }
    }
}

impl SystemKey for FakeRtcc {
    fn write_syskey(&mut self, value: u32) {
        self.writes.push(Write::SysKey(value));
        self.key = match (self.key, value) {
            (_, syskey::LOCK) => KeyState::Cleared,
            (KeyState::Cleared, syskey::KEY1) => KeyState::FirstKey,
            (KeyState::FirstKey, syskey::KEY2) => KeyState::Unlocked,
            _ => KeyState::Locked,
        };
    }
}

impl RtccRegisters for FakeRtcc {
    fn write_rtccon1(&mut self, value: u32) {
        if self.protected(Write::Rtccon1(value)) {
            self.rtccon1 = value;
        }
    }

    fn set_rtccon1(&mut self, mask: u32) {
        if self.protected(Write::Rtccon1Set(mask)) {
            self.rtccon1 |= mask;
        }
    }

    fn clear_rtccon1(&mut self, mask: u32) {
        if self.protected(Write::Rtccon1Clr(mask)) {
            self.rtccon1 &= !mask;
        }
    }

    fn write_rtccon2(&mut self, value: u32) {
        if self.protected(Write::Rtccon2(value)) {
            self.rtccon2 = value;
        }
    }

    fn read_rtctime(&self) -> u32 {
        if let Some(next) = self.script.borrow_mut().pop_front() {
            self.rtctime.set(next);
        }
        self.rtctime.get()
    }

    fn write_rtctime(&mut self, value: u32) {
        if self.protected(Write::RtcTime(value)) {
            self.rtctime.set(value);
        }
    }

    fn read_rtcdate(&self) -> u32 {
        self.rtcdate
    }

    fn write_rtcdate(&mut self, value: u32) {
        if self.protected(Write::RtcDate(value)) {
            self.rtcdate = value;
        }
    }

    fn write_almtime(&mut self, value: u32) {
        if self.protected(Write::AlmTime(value)) {
            self.almtime = value;
        }
    }

    fn write_almdate(&mut self, value: u32) {
        if self.protected(Write::AlmDate(value)) {
            self.almdate = value;
        }
    }
}

/// Interrupt controller fake; optionally watches a flag at pending-clear time
#[derive(Default)]
pub struct FakeIrq<'a> {
    pub enabled: bool,
    pub pending_clears: usize,
    pub watched: Option<&'a AlarmFlag>,
    pub flag_at_clear: Option<bool>,
}

impl<'a> FakeIrq<'a> {
    pub fn watching(flag: &'a AlarmFlag) -> Self {
        Self {
            watched: Some(flag),
            ..Self::default()
        }
    }
}

impl RtccInterrupt for FakeIrq<'_> {
    fn enable_rtcc_interrupt(&mut self) {
        self.enabled = true;
    }

    fn clear_rtcc_interrupt_pending(&mut self) {
        self.pending_clears += 1;
        self.flag_at_clear = self.watched.map(AlarmFlag::is_set);
    }
}

/// Counter that advances by `step` after every read
pub struct SteppingCounter {
    next: Cell<u32>,
    step: u32,
    reads: Cell<usize>,
}

impl SteppingCounter {
    pub fn new(start: u32, step: u32) -> Self {
        Self {
            next: Cell::new(start),
            step,
            reads: Cell::new(0),
        }
    }

    /// Value the next read will return
    pub fn now(&self) -> u32 {
        self.next.get()
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl CycleCounter for SteppingCounter {
    fn read_cycle_counter(&self) -> u32 {
        let value = self.next.get();
        self.next.set(value.wrapping_add(self.step));
        self.reads.set(self.reads.get() + 1);
        value
    }
}

/// Sink that keeps every line
#[derive(Default)]
pub struct RecordingSink {
    pub lines: Vec<String>,
}

impl LineSink for RecordingSink {
    fn write_line(&mut self, line: &str) {
        self.lines.push(String::from(line));
    }
}
