//! Scripted electrode bus for the unit tests.
//!
//! Pins are numbered `0..4` and every analog read pops the next queued sample
//! of that pin. The pin state at each read is kept so tests can check which
//! electrodes were driven while a sample was taken.

use embedded_hal::delay::DelayNs;
use heapless::{Deque, Vec};

use crate::electrode::{Level, PinMode, Wiring};
use crate::hal::ElectrodeBus;

pub const XP: u8 = 0;
pub const YP: u8 = 1;
pub const XM: u8 = 2;
pub const YM: u8 = 3;

pub fn wiring() -> Wiring<u8> {
    Wiring::new(XP, YP, XM, YM)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Mode(u8, PinMode),
    Write(u8, Level),
    Read(u8, u16),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MockError {
    Injected,
    /// no sample queued for this pin
    Exhausted(u8),
}

/// Pin state at the moment of an analog read
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub pin: u8,
    pub modes: [Option<PinMode>; 4],
    pub levels: [Level; 4],
}

impl Snapshot {
    pub fn driven(&self, pin: u8) -> Option<Level> {
        match self.modes[pin as usize] {
            Some(PinMode::Output) => Some(self.levels[pin as usize]),
            _ => None,
        }
    }

    pub fn is_input(&self, pin: u8) -> bool {
        self.modes[pin as usize] == Some(PinMode::Input)
    }
}

pub struct MockBus {
    modes: [Option<PinMode>; 4],
    levels: [Level; 4],
    samples: [Deque<u16, 32>; 4],
    ops: Vec<Op, 256>,
    reads: Vec<Snapshot, 32>,
    fail_after: Option<usize>,
    failing_pin: Option<u8>,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            modes: [None; 4],
            levels: [Level::Low; 4],
            samples: [Deque::new(), Deque::new(), Deque::new(), Deque::new()],
            ops: Vec::new(),
            reads: Vec::new(),
            fail_after: None,
            failing_pin: None,
        }
    }

    /// queues ADC results for `pin`, consumed in order
    pub fn queue(&mut self, pin: u8, samples: &[u16]) -> &mut Self {
        for s in samples {
            self.samples[pin as usize].push_back(*s).unwrap();
        }
        self
    }

    /// every call after `n` recorded operations fails
    pub fn fail_after_ops(&mut self, n: usize) {
        self.fail_after = Some(n);
    }

    /// analog reads on `pin` fail, pin configuration keeps working
    pub fn fail_reads_on(&mut self, pin: u8) {
        self.failing_pin = Some(pin);
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn reads(&self) -> &[Snapshot] {
        &self.reads
    }

    pub fn mode(&self, pin: u8) -> Option<PinMode> {
        self.modes[pin as usize]
    }

    pub fn level(&self, pin: u8) -> Level {
        self.levels[pin as usize]
    }

    pub fn pending(&self, pin: u8) -> usize {
        self.samples[pin as usize].len()
    }

    fn check(&self) -> Result<(), MockError> {
        match self.fail_after {
            Some(n) if self.ops.len() >= n => Err(MockError::Injected),
            _ => Ok(()),
        }
    }

    fn record(&mut self, op: Op) {
        self.ops.push(op).unwrap();
    }
}

impl ElectrodeBus for MockBus {
    type Pin = u8;
    type Error = MockError;

    fn set_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), MockError> {
        self.check()?;
        self.modes[pin as usize] = Some(mode);
        self.record(Op::Mode(pin, mode));
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), MockError> {
        self.check()?;
        self.levels[pin as usize] = level;
        self.record(Op::Write(pin, level));
        Ok(())
    }

    fn read_analog(&mut self, pin: u8) -> Result<u16, MockError> {
        self.check()?;
        if self.failing_pin == Some(pin) {
            return Err(MockError::Injected);
        }
        let value = self.samples[pin as usize]
            .pop_front()
            .ok_or(MockError::Exhausted(pin))?;
        self.reads
            .push(Snapshot {
                pin,
                modes: self.modes,
                levels: self.levels,
            })
            .unwrap();
        self.record(Op::Read(pin, value));
        Ok(value)
    }
}

/// Counts requested settling time instead of waiting
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub calls: u32,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
    }
}
