//! Recording bus for driver tests.
//!
//! The mocks in `embedded-hal-mock` check each pin on its own, which can't
//! tell whether a clock edge came before or after a data edge. The pins and
//! delay here write into one shared trace instead, and DATA reads are served
//! from a script of levels so a test can play the sensor's side.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};

use crate::signal::{BIT_DELAY_US, Signal};

/// One recorded bus event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Clock(bool),
    Data(bool),
    Sample(bool),
    DelayUs(u32),
    DelayMs(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fault;

impl digital::Error for Fault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Default)]
struct State {
    trace: Vec<Op>,
    samples: VecDeque<bool>,
    fail_after: Option<usize>,
}

impl State {
    fn record(&mut self, op: Op) -> Result<(), Fault> {
        if let Some(remaining) = self.fail_after.as_mut() {
            if *remaining == 0 {
                return Err(Fault);
            }
            *remaining -= 1;
        }
        self.trace.push(op);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<State>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> ClockPin {
        ClockPin(self.clone())
    }

    pub fn data(&self) -> DataPin {
        DataPin(self.clone())
    }

    pub fn delay(&self) -> RecordingDelay {
        RecordingDelay(self.clone())
    }

    pub fn trace(&self) -> Vec<Op> {
        self.0.borrow().trace.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().trace.clear();
    }

    /// Pin operations after the next `ops` ones fail.
    pub fn fail_after(&self, ops: usize) {
        self.0.borrow_mut().fail_after = Some(ops);
    }

    pub fn unread_samples(&self) -> usize {
        self.0.borrow().samples.len()
    }

    /// Queues DATA levels for the driver to read. Once the script runs out
    /// DATA reads high, as the pull-up would leave it with no sensor.
    pub fn script(&self, levels: impl IntoIterator<Item = bool>) {
        self.0.borrow_mut().samples.extend(levels);
    }

    /// Sensor acknowledges a command byte.
    pub fn script_ack(&self) {
        self.script([false]);
    }

    /// Sensor shifts out a byte, MSB first.
    pub fn script_byte(&self, byte: u8) {
        self.script((0..8).map(|i| (byte >> (7 - i)) & 1 == 1));
    }

    /// Sensor side of a full measurement exchange: acknowledge the command,
    /// stay busy for `busy_polls` polls, then send value and checksum.
    pub fn script_measurement(&self, busy_polls: usize, value: u16, checksum: u8) {
        self.script_ack();
        self.script(std::iter::repeat_n(true, busy_polls));
        self.script([false]);
        let [high, low] = value.to_be_bytes();
        self.script_byte(high);
        self.script_byte(low);
        self.script_byte(checksum);
    }

    fn sample(&self) -> Result<bool, Fault> {
        let mut state = self.0.borrow_mut();
        let level = state.samples.pop_front().unwrap_or(true);
        state.record(Op::Sample(level))?;
        Ok(level)
    }
}

pub struct ClockPin(Recorder);

impl ErrorType for ClockPin {
    type Error = Fault;
}

impl OutputPin for ClockPin {
    fn set_low(&mut self) -> Result<(), Fault> {
        self.0.0.borrow_mut().record(Op::Clock(false))
    }

    fn set_high(&mut self) -> Result<(), Fault> {
        self.0.0.borrow_mut().record(Op::Clock(true))
    }
}

pub struct DataPin(Recorder);

impl ErrorType for DataPin {
    type Error = Fault;
}

impl OutputPin for DataPin {
    fn set_low(&mut self) -> Result<(), Fault> {
        self.0.0.borrow_mut().record(Op::Data(false))
    }

    fn set_high(&mut self) -> Result<(), Fault> {
        self.0.0.borrow_mut().record(Op::Data(true))
    }
}

impl InputPin for DataPin {
    fn is_high(&mut self) -> Result<bool, Fault> {
        self.0.sample()
    }

    fn is_low(&mut self) -> Result<bool, Fault> {
        self.0.sample().map(|level| !level)
    }
}

pub struct RecordingDelay(Recorder);

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.0.borrow_mut().trace.push(Op::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.0.borrow_mut().trace.push(Op::DelayMs(ms));
    }
}

/// Expected trace of a fixed signal sequence.
pub fn signals(seq: &[Signal]) -> Vec<Op> {
    seq.iter()
        .map(|signal| match signal {
            Signal::ClockHigh => Op::Clock(true),
            Signal::ClockLow => Op::Clock(false),
            Signal::DataAssertLow => Op::Data(false),
            Signal::DataRelease => Op::Data(true),
            Signal::Delay => Op::DelayUs(BIT_DELAY_US),
        })
        .collect()
}

/// Expected trace of sending `byte`, with the sensor answering `acked`.
pub fn sent_byte(byte: u8, acked: bool) -> Vec<Op> {
    let mut ops = vec![];
    for i in 0..8 {
        let bit = (byte >> (7 - i)) & 1 == 1;
        ops.extend([
            Op::Clock(false),
            Op::DelayUs(1),
            Op::Data(bit),
            Op::DelayUs(1),
            Op::Clock(true),
            Op::DelayUs(1),
        ]);
    }
    ops.extend([
        Op::Clock(false),
        Op::DelayUs(1),
        Op::Data(true),
        Op::DelayUs(1),
        Op::Clock(true),
        Op::DelayUs(1),
        Op::Sample(!acked),
        Op::Clock(false),
        Op::DelayUs(1),
    ]);
    ops
}

/// Expected trace of receiving `byte`.
pub fn received_byte(byte: u8, ack: bool) -> Vec<Op> {
    let mut ops = vec![];
    for i in 0..8 {
        let bit = (byte >> (7 - i)) & 1 == 1;
        ops.extend([
            Op::Clock(true),
            Op::DelayUs(1),
            Op::Sample(bit),
            Op::Clock(false),
            Op::DelayUs(1),
        ]);
    }
    if ack {
        ops.extend([Op::Data(false), Op::DelayUs(1)]);
    }
    ops.extend([
        Op::Clock(true),
        Op::DelayUs(1),
        Op::Clock(false),
        Op::DelayUs(1),
    ]);
    if ack {
        ops.extend([Op::Data(true), Op::DelayUs(1)]);
    }
    ops
}
