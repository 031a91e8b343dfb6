// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Mock pins, inputs, and delays for host-side tests.
//!
//! `EventLog`/`LogPin` record every output transition in order across any
//! number of pins, which is what the motion tests use to check pulse
//! interleaving and DIR-before-STEP ordering.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use core::convert::Infallible;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::{InputPin, OutputPin};

/// Ordered log of `(pin label, level)` transitions shared by several pins.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<(&'static str, bool)>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(&'static str, bool)> {
        self.events.borrow().clone()
    }

    /// Last level written to `label`, if it was ever written.
    pub fn last_level(&self, label: &str) -> Option<bool> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find(|(pin, _)| *pin == label)
            .map(|&(_, level)| level)
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn record(&self, label: &'static str, level: bool) {
        self.events.borrow_mut().push((label, level));
    }
}

/// Output pin that records its transitions into an [`EventLog`].
pub struct LogPin {
    log: EventLog,
    label: &'static str,
}

impl LogPin {
    pub fn new(log: &EventLog, label: &'static str) -> Self {
        Self {
            log: log.clone(),
            label,
        }
    }
}

impl OutputPin for LogPin {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.log.record(self.label, true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.log.record(self.label, false);
        Ok(())
    }
}

/// Input pin scripted by read count: high until the `low_after`-th sample,
/// low from then on. Models a limit switch the carriage reaches after N
/// polls, or one that never closes.
pub struct ScriptedInput {
    low_after: Option<u32>,
    samples: Cell<u32>,
}

impl ScriptedInput {
    pub fn low_after(samples: u32) -> Self {
        Self {
            low_after: Some(samples),
            samples: Cell::new(0),
        }
    }

    pub fn never_low() -> Self {
        Self {
            low_after: None,
            samples: Cell::new(0),
        }
    }

    fn sample_is_low(&self) -> bool {
        let n = self.samples.get();
        self.samples.set(n + 1);
        match self.low_after {
            Some(threshold) => n >= threshold,
            None => false,
        }
    }
}

impl InputPin for ScriptedInput {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Infallible> {
        Ok(!self.sample_is_low())
    }

    fn is_low(&self) -> Result<bool, Infallible> {
        Ok(self.sample_is_low())
    }
}

/// Delay that spends no time; tests care about ordering, not pacing.
pub struct NoopDelay;

impl DelayUs<u32> for NoopDelay {
    fn delay_us(&mut self, _us: u32) {}
}
