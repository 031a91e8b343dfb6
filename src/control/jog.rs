// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Manual jog from the operator panel.
//!
//! Two potentiometer channels, one per axis, are sampled once per tick.
//! Deflection past a threshold issues a single unit step on that axis;
//! readings inside the deadband do nothing. The panel's recalibrate button
//! preempts jogging for that tick. Polling cadence belongs to the caller.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::control::motion::Gantry;
use crate::drivers::Direction;
use crate::hw::Switch;

/// Jog thresholds on the 0–1023 reading scale. `high` must exceed `low`;
/// the band between them is the deadband around the stick's center rest.
#[derive(Debug, Clone, Copy)]
pub struct JogConfig {
    pub high: u16,
    pub low: u16,
}

impl Default for JogConfig {
    fn default() -> Self {
        Self { high: 550, low: 450 }
    }
}

/// What one jog tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JogTick {
    /// The recalibrate button is held; the caller should run a full homing
    /// pass instead of jogging.
    Calibrate,
    /// Steps issued this tick (`None` = that axis stayed in the deadband).
    Jogged {
        x: Option<Direction>,
        y: Option<Direction>,
    },
}

/// Direction requested by one channel reading, if any.
fn direction_for(reading: u16, config: &JogConfig) -> Option<Direction> {
    if reading > config.high {
        Some(Direction::Positive)
    } else if reading < config.low {
        Some(Direction::Negative)
    } else {
        None
    }
}

/// Manual jog controller over two analog readers and the panel button.
pub struct JogController<RX, RY, BTN>
where
    RX: FnMut() -> u16,
    RY: FnMut() -> u16,
    BTN: InputPin,
{
    read_x: RX,
    read_y: RY,
    calibrate: Switch<BTN>,
    config: JogConfig,
}

impl<RX, RY, BTN> JogController<RX, RY, BTN>
where
    RX: FnMut() -> u16,
    RY: FnMut() -> u16,
    BTN: InputPin,
{
    pub fn new(read_x: RX, read_y: RY, calibrate: Switch<BTN>, config: JogConfig) -> Self {
        Self {
            read_x,
            read_y,
            calibrate,
            config,
        }
    }

    /// Run one control tick against the gantry.
    pub fn tick<XS, XD, YS, YD, D>(
        &mut self,
        gantry: &mut Gantry<XS, XD, YS, YD>,
        delay: &mut D,
    ) -> JogTick
    where
        XS: OutputPin,
        XD: OutputPin,
        YS: OutputPin,
        YD: OutputPin,
        D: DelayUs<u32>,
    {
        if self.calibrate.is_triggered() {
            return JogTick::Calibrate;
        }

        let x = direction_for((self.read_x)(), &self.config);
        let y = direction_for((self.read_y)(), &self.config);

        if let Some(dir) = x {
            gantry.x_mut().step_once(delay, dir);
        }
        if let Some(dir) = y {
            gantry.y_mut().step_once(delay, dir);
        }

        JogTick::Jogged { x, y }
    }
}
