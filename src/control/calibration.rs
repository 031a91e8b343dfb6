// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Homing against the limit switches.
//!
//! Each axis is stepped toward its home switch one pulse at a time until the
//! switch closes, then its position becomes the origin. The walk is bounded
//! by a step budget so a miswired or dead switch surfaces as an error instead
//! of driving the carriage into the frame forever.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::board::Square;
use crate::control::motion::Gantry;
use crate::drivers::Direction;
use crate::hw::Switch;
use crate::motors::Axis;

/// Worst-case steps from the far end of travel to a switch, with margin.
pub const DEFAULT_STEP_BUDGET: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisId {
    X,
    Y,
}

/// Homing failure. The axis position is left as the steps actually walked,
/// not zeroed; callers must not run motion on that axis afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    Timeout { axis: AxisId, budget: u32 },
}

/// Homing procedure configuration.
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    budget: u32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            budget: DEFAULT_STEP_BUDGET,
        }
    }
}

impl Calibration {
    pub fn new(budget: u32) -> Self {
        Self { budget }
    }

    #[inline]
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Walk one axis home. Returns the number of steps it took.
    ///
    /// The switch is sampled before every pulse, so a carriage already
    /// sitting on its switch issues no steps at all.
    pub fn home_axis<STEP, DIR, SW, D>(
        &self,
        id: AxisId,
        axis: &mut Axis<STEP, DIR>,
        home: &Switch<SW>,
        delay: &mut D,
    ) -> Result<u32, CalibrationError>
    where
        STEP: OutputPin,
        DIR: OutputPin,
        SW: InputPin,
        D: DelayUs<u32>,
    {
        for issued in 0..self.budget {
            if home.is_triggered() {
                axis.set_zero();
                return Ok(issued);
            }
            axis.step_once(delay, Direction::Negative);
        }
        if home.is_triggered() {
            axis.set_zero();
            return Ok(self.budget);
        }
        Err(CalibrationError::Timeout {
            axis: id,
            budget: self.budget,
        })
    }

    /// Home X, then Y. A failure on X aborts before Y is touched.
    ///
    /// On success the carriage sits on square 0 with both origins redefined.
    pub fn home_all<XS, XD, YS, YD, SWX, SWY, D>(
        &self,
        gantry: &mut Gantry<XS, XD, YS, YD>,
        x_home: &Switch<SWX>,
        y_home: &Switch<SWY>,
        delay: &mut D,
    ) -> Result<(), CalibrationError>
    where
        XS: OutputPin,
        XD: OutputPin,
        YS: OutputPin,
        YD: OutputPin,
        SWX: InputPin,
        SWY: InputPin,
        D: DelayUs<u32>,
    {
        self.home_axis(AxisId::X, gantry.x_mut(), x_home, delay)?;
        self.home_axis(AxisId::Y, gantry.y_mut(), y_home, delay)?;
        gantry.set_square(Square::ORIGIN);
        Ok(())
    }
}
