// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STEP/DIR stepper driver front-end (A4988/DRV8825-class).
//!
//! This module owns the two control lines of one stepper driver and provides
//! step pulse primitives. Motion sequencing and position accounting are
//! layered on top in `motors` and `control`.
//!
//! The driver samples DIR on the rising STEP edge, so the direction line must
//! be stable before the first pulse; [`StepDir::set_direction`] is therefore a
//! separate operation from pulsing.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

/// Direction of travel along an axis.
///
/// `Positive` moves away from the home limit switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    /// Direction implied by a signed step or distance delta.
    ///
    /// Zero maps to `Positive`; a zero-length move never pulses, so the
    /// choice is inert.
    #[inline]
    pub fn from_delta(delta: i32) -> Self {
        if delta < 0 {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }

    /// +1 or -1, for position accounting.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }
}

/// Step pulse timing.
///
/// `width_us` is how long STEP is held HIGH; `gap_us` is the LOW time before
/// the next pulse may start. Both come from the motor and driver datasheets,
/// not from any control-loop consideration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    pub width_us: u32,
    pub gap_us: u32,
}

impl Default for PulseTiming {
    /// 5 ms HIGH / 5 ms LOW, the cadence the gantry mechanics were tuned at.
    fn default() -> Self {
        Self {
            width_us: 5_000,
            gap_us: 5_000,
        }
    }
}

/// One stepper driver's STEP and DIR lines.
pub struct StepDir<STEP, DIR> {
    step: STEP,
    dir: DIR,
    timing: PulseTiming,
    direction: Direction,
}

impl<STEP: OutputPin, DIR: OutputPin> StepDir<STEP, DIR> {
    /// Take ownership of the control lines, driving STEP low and DIR to
    /// `Positive`.
    pub fn new(mut step: STEP, mut dir: DIR, timing: PulseTiming) -> Self {
        step.set_low().ok();
        dir.set_high().ok();
        Self {
            step,
            dir,
            timing,
            direction: Direction::Positive,
        }
    }

    #[inline]
    pub fn timing(&self) -> PulseTiming {
        self.timing
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Latch a travel direction onto the DIR line.
    ///
    /// Positive travel drives DIR high.
    pub fn set_direction(&mut self, direction: Direction) {
        match direction {
            Direction::Positive => self.dir.set_high().ok(),
            Direction::Negative => self.dir.set_low().ok(),
        };
        self.direction = direction;
    }

    /// Raise the STEP line. Used by the dual-axis pulse loop, which owns the
    /// shared timing.
    #[inline]
    pub fn step_high(&mut self) {
        self.step.set_high().ok();
    }

    /// Drop the STEP line.
    #[inline]
    pub fn step_low(&mut self) {
        self.step.set_low().ok();
    }

    /// Issue one complete step pulse using this driver's own timing.
    pub fn pulse<D: DelayUs<u32>>(&mut self, delay: &mut D) {
        self.step_high();
        delay.delay_us(self.timing.width_us);
        self.step_low();
        delay.delay_us(self.timing.gap_us);
    }

    /// Release the pins.
    pub fn free(self) -> (STEP, DIR) {
        (self.step, self.dir)
    }
}
