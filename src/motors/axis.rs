// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! One gantry axis: a STEP/DIR driver plus geometry and position tracking.
//!
//! Position is an absolute signed step count relative to the calibration
//! origin. Steppers run open-loop, so the count reflects commanded pulses;
//! only executed pulses are ever added to it.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;
use micromath::F32Ext;

use crate::drivers::{Direction, StepDir};

/// Axis construction error, fatal at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroStepsPerMm,
}

/// Immutable per-axis geometry.
///
/// The lead screws differ between the axes, so each axis carries its own
/// steps-per-millimeter factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisConfig {
    steps_per_mm: u32,
}

impl AxisConfig {
    pub fn new(steps_per_mm: u32) -> Result<Self, ConfigError> {
        if steps_per_mm == 0 {
            return Err(ConfigError::ZeroStepsPerMm);
        }
        Ok(Self { steps_per_mm })
    }

    #[inline]
    pub fn steps_per_mm(&self) -> u32 {
        self.steps_per_mm
    }
}

/// A single driven axis.
pub struct Axis<STEP, DIR> {
    driver: StepDir<STEP, DIR>,
    config: AxisConfig,
    position_steps: i32,
}

impl<STEP: OutputPin, DIR: OutputPin> Axis<STEP, DIR> {
    pub fn new(driver: StepDir<STEP, DIR>, config: AxisConfig) -> Self {
        Self {
            driver,
            config,
            position_steps: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> AxisConfig {
        self.config
    }

    /// Absolute position in steps from the calibration origin.
    #[inline]
    pub fn position_steps(&self) -> i32 {
        self.position_steps
    }

    /// Absolute position in millimeters.
    pub fn position_mm(&self) -> f32 {
        self.position_steps as f32 / self.config.steps_per_mm as f32
    }

    /// Redefine the current physical position as the origin. Calibration is
    /// the only caller.
    pub fn set_zero(&mut self) {
        self.position_steps = 0;
    }

    /// Signed step count equivalent to a signed millimeter displacement.
    pub fn steps_for_mm(&self, mm: f32) -> i32 {
        // `f32::round` is std-only; route through micromath explicitly.
        F32Ext::round(mm * self.config.steps_per_mm as f32) as i32
    }

    /// Issue exactly one step in `direction` and account for it.
    pub fn step_once<D: DelayUs<u32>>(&mut self, delay: &mut D, direction: Direction) {
        self.driver.set_direction(direction);
        self.driver.pulse(delay);
        self.position_steps += direction.sign();
    }

    /// Fold a completed pulse train into the position. The count must be the
    /// signed number of steps actually pulsed.
    pub(crate) fn record_steps(&mut self, executed: i32) {
        self.position_steps += executed;
    }

    #[inline]
    pub fn driver(&self) -> &StepDir<STEP, DIR> {
        &self.driver
    }

    #[inline]
    pub fn driver_mut(&mut self) -> &mut StepDir<STEP, DIR> {
        &mut self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::PulseTiming;
    use crate::test_utils::{EventLog, LogPin, NoopDelay};

    fn test_axis(log: &EventLog, steps_per_mm: u32) -> Axis<LogPin, LogPin> {
        let driver = StepDir::new(
            LogPin::new(log, "step"),
            LogPin::new(log, "dir"),
            PulseTiming::default(),
        );
        Axis::new(driver, AxisConfig::new(steps_per_mm).unwrap())
    }

    #[test]
    fn rejects_zero_scale_factor() {
        assert_eq!(AxisConfig::new(0), Err(ConfigError::ZeroStepsPerMm));
        assert_eq!(AxisConfig::new(10).unwrap().steps_per_mm(), 10);
    }

    #[test]
    fn converts_mm_to_steps_with_rounding() {
        let log = EventLog::new();
        let axis = test_axis(&log, 10);
        assert_eq!(axis.steps_for_mm(34.0), 340);
        assert_eq!(axis.steps_for_mm(-34.0), -340);
        assert_eq!(axis.steps_for_mm(0.26), 3);
    }

    #[test]
    fn single_steps_move_the_position() {
        let log = EventLog::new();
        let mut axis = test_axis(&log, 3);

        axis.step_once(&mut NoopDelay, Direction::Positive);
        axis.step_once(&mut NoopDelay, Direction::Positive);
        axis.step_once(&mut NoopDelay, Direction::Negative);
        assert_eq!(axis.position_steps(), 1);
    }

    #[test]
    fn zeroing_defines_a_new_origin() {
        let log = EventLog::new();
        let mut axis = test_axis(&log, 3);

        axis.record_steps(-120);
        assert_eq!(axis.position_steps(), -120);

        axis.set_zero();
        assert_eq!(axis.position_steps(), 0);
        assert_eq!(axis.position_mm(), 0.0);
    }
}
