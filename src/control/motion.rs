// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Motion coordination for the two-axis gantry.
//!
//! [`Gantry`] is the one owner of both axes and of the occupied-square state;
//! every controller (autonomous motion here, homing in `calibration`, manual
//! stepping in `jog`) works through an exclusive borrow of it, so the two
//! input modes can never mutate position concurrently.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

use crate::board::{Square, SQUARE_SIZE_MM};
use crate::control::interleave::StepTrain;
use crate::drivers::{Direction, PulseTiming};
use crate::motors::Axis;

/// Signed steps executed per axis by one motion call. Useful for console
/// reporting and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSteps {
    pub x: i32,
    pub y: i32,
}

/// The two-axis carriage and its board address.
pub struct Gantry<XS, XD, YS, YD> {
    x: Axis<XS, XD>,
    y: Axis<YS, YD>,
    current: Square,
}

impl<XS, XD, YS, YD> Gantry<XS, XD, YS, YD>
where
    XS: OutputPin,
    XD: OutputPin,
    YS: OutputPin,
    YD: OutputPin,
{
    /// Assemble the gantry. The carriage is assumed parked on square 0;
    /// run a calibration before trusting positions.
    pub fn new(x: Axis<XS, XD>, y: Axis<YS, YD>) -> Self {
        Self {
            x,
            y,
            current: Square::ORIGIN,
        }
    }

    /// Square the tool currently sits over.
    #[inline]
    pub fn square(&self) -> Square {
        self.current
    }

    /// Overwrite the square address without motion. Calibration uses this
    /// after physically parking the carriage on square 0.
    pub(crate) fn set_square(&mut self, square: Square) {
        self.current = square;
    }

    #[inline]
    pub fn x(&self) -> &Axis<XS, XD> {
        &self.x
    }

    #[inline]
    pub fn x_mut(&mut self) -> &mut Axis<XS, XD> {
        &mut self.x
    }

    #[inline]
    pub fn y(&self) -> &Axis<YS, YD> {
        &self.y
    }

    #[inline]
    pub fn y_mut(&mut self) -> &mut Axis<YS, YD> {
        &mut self.y
    }

    /// Move the carriage to `target`, both axes finishing in one shared pulse
    /// loop, and update the occupied square.
    ///
    /// The target is already validated by construction of [`Square`], so the
    /// only work left is the signed row/column delta against the current
    /// square. Addressing the current square again is a no-op.
    pub fn go_to_square<D: DelayUs<u32>>(&mut self, delay: &mut D, target: Square) -> MoveSteps {
        let (d_row, d_col) = self.current.delta_to(target);

        let x_steps = self.x.steps_for_mm((d_row * SQUARE_SIZE_MM as i32) as f32);
        let y_steps = self.y.steps_for_mm((d_col * SQUARE_SIZE_MM as i32) as f32);

        let executed = self.drive(delay, x_steps, y_steps);
        self.current = target;
        executed
    }

    /// Relative tool move in millimeters. Does not change the occupied
    /// square; it is an offset within/around a square, not an address change.
    pub fn move_mm<D: DelayUs<u32>>(&mut self, delay: &mut D, dx_mm: f32, dy_mm: f32) -> MoveSteps {
        let x_steps = self.x.steps_for_mm(dx_mm);
        let y_steps = self.y.steps_for_mm(dy_mm);
        self.drive(delay, x_steps, y_steps)
    }

    /// Run the interleaved pulse loop for the given signed step counts.
    ///
    /// Directions are latched before the first rising edge on either STEP
    /// line. Each tick raises the lines of the axes that still have distance
    /// to cover, holds them for the shared pulse width, then drops both and
    /// waits out the gap, so an axis that finishes early idles LOW while the
    /// other keeps pulsing.
    fn drive<D: DelayUs<u32>>(&mut self, delay: &mut D, x_steps: i32, y_steps: i32) -> MoveSteps {
        self.x
            .driver_mut()
            .set_direction(Direction::from_delta(x_steps));
        self.y
            .driver_mut()
            .set_direction(Direction::from_delta(y_steps));

        // The loop is paced for the slower of the two drivers.
        let timing = shared_timing(self.x.driver().timing(), self.y.driver().timing());

        let train = StepTrain::new(x_steps.unsigned_abs(), y_steps.unsigned_abs());
        for tick in train {
            if tick.x {
                self.x.driver_mut().step_high();
            }
            if tick.y {
                self.y.driver_mut().step_high();
            }
            delay.delay_us(timing.width_us);

            self.x.driver_mut().step_low();
            self.y.driver_mut().step_low();
            delay.delay_us(timing.gap_us);
        }

        self.x.record_steps(x_steps);
        self.y.record_steps(y_steps);

        MoveSteps {
            x: x_steps,
            y: y_steps,
        }
    }
}

/// Pulse timing slow enough for both drivers.
fn shared_timing(a: PulseTiming, b: PulseTiming) -> PulseTiming {
    PulseTiming {
        width_us: a.width_us.max(b.width_us),
        gap_us: a.gap_us.max(b.gap_us),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use crate::drivers::StepDir;
    use crate::motors::AxisConfig;
    use crate::test_utils::{EventLog, LogPin, NoopDelay};

    // The real machine's factors: X carries the long belt, Y the lead screw.
    const X_STEPS_PER_MM: u32 = 10;
    const Y_STEPS_PER_MM: u32 = 3;

    fn test_gantry(log: &EventLog) -> Gantry<LogPin, LogPin, LogPin, LogPin> {
        let x = Axis::new(
            StepDir::new(
                LogPin::new(log, "xs"),
                LogPin::new(log, "xd"),
                PulseTiming::default(),
            ),
            AxisConfig::new(X_STEPS_PER_MM).unwrap(),
        );
        let y = Axis::new(
            StepDir::new(
                LogPin::new(log, "ys"),
                LogPin::new(log, "yd"),
                PulseTiming::default(),
            ),
            AxisConfig::new(Y_STEPS_PER_MM).unwrap(),
        );
        Gantry::new(x, y)
    }

    fn sq(i: u8) -> Square {
        Square::new(i).unwrap()
    }

    #[test]
    fn full_diagonal_is_seven_squares_on_each_axis() {
        let log = EventLog::new();
        let mut g = test_gantry(&log);

        let mv = g.go_to_square(&mut NoopDelay, sq(63));
        assert_eq!(mv.x, 7 * 34 * X_STEPS_PER_MM as i32);
        assert_eq!(mv.y, 7 * 34 * Y_STEPS_PER_MM as i32);
        assert_eq!(g.x().position_steps(), 2380);
        assert_eq!(g.y().position_steps(), 714);
        assert_eq!(g.square(), sq(63));
    }

    #[test]
    fn addressing_is_path_independent() {
        let log = EventLog::new();
        let mut g = test_gantry(&log);

        // Wander, then land on 42. Position must depend only on 42.
        for target in [9, 60, 3, 42] {
            g.go_to_square(&mut NoopDelay, sq(target));
        }
        let (row, col) = (42 % 8, 42 / 8);
        assert_eq!(
            g.x().position_steps(),
            row * 34 * X_STEPS_PER_MM as i32
        );
        assert_eq!(
            g.y().position_steps(),
            col * 34 * Y_STEPS_PER_MM as i32
        );
    }

    #[test]
    fn same_square_twice_moves_nothing() {
        let log = EventLog::new();
        let mut g = test_gantry(&log);

        g.go_to_square(&mut NoopDelay, sq(20));
        let before = (g.x().position_steps(), g.y().position_steps());

        let mv = g.go_to_square(&mut NoopDelay, sq(20));
        assert_eq!(mv, MoveSteps { x: 0, y: 0 });
        assert_eq!(
            (g.x().position_steps(), g.y().position_steps()),
            before
        );
    }

    #[test]
    fn relative_moves_round_trip() {
        let log = EventLog::new();
        let mut g = test_gantry(&log);

        g.move_mm(&mut NoopDelay, 12.5, -7.0);
        g.move_mm(&mut NoopDelay, -12.5, 7.0);
        assert_eq!(g.x().position_steps(), 0);
        assert_eq!(g.y().position_steps(), 0);
    }

    #[test]
    fn relative_moves_keep_the_square_address() {
        let log = EventLog::new();
        let mut g = test_gantry(&log);

        g.go_to_square(&mut NoopDelay, sq(5));
        g.move_mm(&mut NoopDelay, 3.0, 3.0);
        assert_eq!(g.square(), sq(5));
    }

    #[test]
    fn directions_latch_before_the_first_pulse() {
        let log = EventLog::new();
        let mut g = test_gantry(&log);
        g.go_to_square(&mut NoopDelay, sq(63));
        log.clear();

        // Move back toward the origin: both DIR lines must go low before
        // either STEP line first rises.
        g.go_to_square(&mut NoopDelay, sq(0));

        let events = log.events();
        let first_step = events
            .iter()
            .position(|&(pin, level)| (pin == "xs" || pin == "ys") && level)
            .unwrap();
        let xd = events.iter().position(|&e| e == ("xd", false)).unwrap();
        let yd = events.iter().position(|&e| e == ("yd", false)).unwrap();
        assert!(xd < first_step);
        assert!(yd < first_step);
    }

    #[test]
    fn finished_axis_stays_low_while_the_other_runs() {
        let log = EventLog::new();
        let mut g = test_gantry(&log);
        log.clear();

        // One square over: X needs 340 pulses, Y needs 102.
        g.go_to_square(&mut NoopDelay, sq(9));

        let events = log.events();
        let x_pulses = events.iter().filter(|&&e| e == ("xs", true)).count();
        let y_pulses = events.iter().filter(|&&e| e == ("ys", true)).count();
        assert_eq!(x_pulses, 340);
        assert_eq!(y_pulses, 102);

        // No Y rising edge after its share of the train is done.
        let last_y_rise = events.iter().rposition(|&e| e == ("ys", true)).unwrap();
        let x_rises_after = events[last_y_rise..]
            .iter()
            .filter(|&&e| e == ("xs", true))
            .count();
        assert_eq!(x_rises_after, 340 - 102);
    }
}
