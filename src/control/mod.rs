// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! This module provides the positioning logic of the gantry: square-addressed
//! motion, homing, and manual jog, all over the same exclusively-borrowed
//! axis state.
//!
//! ## Modules
//!
//! - [`interleave`] - Pure dual-axis pulse schedule.
//! - [`motion`] - The gantry aggregate and square-addressed motion.
//! - [`calibration`] - Bounded homing against the limit switches.
//! - [`jog`] - Manual stepping from the operator panel.

pub mod calibration;
pub mod interleave;
pub mod jog;
pub mod motion;

pub use calibration::{AxisId, Calibration, CalibrationError, DEFAULT_STEP_BUDGET};
pub use interleave::StepTrain;
pub use jog::{JogConfig, JogController, JogTick};
pub use motion::{Gantry, MoveSteps};
