// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Actuator Abstractions
//!
//! This module contains motor-level wrappers that sit above device-level drivers in `drivers`.
//!
//! ## Modules
//!
//! - [`axis`] - One gantry axis: STEP/DIR driver plus geometry and position.

pub mod axis;

pub use axis::{Axis, AxisConfig, ConfigError};
