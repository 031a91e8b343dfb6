// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Digital switch inputs: limit switches and panel buttons.
//!
//! The home limit switches and the recalibrate button are wired normally-open
//! to ground with the MCU pull-up enabled, so they read LOW when pressed.
//! The wrapper pins that polarity down at construction.

use embedded_hal::digital::v2::InputPin;

use crate::hw::ActiveLevel;

/// A debounce-free digital switch input.
pub struct Switch<PIN: InputPin> {
    pin: PIN,
    active: ActiveLevel,
}

impl<PIN: InputPin> Switch<PIN> {
    pub fn new(pin: PIN, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Normally-open switch to ground with a pull-up.
    pub fn active_low(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    pub fn active_high(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    /// True while the switch is pressed / the carriage sits on the switch.
    ///
    /// A read error is treated as not-triggered; the calibration step budget
    /// is the backstop against a dead input.
    pub fn is_triggered(&self) -> bool {
        match self.active {
            ActiveLevel::High => self.pin.is_high().unwrap_or(false),
            ActiveLevel::Low => self.pin.is_low().unwrap_or(false),
        }
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}
