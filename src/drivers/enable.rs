// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Motor driver enable line.
//!
//! A4988-class driver boards share one ENABLE input across both axis drivers;
//! the input is active-low. The wrapper keeps the polarity in one place so
//! callers deal only in `enable`/`disable`.

use embedded_hal::digital::v2::OutputPin;

use crate::hw::ActiveLevel;

/// Shared driver enable output.
pub struct EnableLine<PIN: OutputPin> {
    pin: PIN,
    active: ActiveLevel,
    enabled: bool,
}

impl<PIN: OutputPin> EnableLine<PIN> {
    /// Wrap the enable output, leaving the drivers disabled.
    pub fn new(mut pin: PIN, active: ActiveLevel) -> Self {
        match active {
            ActiveLevel::High => pin.set_low().ok(),
            ActiveLevel::Low => pin.set_high().ok(),
        };
        Self {
            pin,
            active,
            enabled: false,
        }
    }

    /// Active-low wiring (A4988, DRV8825).
    pub fn active_low(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    /// Power the motor drivers.
    pub fn enable(&mut self) {
        match self.active {
            ActiveLevel::High => self.pin.set_high().ok(),
            ActiveLevel::Low => self.pin.set_low().ok(),
        };
        self.enabled = true;
    }

    /// Cut drive current; the motors freewheel.
    pub fn disable(&mut self) {
        match self.active {
            ActiveLevel::High => self.pin.set_low().ok(),
            ActiveLevel::Low => self.pin.set_high().ok(),
        };
        self.enabled = false;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{EventLog, LogPin};

    #[test]
    fn active_low_polarity() {
        let log = EventLog::new();
        let mut en = EnableLine::active_low(LogPin::new(&log, "en"));

        // Disabled at rest: pin parked high.
        assert!(!en.is_enabled());
        assert_eq!(log.last_level("en"), Some(true));

        en.enable();
        assert!(en.is_enabled());
        assert_eq!(log.last_level("en"), Some(false));

        en.disable();
        assert_eq!(log.last_level("en"), Some(true));
    }
}
