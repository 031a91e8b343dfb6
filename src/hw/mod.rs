// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCU-level hardware wrappers.
//!
//! `led` and `switch` are generic over `embedded-hal` pins and build
//! everywhere; the remaining modules talk to the STM32F7 HAL and only exist
//! when the board feature is enabled.

pub mod led;
pub mod switch;

#[cfg(feature = "stm32f767")]
pub mod adc;
#[cfg(feature = "stm32f767")]
pub mod pins;
#[cfg(feature = "stm32f767")]
pub mod usart;

pub use led::Led;
pub use switch::Switch;

#[cfg(feature = "stm32f767")]
pub use adc::Adc;
#[cfg(feature = "stm32f767")]
pub use pins::BoardPins;
#[cfg(feature = "stm32f767")]
pub use usart::Usart;

/// Whether an input or output is asserted when HIGH or when LOW.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}
