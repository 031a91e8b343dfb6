// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Gambit Firmware
//!
//! This crate contains the firmware for the Gambit chess-gantry: a two-axis
//! stepper platform that positions a piece mover over an 8×8 board, written
//! in Rust, targeting an STM32F767 MCU.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | MCU-level wrappers around GPIO, ADC, USART |
//! | [`drivers`] | Device-level drivers (STEP/DIR front-end, enable line) |
//! | [`motors`] | Axis abstraction: geometry and position over a driver |
//! | [`control`] | Motion coordination, homing, manual jog |
//! | [`board`] | Square indexing over the playing grid |
//! | [`protocol`] | Framed serial command parser |
//!
//! The control core is generic over `embedded-hal` pins and runs on the host
//! under `cargo test`; building for the board enables the `stm32f767`
//! feature, which brings in the HAL-facing `hw` modules and the binary.
//!
//! ## Getting Started
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features stm32f767
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod control;
pub mod drivers;
pub mod hw;
pub mod motors;
pub mod protocol;

#[cfg(test)]
pub(crate) mod test_utils;
