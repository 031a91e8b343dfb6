// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod messages;
pub mod parser;

pub use messages::Command;
pub use parser::Parser;
