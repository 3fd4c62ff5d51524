//! Program and data memory.
//!
//! A single word-addressed SRAM holds both instructions and data. It is only
//! reached through the [`Arbiter`](crate::soc::arbiter::Arbiter).

/// Synchronous single-port SRAM.
pub mod sram;

pub use sram::Sram;
