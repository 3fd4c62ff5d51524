//! Simulation utilities and program loading.
//!
//! Provides the hex image loader and the run driver that boots the core and
//! ticks it until it halts.

/// Hex image parsing, packing and halt rewrite.
pub mod loader;

/// Run driver.
pub mod simulator;

pub use loader::ProgramImage;
pub use simulator::{RunSummary, Simulator};
