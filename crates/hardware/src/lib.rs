//! Cycle-accurate RV32I pipeline model.
//!
//! This crate implements a five-stage, in-order RV32I pipeline with the following:
//! 1. **Core:** Fetch, decode/forward, execute, memory and writeback stages with
//!    priority forwarding, structural stalls and misprediction recovery.
//! 2. **Memory:** One single-ported SRAM shared by fetch and data, reached through
//!    an arbiter that performs sub-word stores as read-modify-write.
//! 3. **ISA:** A validated RV32I decode table, immediates and a disassembler.
//! 4. **Simulation:** Hex image loading, configuration, the run driver and statistics.

/// Common types and constants (errors, logging capability, geometry).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (pipeline, register file, functional units).
pub mod core;
/// Instruction set (decode table, fields, immediates, disassembler).
pub mod isa;
/// Image loader and run driver.
pub mod sim;
/// Single-port memory and arbiter.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, latches, memory and stats.
pub use crate::core::Cpu;
/// Run driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
