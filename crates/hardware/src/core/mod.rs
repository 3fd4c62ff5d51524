//! Core processor implementation.
//!
//! This module contains the CPU, the instruction pipeline, the register file
//! and the functional units the stages call into.

/// Architectural state (register file).
pub mod arch;

/// CPU state and per-cycle orchestration.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, branch resolution, load/store lanes).
pub mod units;

pub use self::cpu::Cpu;
