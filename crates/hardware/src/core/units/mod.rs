//! Functional units used by the Execute and Memory stages.
//!
//! This module groups the combinational units the stages call into:
//! 1. **ALU:** Integer arithmetic, logic, comparisons and shifts.
//! 2. **BRU:** Branch condition and target resolution.
//! 3. **LSU:** Sub-word extraction and store merging.

/// Arithmetic Logic Unit.
pub mod alu;

/// Branch Resolution Unit.
pub mod bru;

/// Load/Store Unit.
pub mod lsu;
