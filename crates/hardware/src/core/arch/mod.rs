//! RISC-V architectural state.
//!
//! The only architectural state the pipeline keeps besides memory and the
//! program counter is the integer register file.

/// General-Purpose Register file implementation.
pub mod gpr;
