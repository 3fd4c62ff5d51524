//! RISC-V Base Integer (I) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) distinguishes between operations that share
//! the same `funct3`. In RV32I only bit 30 of it carries meaning.

/// Default operation (ADD, SRL, SRLI).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate operation (SUB, SRA, SRAI).
pub const ALT: u32 = 0b0100000;
