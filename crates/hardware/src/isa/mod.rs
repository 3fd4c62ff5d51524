//! Instruction Set Architecture (ISA) Definitions.
//!
//! Everything needed to turn a 32-bit word into pipeline control signals:
//!
//! * `rv32i`: Opcode and function-code constants for the base integer set.
//! * `instruction`: Fixed-position field extraction.
//! * `imm`: Immediate decoding for the I, S, B, U and J layouts.
//! * `system`: The halt encodings.
//! * `decode_table`: The validated one-row-per-mnemonic decode table.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Validated RV32I decode table.
pub mod decode_table;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Immediate decoding for every instruction format.
pub mod imm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;

/// Halt encodings.
pub mod system;
