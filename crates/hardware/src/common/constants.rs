//! Architectural and model-wide constants.

/// Number of integer registers.
pub const NUM_REGS: usize = 32;

/// Width of one instruction and of one memory word, in bytes.
pub const WORD_BYTES: u32 = 4;

/// Number of address bits that select a byte within a word.
pub const WORD_SHIFT: u32 = 2;

/// Mask selecting the byte offset within a word (`addr[1:0]`).
pub const BYTE_OFFSET_MASK: u32 = 0x3;

/// Program counter after reset.
pub const RESET_PC: u32 = 0;

/// Smallest supported SRAM depth (log2 of the word count).
pub const MIN_DEPTH_LOG: u32 = 2;

/// Largest supported SRAM depth (log2 of the word count).
pub const MAX_DEPTH_LOG: u32 = 28;
