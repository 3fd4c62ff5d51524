//! Halt encodings.
//!
//! The model has no trap machinery. Three literal words end a run when they
//! reach writeback; they are recognised before table dispatch so none of them
//! can be mistaken for an ordinary instruction.

/// `ecall`.
pub const ECALL: u32 = 0x0000_0073;

/// `ebreak`.
pub const EBREAK: u32 = 0x0010_0073;

/// Reserved halt word placed by image preparation.
///
/// Structurally this is `sb x0, -1(x0)`; it must never reach the memory port.
pub const HALT: u32 = 0xFE00_0FA3;

/// Word that image preparation rewrites to [`HALT`] (`addi a0, x0, 255`).
pub const HALT_IDIOM: u32 = 0x0FF0_0513;

/// Returns `true` when `inst` is one of the halt encodings.
#[inline]
pub const fn is_halt(inst: u32) -> bool {
    matches!(inst, ECALL | EBREAK | HALT)
}
