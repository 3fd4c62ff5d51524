//! ALU shift operations.
//!
//! Only the low five bits of the second operand are used as the shift amount.

use crate::core::pipeline::signals::AluOp;

/// Shift-amount mask for 32-bit operands.
const SHAMT_MASK: u32 = 0x1F;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op` - `Sll`, `Srl` or `Sra`.
/// * `a`  - Value to shift.
/// * `b`  - Shift amount source.
///
/// # Returns
///
/// The shifted value. Returns `0` for non-shift opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    let shamt = b & SHAMT_MASK;
    match op {
        AluOp::Sll => a << shamt,
        AluOp::Srl => a >> shamt,
        AluOp::Sra => ((a as i32) >> shamt) as u32,
        _ => 0,
    }
}
