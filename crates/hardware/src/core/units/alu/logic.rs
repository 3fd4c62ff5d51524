//! ALU bitwise logic and comparison operations.
//!
//! Implements OR, AND, XOR, and the set-less-than comparisons. SLT and SLTU
//! produce 1 or 0; the branch unit reads the same bit for BLT/BGE/BLTU/BGEU.

use crate::core::pipeline::signals::AluOp;

/// Executes a logical or comparison operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform.
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The result. Returns `0` for unhandled opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => u32::from((a as i32) < (b as i32)),
        AluOp::Sltu => u32::from(a < b),
        _ => 0,
    }
}
