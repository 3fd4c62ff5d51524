//! Branch Resolution Unit (BRU).
//!
//! The pipeline has no predictor: every fetch assumes the next sequential
//! word. The branch unit decides, in Execute, where control actually goes.
//! 1. **Condition:** Read from the ALU result the decode table arranged for
//!    (SUB for equality, SLT/SLTU for ordering).
//! 2. **Target:** `pc + imm` for branches and JAL, `(rs1 + imm) & !1` for JALR.
//! 3. **Resolution:** The next PC, compared by Execute against the prediction.

use crate::common::constants::WORD_BYTES;
use crate::core::pipeline::signals::BranchKind;

/// Result of resolving one control-flow instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchOutcome {
    /// Control leaves the sequential path.
    pub taken: bool,
    /// Address control transfers to when taken.
    pub target: u32,
}

impl BranchOutcome {
    /// Address of the instruction that must follow.
    pub const fn next_pc(&self, pc: u32) -> u32 {
        if self.taken {
            self.target
        } else {
            pc.wrapping_add(WORD_BYTES)
        }
    }
}

/// Branch Resolution Unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bru;

impl Bru {
    /// Evaluates the condition and target of a control-flow instruction.
    ///
    /// # Arguments
    ///
    /// * `kind` - Branch kind from the decode table.
    /// * `pc` - Address of the instruction.
    /// * `rs1` - Forwarded `rs1` value (JALR base).
    /// * `imm` - Sign-extended offset.
    /// * `alu_result` - Result of the comparison the ALU performed.
    ///
    /// # Returns
    ///
    /// `None` when `kind` is not a control-flow instruction.
    pub fn resolve(
        kind: BranchKind,
        pc: u32,
        rs1: u32,
        imm: u32,
        alu_result: u32,
    ) -> Option<BranchOutcome> {
        let less = alu_result & 1 != 0;
        let taken = match kind {
            BranchKind::None => return None,
            BranchKind::Beq => alu_result == 0,
            BranchKind::Bne => alu_result != 0,
            BranchKind::Blt | BranchKind::Bltu => less,
            BranchKind::Bge | BranchKind::Bgeu => !less,
            BranchKind::Jal | BranchKind::Jalr => true,
        };
        let target = match kind {
            BranchKind::Jalr => rs1.wrapping_add(imm) & !1,
            _ => pc.wrapping_add(imm),
        };
        Some(BranchOutcome { taken, target })
    }
}
