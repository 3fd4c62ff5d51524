//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the bundles carried between the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Instruction Flow:** Each bundle is a narrowing of the previous one; fields
//!    a later stage has no use for are dropped at the boundary.
//! 2. **Bubbles:** `Default` on every bundle is a bubble (`valid == false`, `rd == 0`,
//!    no memory op, no branch, no halt).
//! 3. **Redirects:** The branch-target latch carries a misprediction from Execute
//!    back to Fetch for exactly one cycle.

use crate::core::pipeline::hazards::Tap;
use crate::core::pipeline::signals::{
    BranchKind, ControlSignals, InstClass, MemOp, MemWidth,
};

/// Entry in the IF/ID latch.
///
/// The instruction word itself is not latched: it is the SRAM output registered
/// by the fetch read and is read by Decode on the following cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Address the word was fetched from.
    pub pc: u32,
    /// Next PC assumed at fetch time (`pc + 4`).
    pub predicted: u32,
}

/// Decoder output for one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeBundle {
    /// Instruction is a real fetched word rather than an empty slot.
    pub valid: bool,
    /// Program counter.
    pub pc: u32,
    /// Fetch-time next PC.
    pub predicted: u32,
    /// Raw instruction word.
    pub inst: u32,
    /// Control record from the decode table.
    pub ctrl: ControlSignals,
    /// Destination register (0 when the row does not write back).
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Register-file value of `rs1`.
    pub rs1_val: u32,
    /// Register-file value of `rs2`.
    pub rs2_val: u32,
    /// Sign-extended immediate.
    pub imm: u32,
}

/// Entry in the ID/EX latch: decoded instruction with forwarded operands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExBundle {
    /// Instruction is real rather than a bubble.
    pub valid: bool,
    /// Program counter.
    pub pc: u32,
    /// Fetch-time next PC.
    pub predicted: u32,
    /// Raw instruction word.
    pub inst: u32,
    /// Control record.
    pub ctrl: ControlSignals,
    /// Destination register.
    pub rd: usize,
    /// Forwarded `rs1` value.
    pub rs1_val: u32,
    /// Forwarded `rs2` value.
    pub rs2_val: u32,
    /// Sign-extended immediate.
    pub imm: u32,
}

impl ExBundle {
    /// Turns the instruction into a bubble.
    ///
    /// Destination, halt, memory op and branch kind are cleared. Operand
    /// routing is left alone; it no longer has any architectural effect.
    pub fn squash(&mut self) {
        self.valid = false;
        self.rd = 0;
        self.ctrl.halt = false;
        self.ctrl.mem_op = MemOp::None;
        self.ctrl.branch = BranchKind::None;
    }
}

/// Entry in the EX/MEM latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemBundle {
    /// Instruction is real rather than a bubble.
    pub valid: bool,
    /// Program counter.
    pub pc: u32,
    /// Raw instruction word.
    pub inst: u32,
    /// Destination register.
    pub rd: usize,
    /// Halt when retired.
    pub halt: bool,
    /// Memory operation.
    pub mem_op: MemOp,
    /// Access width.
    pub width: MemWidth,
    /// Sign-extend loads.
    pub signed: bool,
    /// ALU result; the byte address for loads and stores.
    pub alu_result: u32,
    /// Retirement category.
    pub class: InstClass,
}

/// Entry in the MEM/WB latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WbBundle {
    /// Instruction is real rather than a bubble.
    pub valid: bool,
    /// Program counter.
    pub pc: u32,
    /// Raw instruction word.
    pub inst: u32,
    /// Destination register.
    pub rd: usize,
    /// Halt when retired.
    pub halt: bool,
    /// Value written to `rd`.
    pub result: u32,
    /// Retirement category.
    pub class: InstClass,
}

impl WbBundle {
    /// Value this instruction forwards from Writeback, if it writes a register.
    pub const fn tap(&self) -> Option<Tap> {
        if self.rd == 0 {
            None
        } else {
            Some(Tap {
                rd: self.rd,
                value: self.result,
            })
        }
    }
}

/// One-cycle redirect from Execute to Fetch.
///
/// Holding an address means the instruction behind the mispredicted one is on
/// the wrong path and Fetch must restart at the held address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BranchTargetLatch(Option<u32>);

impl BranchTargetLatch {
    /// Holds `target` for the next cycle.
    pub fn load(&mut self, target: u32) {
        self.0 = Some(target);
    }

    /// Drops any held redirect.
    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Held redirect target.
    pub const fn target(&self) -> Option<u32> {
        self.0
    }

    /// Returns `true` while a redirect is held.
    pub const fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Register view of the latch; 0 means empty.
    pub const fn raw(&self) -> u32 {
        match self.0 {
            Some(t) => t,
            None => 0,
        }
    }
}
