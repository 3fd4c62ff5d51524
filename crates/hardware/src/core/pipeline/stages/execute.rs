//! Instruction Execute (EX) Stage.
//!
//! This module implements the Execute stage. It performs the following:
//! 1. **Wrong-Path Squash:** If a redirect is already held, the instruction here
//!    was fetched behind a mispredicted branch and retires as a bubble.
//! 2. **ALU:** Selects both operands and computes the single selected operation.
//! 3. **Branch Resolution:** Compares the resolved next PC with the fetch-time
//!    prediction and loads the branch-target latch on a mismatch.
//! 4. **Memory Request:** Presents a load or the first phase of a store to the
//!    arbiter on the same cycle.

use crate::common::log::{PipelineLog, Stage, pipe_log};
use crate::core::pipeline::hazards::{self, ForwardTap};
use crate::core::pipeline::latches::{BranchTargetLatch, ExBundle, MemBundle};
use crate::core::pipeline::signals::{MemOp, MemWidth, Op1Src, Op2Src};
use crate::core::units::alu::Alu;
use crate::core::units::bru::Bru;
use crate::soc::arbiter::DataRequest;

/// What Execute exposes to the hazard unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExTap {
    /// Destination register.
    pub rd: usize,
    /// ALU result.
    pub value: u32,
    /// A load is in Execute.
    pub is_load: bool,
    /// A store is in Execute.
    pub is_store: bool,
    /// Access width.
    pub width: MemWidth,
    /// Value being stored.
    pub store_data: u32,
}

impl ExTap {
    /// The forwarding view of this tap.
    pub const fn forward(&self) -> ForwardTap {
        hazards::tap(self.rd, self.value)
    }
}

/// Result of one Execute cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOutput {
    /// Next EX/MEM latch value.
    pub ex_mem: MemBundle,
    /// ALU result.
    pub alu_result: u32,
    /// Hazard-unit view.
    pub tap: ExTap,
    /// Data-port request.
    pub request: Option<DataRequest>,
    /// Branch-target latch for the next cycle.
    pub btl: BranchTargetLatch,
    /// The instruction was squashed as wrong-path.
    pub squashed: bool,
    /// The instruction mispredicted.
    pub mispredicted: bool,
}

/// Executes the execute stage.
///
/// # Arguments
///
/// * `id_ex` - ID/EX latch.
/// * `btl` - Branch-target latch as of the start of the cycle.
/// * `log` - Event sink.
/// * `cycle` - Current cycle number.
pub fn execute_stage(
    id_ex: &ExBundle,
    btl: &BranchTargetLatch,
    log: &dyn PipelineLog,
    cycle: u64,
) -> ExecuteOutput {
    let mut inst = *id_ex;
    let squashed = btl.is_set() && inst.valid;
    if btl.is_set() {
        inst.squash();
        if squashed {
            pipe_log!(log, Stage::Execute, cycle, "squash wrong-path {:#010x}", inst.pc);
        }
    }
    let ctrl = inst.ctrl;

    let op1 = match ctrl.op1 {
        Op1Src::Rs1 => inst.rs1_val,
        Op1Src::Pc => inst.pc,
        Op1Src::Zero => 0,
    };
    let op2 = match ctrl.op2 {
        Op2Src::Rs2 => inst.rs2_val,
        Op2Src::Imm => inst.imm,
        Op2Src::Four => 4,
    };
    let alu_result = Alu::execute(ctrl.alu, op1, op2);

    let mut next_btl = BranchTargetLatch::default();
    let mut mispredicted = false;
    if let Some(outcome) = Bru::resolve(ctrl.branch, inst.pc, inst.rs1_val, inst.imm, alu_result) {
        let resolved = outcome.next_pc(inst.pc);
        if resolved != inst.predicted {
            next_btl.load(resolved);
            mispredicted = true;
            pipe_log!(
                log,
                Stage::Execute,
                cycle,
                "mispredict at {:#010x}: predicted {:#010x}, resolved {resolved:#010x}",
                inst.pc,
                inst.predicted
            );
        }
    }

    let request = match ctrl.mem_op {
        MemOp::None => None,
        MemOp::Load => Some(DataRequest::Load { addr: alu_result }),
        MemOp::Store => Some(DataRequest::Store {
            addr: alu_result,
            width: ctrl.width,
            data: inst.rs2_val,
        }),
    };

    ExecuteOutput {
        ex_mem: MemBundle {
            valid: inst.valid,
            pc: inst.pc,
            inst: inst.inst,
            rd: inst.rd,
            halt: ctrl.halt,
            mem_op: ctrl.mem_op,
            width: ctrl.width,
            signed: ctrl.signed,
            alu_result,
            class: ctrl.class(),
        },
        alu_result,
        tap: ExTap {
            rd: inst.rd,
            value: alu_result,
            is_load: ctrl.mem_op == MemOp::Load,
            is_store: ctrl.mem_op == MemOp::Store,
            width: ctrl.width,
            store_data: inst.rs2_val,
        },
        request,
        btl: next_btl,
        squashed,
        mispredicted,
    }
}
