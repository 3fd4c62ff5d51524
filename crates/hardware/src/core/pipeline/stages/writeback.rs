//! Writeback (WB) Stage.
//!
//! Commits results to the register file and recognises the end of a run. A
//! halt reaching this stage is the only normal way a program terminates.

use crate::common::log::{PipelineLog, Stage, pipe_log};
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::WbBundle;

/// Result of one Writeback cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WritebackOutput {
    /// A halt instruction retired.
    pub halted: bool,
    /// A real instruction retired.
    pub retired: bool,
}

/// Executes the writeback stage.
///
/// Writes to `x0` are discarded by the register file. Call this after every
/// other stage has read the register file for the cycle.
///
/// # Arguments
///
/// * `mem_wb` - MEM/WB latch.
/// * `rf` - Register file to update.
pub fn wb_stage(mem_wb: &WbBundle, rf: &mut Gpr, log: &dyn PipelineLog, cycle: u64) -> WritebackOutput {
    if mem_wb.rd != 0 {
        rf.write(mem_wb.rd, mem_wb.result);
        pipe_log!(log, Stage::Writeback, cycle, "x{} <- {:#010x}", mem_wb.rd, mem_wb.result);
    }

    if mem_wb.halt {
        pipe_log!(log, Stage::Writeback, cycle, "halt at {:#010x}\n{rf}", mem_wb.pc);
    }

    WritebackOutput {
        halted: mem_wb.halt,
        retired: mem_wb.valid,
    }
}
