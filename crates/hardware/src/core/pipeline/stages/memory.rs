//! Memory Access (MEM) Stage.
//!
//! The arbiter already read the word for a load on the previous clock; this
//! stage selects the addressed lanes from the SRAM output and extends them.
//! Stores were completed by the arbiter and pass the address through.

use crate::common::log::{PipelineLog, Stage, pipe_log};
use crate::core::pipeline::hazards::{self, ForwardTap};
use crate::core::pipeline::latches::{MemBundle, WbBundle};
use crate::core::pipeline::signals::MemOp;
use crate::core::units::lsu::Lsu;

/// Result of one Memory cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryOutput {
    /// Next MEM/WB latch value.
    pub mem_wb: WbBundle,
    /// Value to be written back.
    pub result: u32,
    /// Forwarding tap.
    pub tap: ForwardTap,
    /// A store is in Memory (its write phase holds the port).
    pub is_store: bool,
    /// A load is in Memory.
    pub is_load: bool,
}

/// Executes the memory stage.
///
/// # Arguments
///
/// * `ex_mem` - EX/MEM latch.
/// * `dout` - SRAM output registered on the previous clock.
pub fn mem_stage(ex_mem: &MemBundle, dout: u32, log: &dyn PipelineLog, cycle: u64) -> MemoryOutput {
    let is_load = ex_mem.mem_op == MemOp::Load;
    let result = if is_load {
        let value = Lsu::extract(dout, ex_mem.alu_result, ex_mem.width, ex_mem.signed);
        pipe_log!(
            log,
            Stage::Memory,
            cycle,
            "load [{:#010x}] = {value:#010x} -> x{}",
            ex_mem.alu_result,
            ex_mem.rd
        );
        value
    } else {
        ex_mem.alu_result
    };

    MemoryOutput {
        mem_wb: WbBundle {
            valid: ex_mem.valid,
            pc: ex_mem.pc,
            inst: ex_mem.inst,
            rd: ex_mem.rd,
            halt: ex_mem.halt,
            result,
            class: ex_mem.class,
        },
        result,
        tap: hazards::tap(ex_mem.rd, result),
        is_store: ex_mem.mem_op == MemOp::Store,
        is_load,
    }
}
