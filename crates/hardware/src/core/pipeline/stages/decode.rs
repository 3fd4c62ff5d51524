//! Instruction Decode (ID) Stage.
//!
//! Decode runs in two halves around the hazard unit:
//! 1. **Decoder:** Looks the word up in the decode table and reads both source
//!    registers from the register file.
//! 2. **Decode-Forward:** Replaces register-file values with forwarded ones as
//!    the hazard unit directs, then issues to Execute. A stall or a held
//!    redirect turns the issued instruction into a bubble.

use crate::common::log::{PipelineLog, Stage, pipe_log};
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::hazards::{self, ForwardTap, HazardDecision};
use crate::core::pipeline::latches::{DecodeBundle, ExBundle, IfIdEntry};
use crate::isa::decode_table::DecodeTable;
use crate::isa::disasm::disassemble;

/// Decodes the instruction in the IF/ID latch.
///
/// # Arguments
///
/// * `table` - Validated decode table.
/// * `if_id` - IF/ID latch; `None` yields a bubble.
/// * `inst` - Instruction word on the SRAM output.
/// * `rf` - Register file as of the start of the cycle.
pub fn decode_stage(
    table: &DecodeTable,
    if_id: Option<IfIdEntry>,
    inst: u32,
    rf: &Gpr,
    log: &dyn PipelineLog,
    cycle: u64,
) -> DecodeBundle {
    let Some(entry) = if_id else {
        return DecodeBundle::default();
    };

    let d = table.decode(inst);
    pipe_log!(log, Stage::Decode, cycle, "{:#010x}: {}", entry.pc, disassemble(inst));

    DecodeBundle {
        valid: true,
        pc: entry.pc,
        predicted: entry.predicted,
        inst,
        ctrl: d.ctrl,
        rd: d.rd,
        rs1: d.rs1,
        rs2: d.rs2,
        rs1_val: rf.read(d.rs1),
        rs2_val: rf.read(d.rs2),
        imm: d.imm,
    }
}

/// Forwarding taps from the three later stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Taps {
    /// Execute tap.
    pub ex: ForwardTap,
    /// Memory tap.
    pub mem: ForwardTap,
    /// Writeback tap.
    pub wb: ForwardTap,
}

/// Resolves operands and issues the next ID/EX latch value.
///
/// # Arguments
///
/// * `bundle` - Decoder output.
/// * `decision` - Hazard unit selectors and stall.
/// * `taps` - This cycle's forwarding taps.
/// * `flush` - A redirect is held; the decoded instruction is on the wrong path.
pub fn forward_stage(
    bundle: &DecodeBundle,
    decision: &HazardDecision,
    taps: &Taps,
    flush: bool,
    log: &dyn PipelineLog,
    cycle: u64,
) -> ExBundle {
    let mut out = ExBundle {
        valid: bundle.valid,
        pc: bundle.pc,
        predicted: bundle.predicted,
        inst: bundle.inst,
        ctrl: bundle.ctrl,
        rd: bundle.rd,
        rs1_val: hazards::resolve(decision.rs1, bundle.rs1_val, taps.ex, taps.mem, taps.wb),
        rs2_val: hazards::resolve(decision.rs2, bundle.rs2_val, taps.ex, taps.mem, taps.wb),
        imm: bundle.imm,
    };

    if flush || decision.stall {
        if bundle.valid {
            let why = if flush { "flush" } else { "stall" };
            pipe_log!(log, Stage::Decode, cycle, "{why}: bubble for {:#010x}", bundle.pc);
        }
        out.squash();
    }
    out
}
