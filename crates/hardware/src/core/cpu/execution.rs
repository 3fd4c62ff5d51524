//! Single-cycle pipeline evaluation.
//!
//! `Cpu::tick` is one rising clock edge. Every stage is evaluated from the
//! latch values at the start of the cycle, in dependency order:
//! 1. **Memory, Execute:** Produce the MEM and EX forwarding taps, the data request
//!    and the next branch-target latch.
//! 2. **Decoder, Hazard Unit, Decode-Forward:** Read the old register file, pick
//!    operand sources, and issue or bubble.
//! 3. **Fetch, Arbiter:** Present at most one access to the memory port.
//! 4. **Writeback:** Commit the register write last so that Decode saw the old value.
//!
//! All latches are then replaced at once.

use crate::common::error::MemoryError;
use crate::common::log::PipelineLog;
use crate::core::Cpu;
use crate::core::pipeline::hazards::{self, HazardDecision, HazardInputs};
use crate::core::pipeline::signals::InstClass;
use crate::core::pipeline::stages::decode::Taps;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, forward_stage, mem_stage, wb_stage,
};
use crate::soc::PortGrant;

/// Observable summary of one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Cycle number that was evaluated.
    pub cycle: u64,
    /// Front end held by the hazard unit.
    pub stall: bool,
    /// A redirect was consumed this cycle.
    pub flush: bool,
    /// Execute loaded the branch-target latch.
    pub mispredicted: bool,
    /// Memory port activity.
    pub grant: PortGrant,
    /// Forwarding and stall decision.
    pub hazard: HazardDecision,
    /// A real instruction retired.
    pub retired: bool,
    /// A halt retired.
    pub halted: bool,
}

impl Cpu {
    /// Advances the pipeline by one cycle.
    ///
    /// # Arguments
    ///
    /// * `log` - Event sink for this cycle.
    ///
    /// # Returns
    ///
    /// What happened, or the memory fault raised under the `Fault` policy. On
    /// a fault no latch is updated.
    pub fn tick(&mut self, log: &dyn PipelineLog) -> Result<CycleReport, MemoryError> {
        let cycle = self.cycle;
        let flush = self.btl.is_set();
        let dout = self.arbiter.dout();

        let wb_tap = self.mem_wb.tap();
        let mem = mem_stage(&self.ex_mem, dout, log, cycle);
        let ex = execute_stage(&self.id_ex, &self.btl, log, cycle);

        let decoded = decode_stage(self.table(), self.if_id, dout, &self.regs, log, cycle);
        let hazard = hazards::detect(&HazardInputs {
            rs1: decoded.rs1,
            rs2: decoded.rs2,
            ex_rd: ex.tap.rd,
            mem_rd: self.ex_mem.rd,
            wb_rd: self.mem_wb.rd,
            ex_is_load: ex.tap.is_load,
            ex_is_store: ex.tap.is_store,
            mem_is_store: mem.is_store,
        });
        let taps = Taps {
            ex: ex.tap.forward(),
            mem: mem.tap,
            wb: wb_tap,
        };
        let id_ex = forward_stage(&decoded, &hazard, &taps, flush, log, cycle);

        let fetched = fetch_stage(&self.fetch, self.btl.target(), hazard.stall, log, cycle);
        let grant = self.arbiter.clock(ex.request, fetched.addr, log, cycle)?;

        let wb = wb_stage(&self.mem_wb, &mut self.regs, log, cycle);

        let stats = &mut self.stats;
        stats.cycles += 1;
        if wb.retired {
            stats.record_retire(self.mem_wb.class);
        }
        if hazard.stall {
            if ex.tap.is_load {
                stats.stalls_load += 1;
            } else {
                stats.stalls_store += 1;
            }
        }
        if flush {
            stats.flush_cycles += 1;
            stats.squashed += u64::from(ex.squashed) + u64::from(decoded.valid);
        }
        if ex.ex_mem.valid && ex.ex_mem.class == InstClass::Branch {
            stats.branches_resolved += 1;
        }
        stats.branch_mispredictions += u64::from(ex.mispredicted);

        self.fetch = fetched.next;
        self.if_id = fetched.if_id;
        self.id_ex = id_ex;
        self.ex_mem = ex.ex_mem;
        self.mem_wb = mem.mem_wb;
        self.btl = ex.btl;
        self.halted |= wb.halted;
        self.cycle += 1;

        Ok(CycleReport {
            cycle,
            stall: hazard.stall,
            flush,
            mispredicted: ex.mispredicted,
            grant,
            hazard,
            retired: wb.retired,
            halted: wb.halted,
        })
    }
}
