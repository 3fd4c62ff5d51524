//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline model. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived CPI/IPC.
//! 2. **Instruction mix:** Retired counts by category (ALU, load, store, branch, system).
//! 3. **Branches:** Control-flow instructions resolved and mispredicted.
//! 4. **Hazards:** Stall cycles by cause and instructions squashed by redirects.

use std::fmt;

use serde::Serialize;

use crate::core::pipeline::signals::InstClass;

/// Simulation statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total cycles elapsed.
    pub cycles: u64,
    /// Number of real instructions that reached Writeback.
    pub instructions_retired: u64,

    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of ALU instructions retired (unmapped encodings included).
    pub inst_alu: u64,
    /// Count of halt instructions retired.
    pub inst_system: u64,

    /// Control-flow instructions resolved in Execute.
    pub branches_resolved: u64,
    /// Resolutions whose next PC differed from `pc + 4`.
    pub branch_mispredictions: u64,

    /// Cycles the front end stalled behind a load in Execute.
    pub stalls_load: u64,
    /// Cycles the front end stalled behind a store in Execute or Memory.
    pub stalls_store: u64,
    /// Cycles spent consuming a redirect.
    pub flush_cycles: u64,
    /// Instructions turned into bubbles on the wrong path.
    pub squashed: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"branch"`, `"hazards"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "branch", "hazards"];

const RULE: &str = "----------------------------------------------------------";
const BANNER: &str = "==========================================================";

impl SimStats {
    /// Counts one retired instruction.
    pub fn record_retire(&mut self, class: InstClass) {
        self.instructions_retired += 1;
        match class {
            InstClass::Alu => self.inst_alu += 1,
            InstClass::Load => self.inst_load += 1,
            InstClass::Store => self.inst_store += 1,
            InstClass::Branch => self.inst_branch += 1,
            InstClass::System => self.inst_system += 1,
        }
    }

    /// Cycles per retired instruction, or 0 before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Retired instructions per cycle, or 0 before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Formatter for the requested sections.
    ///
    /// # Arguments
    ///
    /// * `sections` - Section names from [`STATS_SECTIONS`], or empty for all.
    pub const fn report<'a>(&'a self, sections: &'a [String]) -> StatsReport<'a> {
        StatsReport {
            stats: self,
            sections,
        }
    }

    /// Renders the requested sections as a text table.
    pub fn render_sections(&self, sections: &[String]) -> String {
        self.report(sections).to_string()
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.report(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

/// Text table over a subset of [`STATS_SECTIONS`].
#[derive(Clone, Copy, Debug)]
pub struct StatsReport<'a> {
    stats: &'a SimStats,
    sections: &'a [String],
}

impl StatsReport<'_> {
    fn wants(&self, section: &str) -> bool {
        self.sections.is_empty() || self.sections.iter().any(|s| s == section)
    }
}

fn pct(n: u64, of: f64) -> f64 {
    (n as f64 / of) * 100.0
}

impl fmt::Display for StatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let cyc = s.cycles.max(1) as f64;
        let instr = s.instructions_retired.max(1) as f64;

        writeln!(f, "{BANNER}")?;
        writeln!(f, "RV32I PIPELINE SIMULATION STATISTICS")?;
        writeln!(f, "{BANNER}")?;
        if self.wants("summary") {
            writeln!(f, "sim_cycles               {}", s.cycles)?;
            writeln!(f, "sim_insts                {}", s.instructions_retired)?;
            writeln!(f, "sim_ipc                  {:.4}", s.ipc())?;
            writeln!(f, "sim_cpi                  {:.4}", s.cpi())?;
            writeln!(f, "{RULE}")?;
        }
        if self.wants("instruction_mix") {
            writeln!(f, "INSTRUCTION MIX")?;
            for (name, n) in [
                ("op.alu", s.inst_alu),
                ("op.load", s.inst_load),
                ("op.store", s.inst_store),
                ("op.branch", s.inst_branch),
                ("op.system", s.inst_system),
            ] {
                writeln!(f, "  {name:<22} {n} ({:.2}%)", pct(n, instr))?;
            }
            writeln!(f, "{RULE}")?;
        }
        if self.wants("branch") {
            let resolved = s.branches_resolved;
            let acc = if resolved > 0 {
                100.0 - pct(s.branch_mispredictions, resolved as f64)
            } else {
                0.0
            };
            writeln!(f, "BRANCHES (static pc+4)")?;
            writeln!(f, "  bp.resolved            {resolved}")?;
            writeln!(f, "  bp.mispredicts         {}", s.branch_mispredictions)?;
            writeln!(f, "  bp.accuracy            {acc:.2}%")?;
            writeln!(f, "{RULE}")?;
        }
        if self.wants("hazards") {
            writeln!(f, "HAZARDS")?;
            writeln!(f, "  stalls.load            {} ({:.2}%)", s.stalls_load, pct(s.stalls_load, cyc))?;
            writeln!(f, "  stalls.store           {} ({:.2}%)", s.stalls_store, pct(s.stalls_store, cyc))?;
            writeln!(f, "  flush.cycles           {} ({:.2}%)", s.flush_cycles, pct(s.flush_cycles, cyc))?;
            writeln!(f, "  flush.squashed         {}", s.squashed)?;
        }
        writeln!(f, "{BANNER}")
    }
}
