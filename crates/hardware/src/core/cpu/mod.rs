//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which holds the entire
//! processor state. It coordinates the following:
//! 1. **Architectural State:** Register file, fetch PC, and the memory behind the arbiter.
//! 2. **Pipeline Control:** The four inter-stage latches and the branch-target latch.
//! 3. **Decode:** The validated decode table shared by every cycle.
//! 4. **Statistics:** Counters updated once per cycle.

/// Single-cycle evaluation and commit.
pub mod execution;

use crate::common::error::{ImageError, SimError};
use crate::config::Config;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::{BranchTargetLatch, ExBundle, IfIdEntry, MemBundle, WbBundle};
use crate::core::pipeline::stages::fetch::FetchUnit;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::decode_table::DecodeTable;
use crate::sim::loader::ProgramImage;
use crate::soc::{Arbiter, Sram};
use crate::stats::SimStats;

pub use self::execution::CycleReport;

/// Processor state.
#[derive(Debug)]
pub struct Cpu {
    /// General Purpose Registers.
    pub regs: Gpr,
    /// Fetch program counters.
    pub fetch: FetchUnit,
    /// IF/ID Latch.
    pub if_id: Option<IfIdEntry>,
    /// ID/EX Latch.
    pub id_ex: ExBundle,
    /// EX/MEM Latch.
    pub ex_mem: MemBundle,
    /// MEM/WB Latch.
    pub mem_wb: WbBundle,
    /// Redirect from Execute to Fetch.
    pub btl: BranchTargetLatch,
    /// Memory port and SRAM.
    pub arbiter: Arbiter,
    /// Performance statistics.
    pub stats: SimStats,
    /// A halt has retired.
    pub halted: bool,
    /// Number of cycles evaluated.
    pub cycle: u64,
    table: DecodeTable,
}

impl Cpu {
    /// Creates a CPU in the boot state with the standard RV32I decode table.
    ///
    /// # Arguments
    ///
    /// * `config` - Memory depth and out-of-range policy are taken from here.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        Self::with_table(config, DecodeTable::new()?)
    }

    /// Creates a CPU in the boot state with a caller-supplied decode table.
    ///
    /// The configuration is validated before the SRAM is sized.
    pub fn with_table(config: &Config, table: DecodeTable) -> Result<Self, SimError> {
        config.validate()?;
        let sram = Sram::new(config.memory.depth_log, config.memory.out_of_range);
        Ok(Self {
            regs: Gpr::new(),
            fetch: FetchUnit::default(),
            if_id: None,
            id_ex: ExBundle::default(),
            ex_mem: MemBundle::default(),
            mem_wb: WbBundle::default(),
            btl: BranchTargetLatch::default(),
            arbiter: Arbiter::new(sram),
            stats: SimStats::default(),
            halted: false,
            cycle: 0,
            table,
        })
    }

    /// Places a program image in memory.
    pub fn load_image(&mut self, image: &ProgramImage) -> Result<(), ImageError> {
        self.arbiter
            .sram_mut()
            .load_words(image.base_word(), &image.words)
    }

    /// Returns pipeline, registers, PC and statistics to the boot state.
    /// Memory contents are kept.
    pub fn reset(&mut self) {
        self.regs = Gpr::new();
        self.fetch = FetchUnit::default();
        self.if_id.flush();
        self.id_ex.flush();
        self.ex_mem.flush();
        self.mem_wb.flush();
        self.btl.clear();
        self.arbiter.reset();
        self.stats = SimStats::default();
        self.halted = false;
        self.cycle = 0;
    }

    /// Returns `true` when no instruction is in flight past Fetch.
    pub fn is_drained(&self) -> bool {
        self.if_id.is_empty() && self.id_ex.is_empty() && self.ex_mem.is_empty() && self.mem_wb.is_empty()
    }

    /// Decode table in use.
    pub const fn table(&self) -> &DecodeTable {
        &self.table
    }
}
