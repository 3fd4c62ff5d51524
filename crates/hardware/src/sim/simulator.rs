//! Simulator: owns the CPU, its configuration and the pipeline log.
//!
//! The simulator is the run driver. It boots the core, ticks it until a halt
//! retires or the cycle budget runs out, and reports the final register file
//! together with the statistics.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::common::constants::NUM_REGS;
use crate::common::error::SimError;
use crate::common::log::{NullLog, PipelineLog, TracingLog};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::cpu::CycleReport;
use crate::sim::loader::{self, ProgramImage};
use crate::stats::SimStats;

/// Outcome of a run that halted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Register file after the halt retired, `x0` first.
    pub registers: [u32; NUM_REGS],
    /// Counters for the whole run.
    pub stats: SimStats,
}

impl RunSummary {
    /// Value of one register.
    pub fn reg(&self, idx: usize) -> u32 {
        self.registers[idx]
    }
}

/// Top-level simulator.
pub struct Simulator {
    /// CPU state.
    pub cpu: Cpu,
    config: Config,
    log: Box<dyn PipelineLog + Send>,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("cycle", &self.cpu.cycle)
            .field("halted", &self.cpu.halted)
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Creates a simulator in the boot state.
    ///
    /// The pipeline log is a [`TracingLog`] when `general.trace_pipeline` is
    /// set and a [`NullLog`] otherwise.
    pub fn new(config: Config) -> Result<Self, SimError> {
        let cpu = Cpu::new(&config)?;
        let log: Box<dyn PipelineLog + Send> = if config.general.trace_pipeline {
            Box::new(TracingLog)
        } else {
            Box::new(NullLog)
        };
        Ok(Self { cpu, config, log })
    }

    /// Replaces the pipeline log.
    #[must_use]
    pub fn with_log(mut self, log: Box<dyn PipelineLog + Send>) -> Self {
        self.log = log;
        self
    }

    /// Active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Places an image in memory.
    pub fn load(&mut self, image: &ProgramImage) -> Result<(), SimError> {
        self.cpu.load_image(image)?;
        Ok(())
    }

    /// Reads, parses and places an image file using the `image` settings.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let image = loader::load_image_file(path, &self.config.image, self.config.memory.depth_words())?;
        self.load(&image)
    }

    /// Advances one cycle.
    pub fn tick(&mut self) -> Result<CycleReport, SimError> {
        Ok(self.cpu.tick(self.log.as_ref())?)
    }

    /// Runs until a halt retires.
    ///
    /// # Returns
    ///
    /// The register snapshot and statistics, [`SimError::CycleLimit`] when
    /// `general.max_cycles` elapse first, or a memory fault.
    pub fn run(&mut self) -> Result<RunSummary, SimError> {
        let limit = self.config.general.max_cycles;
        tracing::info!(max_cycles = limit, depth_log = self.config.memory.depth_log, "boot");

        while !self.cpu.halted {
            if self.cpu.cycle >= limit {
                tracing::warn!(cycles = self.cpu.cycle, "cycle limit reached without halt");
                return Err(SimError::CycleLimit {
                    cycles: self.cpu.cycle,
                });
            }
            let _ = self.tick()?;
        }

        let stats = self.cpu.stats;
        tracing::info!(
            cycles = stats.cycles,
            retired = stats.instructions_retired,
            cpi = stats.cpi(),
            "halt"
        );
        tracing::info!("final registers\n{}", self.cpu.regs);
        Ok(RunSummary {
            registers: self.cpu.regs.snapshot(),
            stats,
        })
    }
}
