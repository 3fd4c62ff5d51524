//! Instruction Fetch (IF) Stage.
//!
//! Chooses the address to present to the memory port this cycle. The
//! instruction word comes back on the SRAM output one cycle later, so the
//! IF/ID latch only records where it came from and what was predicted.
//!
//! Prediction is static: the next PC is always assumed to be `pc + 4`.

use crate::common::constants::{RESET_PC, WORD_BYTES};
use crate::common::log::{PipelineLog, Stage, pipe_log};
use crate::core::pipeline::latches::IfIdEntry;

/// Fetch program-counter state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchUnit {
    /// Next address to present.
    pub pc: u32,
    /// Last address presented; replayed after a stall.
    pub prev_pc: u32,
}

impl Default for FetchUnit {
    fn default() -> Self {
        Self {
            pc: RESET_PC,
            prev_pc: RESET_PC,
        }
    }
}

/// Result of one fetch cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchOutput {
    /// Address presented to the arbiter, `None` while stalled.
    pub addr: Option<u32>,
    /// Next IF/ID latch value.
    pub if_id: Option<IfIdEntry>,
    /// Fetch state for the next cycle.
    pub next: FetchUnit,
}

/// Executes the fetch stage.
///
/// # Arguments
///
/// * `unit` - Start-of-cycle fetch state.
/// * `redirect` - Branch-target latch contents.
/// * `stall` - Hazard unit stall.
/// * `log` - Event sink.
/// * `cycle` - Current cycle number.
///
/// # Returns
///
/// The address to present, the IF/ID entry and the next fetch state. A held
/// redirect overrides both the sequential PC and the stall replay address.
pub fn fetch_stage(
    unit: &FetchUnit,
    redirect: Option<u32>,
    stall: bool,
    log: &dyn PipelineLog,
    cycle: u64,
) -> FetchOutput {
    let candidate = match redirect {
        Some(target) => target,
        None if stall => unit.prev_pc,
        None => unit.pc,
    };

    if stall {
        pipe_log!(log, Stage::Fetch, cycle, "stall, holding {candidate:#010x}");
        return FetchOutput {
            addr: None,
            if_id: None,
            next: FetchUnit {
                pc: candidate,
                prev_pc: candidate,
            },
        };
    }

    let predicted = candidate.wrapping_add(WORD_BYTES);
    if redirect.is_some() {
        pipe_log!(log, Stage::Fetch, cycle, "redirect to {candidate:#010x}");
    }
    pipe_log!(log, Stage::Fetch, cycle, "fetch {candidate:#010x}");
    FetchOutput {
        addr: Some(candidate),
        if_id: Some(IfIdEntry {
            pc: candidate,
            predicted,
        }),
        next: FetchUnit {
            pc: predicted,
            prev_pc: candidate,
        },
    }
}
