//! Single-port memory arbiter.
//!
//! Instruction fetch and data accesses share one SRAM port. Each clock the
//! arbiter grants at most one access, in this order:
//! 1. **Store Write:** The second phase of a sub-word store latched last clock.
//! 2. **Data:** A load reads the word; a store reads the word and latches itself.
//! 3. **Fetch:** The instruction word at the fetch address.
//!
//! Stores are read-modify-write. The merge happens on the clock after the read,
//! using the word the read left on `dout`, so every store occupies the port for
//! two consecutive clocks. The pipeline's stall rule guarantees that no data
//! request arrives while a write is pending.

use crate::common::error::MemoryError;
use crate::common::log::{PipelineLog, Stage, pipe_log};
use crate::core::pipeline::signals::MemWidth;
use crate::core::units::lsu::Lsu;
use crate::soc::memory::Sram;

/// Data-side access presented by Execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRequest {
    /// Read the word containing `addr`.
    Load {
        /// Byte address.
        addr: u32,
    },
    /// Replace the lanes `width` selects at `addr` with the low bits of `data`.
    Store {
        /// Byte address.
        addr: u32,
        /// Store width.
        width: MemWidth,
        /// Register value being stored.
        data: u32,
    },
}

/// Store waiting for its write phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingWrite {
    /// Byte address.
    pub addr: u32,
    /// Store width.
    pub width: MemWidth,
    /// Register value being stored.
    pub data: u32,
}

/// Access the arbiter performed on one clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PortGrant {
    /// Port unused.
    #[default]
    Idle,
    /// Instruction word read.
    Fetch {
        /// Fetch address.
        addr: u32,
    },
    /// Load word read.
    Load {
        /// Load address.
        addr: u32,
    },
    /// First phase of a store: old word read.
    StoreRead {
        /// Store address.
        addr: u32,
    },
    /// Second phase of a store: merged word written.
    StoreWrite {
        /// Store address.
        addr: u32,
        /// Word written.
        word: u32,
    },
}

impl PortGrant {
    /// Returns `true` when the port served instruction fetch.
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

/// Single-port arbiter owning the SRAM.
#[derive(Clone, Debug)]
pub struct Arbiter {
    sram: Sram,
    pending: Option<PendingWrite>,
}

impl Arbiter {
    /// Wraps an SRAM.
    pub fn new(sram: Sram) -> Self {
        Self {
            sram,
            pending: None,
        }
    }

    /// Registered SRAM output from the previous clock.
    #[inline]
    pub const fn dout(&self) -> u32 {
        self.sram.dout()
    }

    /// Store whose write phase is due on the next clock.
    pub const fn pending(&self) -> Option<PendingWrite> {
        self.pending
    }

    /// Backing memory.
    pub const fn sram(&self) -> &Sram {
        &self.sram
    }

    /// Mutable backing memory, for image loading.
    pub fn sram_mut(&mut self) -> &mut Sram {
        &mut self.sram
    }

    /// Drops any pending write.
    pub fn reset(&mut self) {
        self.pending = None;
    }

    /// Performs one clock of port activity.
    ///
    /// # Arguments
    ///
    /// * `data` - Data request from Execute, if any.
    /// * `fetch` - Fetch address, or `None` while fetch is stalled.
    /// * `log` - Event sink.
    /// * `cycle` - Current cycle number.
    ///
    /// # Returns
    ///
    /// The access performed, or the SRAM's fault under the `Fault` policy.
    pub fn clock(
        &mut self,
        data: Option<DataRequest>,
        fetch: Option<u32>,
        log: &dyn PipelineLog,
        cycle: u64,
    ) -> Result<PortGrant, MemoryError> {
        if let Some(w) = self.pending.take() {
            let word = Lsu::merge(self.sram.dout(), w.addr, w.width, w.data);
            self.sram.write(w.addr, word)?;
            pipe_log!(log, Stage::Arbiter, cycle, "store write [{:#010x}] <- {word:#010x}", w.addr);
            return Ok(PortGrant::StoreWrite { addr: w.addr, word });
        }

        match data {
            Some(DataRequest::Load { addr }) => {
                let word = self.sram.read(addr)?;
                pipe_log!(log, Stage::Arbiter, cycle, "load read [{addr:#010x}] -> {word:#010x}");
                Ok(PortGrant::Load { addr })
            }
            Some(DataRequest::Store { addr, width, data }) => {
                let _ = self.sram.read(addr)?;
                self.pending = Some(PendingWrite { addr, width, data });
                pipe_log!(log, Stage::Arbiter, cycle, "store read [{addr:#010x}]");
                Ok(PortGrant::StoreRead { addr })
            }
            None => match fetch {
                Some(addr) => {
                    let _ = self.sram.read(addr)?;
                    Ok(PortGrant::Fetch { addr })
                }
                None => Ok(PortGrant::Idle),
            },
        }
    }
}
