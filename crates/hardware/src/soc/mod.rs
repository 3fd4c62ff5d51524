//! Memory subsystem.
//!
//! This module holds everything behind the pipeline's single memory port:
//! 1. **Memory:** The word-addressed SRAM holding program and data.
//! 2. **Arbiter:** Grants the port to a store write, a data access, or fetch.

/// Single-port memory arbiter.
pub mod arbiter;

/// SRAM backing store.
pub mod memory;

pub use arbiter::{Arbiter, DataRequest, PortGrant};
pub use memory::Sram;
