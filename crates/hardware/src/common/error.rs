//! Error definitions for the pipeline model.
//!
//! This module collects every failure the library can report. It provides:
//! 1. **Decode Table Errors:** Overlapping or unreachable rows caught at table construction.
//! 2. **Memory Errors:** Accesses outside the configured SRAM depth under the `Fault` policy.
//! 3. **Image Errors:** Malformed hex images and images that do not fit in memory.
//! 4. **Configuration Errors:** Unreadable or invalid JSON configuration.
//! 5. **Simulation Errors:** The umbrella type returned by the run driver.
//!
//! Unmapped opcodes are not errors: they decode to a bubble.

use thiserror::Error;

/// Invariant violations detected while building a decode table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeTableError {
    /// Two rows match at least one common encoding.
    #[error("decode rows `{first}` and `{second}` both match encoding {example:#010x}")]
    Overlap {
        /// Mnemonic of the earlier row.
        first: &'static str,
        /// Mnemonic of the later row.
        second: &'static str,
        /// An encoding both rows accept.
        example: u32,
    },

    /// A row's match pattern dispatches to a different mnemonic than the row declares.
    #[error("decode row `{row}` is shadowed: its encoding dispatches to `{dispatched}`")]
    Unreachable {
        /// Mnemonic the row declares.
        row: &'static str,
        /// Mnemonic the dispatcher selects for the row's encoding.
        dispatched: &'static str,
    },
}

/// Memory port failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Address lies past the last word of the SRAM.
    #[error("address {addr:#010x} is outside the {depth_words}-word memory")]
    OutOfRange {
        /// Byte address presented to the port.
        addr: u32,
        /// Number of 32-bit words the SRAM holds.
        depth_words: usize,
    },
}

/// Failures while parsing or placing a program image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// A line of the image could not be parsed.
    #[error("line {line}: {msg}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        msg: String,
    },

    /// The image extends past the end of memory.
    #[error("image ends at word {end_word} but memory holds {capacity} words")]
    TooLarge {
        /// One past the last word index the image occupies.
        end_word: usize,
        /// SRAM depth in words.
        capacity: usize,
    },

    /// The image file could not be read.
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON did not match the configuration schema.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The SRAM depth is outside the supported range.
    #[error("memory.depth_log must be between {min} and {max}, got {got}")]
    DepthLog {
        /// Value supplied.
        got: u32,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },
}

/// Top-level simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Decode table failed validation.
    #[error(transparent)]
    DecodeTable(#[from] DecodeTableError),

    /// A memory access faulted.
    #[error(transparent)]
    Memory(#[from] MemoryError),

    /// The program image was rejected.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The program did not halt within the cycle budget.
    #[error("no halt after {cycles} cycles")]
    CycleLimit {
        /// Cycles executed before giving up.
        cycles: u64,
    },
}
