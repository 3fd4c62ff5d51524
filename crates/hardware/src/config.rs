//! Configuration system for the pipeline model.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline constants (cycle budget, SRAM depth, image handling).
//! 2. **Structures:** Hierarchical config for general, memory, and image settings.
//! 3. **Enums:** Out-of-range address policy and program image format.
//!
//! Configuration is supplied as JSON (`Config::from_json`, `Config::from_file`) or
//! taken from `Config::default()`. Every field may be omitted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::{MAX_DEPTH_LOG, MIN_DEPTH_LOG};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Cycle budget before a run is abandoned.
    pub const MAX_CYCLES: u64 = 1_000_000;

    /// SRAM depth as log2 of the word count (64 Ki words, 256 KiB).
    pub const DEPTH_LOG: u32 = 16;
}

/// What the SRAM does with an address past its last word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OutOfRangePolicy {
    /// Keep only the low index bits, like a macro with a narrow address bus.
    #[default]
    Wrap,
    /// Stop the run with `MemoryError::OutOfRange`.
    Fault,
}

/// Program image file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ImageFormat {
    /// Verilog if any line starts with `@`, otherwise one word per line.
    #[default]
    Auto,
    /// `@<addr>` markers followed by whitespace-separated hex bytes.
    Verilog,
    /// One hex word per line, starting at address 0.
    Words,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rv32pipe_core::config::{Config, OutOfRangePolicy};
///
/// let json = r#"{
///     "general": { "max_cycles": 5000 },
///     "memory": { "depth_log": 12, "out_of_range": "Fault" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, 5000);
/// assert!(!config.general.trace_pipeline);
/// assert_eq!(config.memory.out_of_range, OutOfRangePolicy::Fault);
/// assert!(config.image.rewrite_halt);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// SRAM configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Program image handling
    #[serde(default)]
    pub image: ImageConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let depth = self.memory.depth_log;
        if !(MIN_DEPTH_LOG..=MAX_DEPTH_LOG).contains(&depth) {
            return Err(ConfigError::DepthLog {
                got: depth,
                min: MIN_DEPTH_LOG,
                max: MAX_DEPTH_LOG,
            });
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-stage pipeline events through `tracing` at DEBUG level
    #[serde(default)]
    pub trace_pipeline: bool,

    /// Cycles to run before reporting `SimError::CycleLimit`
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_pipeline: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// SRAM configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Log2 of the number of 32-bit words
    #[serde(default = "MemoryConfig::default_depth_log")]
    pub depth_log: u32,

    /// Handling of addresses past the last word
    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,
}

impl MemoryConfig {
    fn default_depth_log() -> u32 {
        defaults::DEPTH_LOG
    }

    /// Number of 32-bit words, saturating for depths past the address width.
    pub const fn depth_words(&self) -> usize {
        match 1_usize.checked_shl(self.depth_log) {
            Some(words) => words,
            None => usize::MAX,
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            depth_log: defaults::DEPTH_LOG,
            out_of_range: OutOfRangePolicy::Wrap,
        }
    }
}

/// Program image handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Replace `addi a0, x0, 255` with the reserved halt word while loading
    #[serde(default = "ImageConfig::default_rewrite_halt")]
    pub rewrite_halt: bool,

    /// Image file format
    #[serde(default)]
    pub format: ImageFormat,
}

impl ImageConfig {
    fn default_rewrite_halt() -> bool {
        true
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            rewrite_halt: true,
            format: ImageFormat::Auto,
        }
    }
}
