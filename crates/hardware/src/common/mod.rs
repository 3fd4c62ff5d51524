//! Common utilities and types used throughout the pipeline model.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Constants:** Register count, word geometry, reset vector, SRAM depth limits.
//! 2. **Error Handling:** `thiserror` enums for decode, memory, image, config and run failures.
//! 3. **Logging:** The injected `PipelineLog` capability and its implementations.

/// Architectural and model-wide constants.
pub mod constants;

/// Error types.
pub mod error;

/// Injected pipeline logging.
pub mod log;

pub use error::{ConfigError, DecodeTableError, ImageError, MemoryError, SimError};
pub use log::{NullLog, PipelineLog, RecordingLog, Stage, TracingLog};
