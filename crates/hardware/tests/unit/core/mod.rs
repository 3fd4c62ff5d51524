//! Core tests.


/// End-to-end cycle behaviour.
pub mod cpu;

/// Hazards and individual stages.
pub mod pipeline;
