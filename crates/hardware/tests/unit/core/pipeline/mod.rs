//! Pipeline tests.


/// Per-stage behaviour.
pub mod stages;
