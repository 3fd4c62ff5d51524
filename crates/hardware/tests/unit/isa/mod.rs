//! ISA tests.

/// ABI register names.
pub mod abi;
