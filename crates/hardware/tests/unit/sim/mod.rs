//! Run driver tests.


/// `Simulator::run`.
pub mod simulator;
