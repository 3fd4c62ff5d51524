//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic that keeps Decode-Forward's operands
//! consistent with instructions still in flight. It provides:
//! 1. **Operand Forwarding:** Picks, per source register, the youngest in-flight
//!    producer among Execute, Memory and Writeback.
//! 2. **Structural Stalls:** Holds the front end while Execute or Memory owns the
//!    single memory port.
//!
//! Loads never need a dependence check: any load in Execute stalls Decode, and
//! by the time the dependent instruction is decoded again the load has reached
//! Writeback.

/// Value a stage offers for forwarding this cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tap {
    /// Destination register (never 0).
    pub rd: usize,
    /// Value that will be written to `rd`.
    pub value: u32,
}

/// Optional forwarding tap; `None` when the stage writes no register.
pub type ForwardTap = Option<Tap>;

/// Builds a tap, dropping writes to `x0`.
pub const fn tap(rd: usize, value: u32) -> ForwardTap {
    if rd == 0 { None } else { Some(Tap { rd, value }) }
}

/// Operand source chosen by the hazard unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ForwardSel {
    /// Register-file value.
    #[default]
    None,
    /// Result of the instruction in Execute.
    Ex,
    /// Result of the instruction in Memory.
    Mem,
    /// Result of the instruction in Writeback.
    Wb,
}

/// Everything the hazard unit looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardInputs {
    /// First source register of the instruction in Decode.
    pub rs1: usize,
    /// Second source register of the instruction in Decode.
    pub rs2: usize,
    /// Destination in Execute (after squash).
    pub ex_rd: usize,
    /// Destination in Memory.
    pub mem_rd: usize,
    /// Destination in Writeback.
    pub wb_rd: usize,
    /// Execute holds a load.
    pub ex_is_load: bool,
    /// Execute holds a store.
    pub ex_is_store: bool,
    /// Memory holds a store.
    pub mem_is_store: bool,
}

/// Hazard unit output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardDecision {
    /// Source for `rs1`.
    pub rs1: ForwardSel,
    /// Source for `rs2`.
    pub rs2: ForwardSel,
    /// Hold Fetch and bubble Decode.
    pub stall: bool,
}

/// Chooses the forwarding source for one register.
///
/// # Arguments
///
/// * `rs` - Source register.
/// * `ex_rd`, `mem_rd`, `wb_rd` - Destinations in flight.
///
/// # Returns
///
/// The youngest matching stage, Execute first. `x0` is never forwarded.
pub const fn select(rs: usize, ex_rd: usize, mem_rd: usize, wb_rd: usize) -> ForwardSel {
    if rs == 0 {
        ForwardSel::None
    } else if rs == ex_rd {
        ForwardSel::Ex
    } else if rs == mem_rd {
        ForwardSel::Mem
    } else if rs == wb_rd {
        ForwardSel::Wb
    } else {
        ForwardSel::None
    }
}

/// Returns `true` when the memory port is claimed by Execute or Memory.
pub const fn need_stall(ex_is_load: bool, ex_is_store: bool, mem_is_store: bool) -> bool {
    ex_is_load || ex_is_store || mem_is_store
}

/// Runs the hazard unit for one cycle.
pub const fn detect(inputs: &HazardInputs) -> HazardDecision {
    HazardDecision {
        rs1: select(inputs.rs1, inputs.ex_rd, inputs.mem_rd, inputs.wb_rd),
        rs2: select(inputs.rs2, inputs.ex_rd, inputs.mem_rd, inputs.wb_rd),
        stall: need_stall(inputs.ex_is_load, inputs.ex_is_store, inputs.mem_is_store),
    }
}

/// Produces an operand value from the chosen source.
///
/// # Arguments
///
/// * `sel` - Source chosen by [`select`].
/// * `rf_val` - Register-file value.
/// * `ex`, `mem`, `wb` - Stage taps.
///
/// # Returns
///
/// The tap's value, or `rf_val` when the selected tap is absent.
pub fn resolve(sel: ForwardSel, rf_val: u32, ex: ForwardTap, mem: ForwardTap, wb: ForwardTap) -> u32 {
    let tap = match sel {
        ForwardSel::None => None,
        ForwardSel::Ex => ex,
        ForwardSel::Mem => mem,
        ForwardSel::Wb => wb,
    };
    tap.map_or(rf_val, |t| t.value)
}

