//! Decode and Decode-Forward Tests.

use pretty_assertions::assert_eq;

use crate::common::builder::instruction::InstructionBuilder as I;
use rv32pipe_core::common::log::NullLog;
use rv32pipe_core::core::arch::gpr::Gpr;
use rv32pipe_core::core::pipeline::hazards::{ForwardSel, HazardDecision, tap};
use rv32pipe_core::core::pipeline::latches::{DecodeBundle, ExBundle, IfIdEntry};
use rv32pipe_core::core::pipeline::signals::{BranchKind, MemOp};
use rv32pipe_core::core::pipeline::stages::decode::{Taps, decode_stage, forward_stage};
use rv32pipe_core::isa::decode_table::DecodeTable;
use rv32pipe_core::isa::system::ECALL;

fn entry(pc: u32) -> Option<IfIdEntry> {
    Some(IfIdEntry { pc, predicted: pc + 4 })
}

fn decode(inst: u32, rf: &Gpr) -> DecodeBundle {
    let table = DecodeTable::new().expect("valid table");
    decode_stage(&table, entry(0x20), inst, rf, &NullLog, 0)
}

fn no_taps() -> Taps {
    Taps { ex: None, mem: None, wb: None }
}

// ══════════════════════════════════════════════════════════
// Decode
// ══════════════════════════════════════════════════════════

#[test]
fn empty_if_id_is_bubble() {
    let table = DecodeTable::new().expect("valid table");
    let out = decode_stage(&table, None, 0xFFFF_FFFF, &Gpr::new(), &NullLog, 0);
    assert_eq!(out, DecodeBundle::default());
    assert!(!out.valid);
}

#[test]
fn reads_register_file() {
    let mut rf = Gpr::new();
    rf.write(1, 100);
    rf.write(2, 23);
    let out = decode(I::new().add(3, 1, 2).build(), &rf);
    assert!(out.valid);
    assert_eq!(out.pc, 0x20);
    assert_eq!(out.predicted, 0x24);
    assert_eq!((out.rd, out.rs1, out.rs2), (3, 1, 2));
    assert_eq!((out.rs1_val, out.rs2_val), (100, 23));
}

#[test]
fn unmapped_word_is_valid_bubble() {
    let out = decode(0, &Gpr::new());
    assert!(out.valid);
    assert_eq!(out.rd, 0);
    assert_eq!(out.ctrl.mem_op, MemOp::None);
    assert!(!out.ctrl.reg_write);
}

#[test]
fn ecall_carries_halt() {
    let out = decode(ECALL, &Gpr::new());
    assert!(out.ctrl.halt);
    assert_eq!(out.rd, 0);
}

// ══════════════════════════════════════════════════════════
// Decode-Forward
// ══════════════════════════════════════════════════════════

#[test]
fn forwards_selected_values() {
    let bundle = decode(I::new().add(3, 1, 2).build(), &Gpr::new());
    let decision = HazardDecision {
        rs1: ForwardSel::Mem,
        rs2: ForwardSel::Ex,
        stall: false,
    };
    let taps = Taps {
        ex: tap(2, 7),
        mem: tap(1, 5),
        wb: tap(1, 99),
    };
    let out = forward_stage(&bundle, &decision, &taps, false, &NullLog, 0);
    assert!(out.valid);
    assert_eq!((out.rs1_val, out.rs2_val), (5, 7));
    assert_eq!(out.rd, 3);
}

#[test]
fn register_values_pass_through_without_forwarding() {
    let mut rf = Gpr::new();
    rf.write(4, 0x44);
    let bundle = decode(I::new().sw(0, 4, 8).build(), &rf);
    let out = forward_stage(&bundle, &HazardDecision::default(), &no_taps(), false, &NullLog, 0);
    assert_eq!(out.rs2_val, 0x44);
    assert_eq!(out.imm, 8);
    assert_eq!(out.ctrl.mem_op, MemOp::Store);
}

#[test]
fn stall_issues_bubble() {
    let bundle = decode(I::new().beq(1, 2, 16).build(), &Gpr::new());
    let decision = HazardDecision {
        stall: true,
        ..HazardDecision::default()
    };
    let out = forward_stage(&bundle, &decision, &no_taps(), false, &NullLog, 0);
    assert!(!out.valid);
    assert_eq!(out.ctrl.branch, BranchKind::None);
}

#[test]
fn flush_clears_every_side_effect() {
    for inst in [
        I::new().addi(5, 0, 1).build(),
        I::new().sw(0, 1, 0).build(),
        I::new().jal(1, 8).build(),
        ECALL,
    ] {
        let bundle = decode(inst, &Gpr::new());
        let out = forward_stage(&bundle, &HazardDecision::default(), &no_taps(), true, &NullLog, 0);
        assert!(!out.valid);
        assert_eq!(out.rd, 0);
        assert!(!out.ctrl.halt);
        assert_eq!(out.ctrl.mem_op, MemOp::None);
        assert_eq!(out.ctrl.branch, BranchKind::None);
    }
}

#[test]
fn bubble_in_is_bubble_out() {
    let out = forward_stage(&DecodeBundle::default(), &HazardDecision::default(), &no_taps(), false, &NullLog, 0);
    assert_eq!(out.valid, ExBundle::default().valid);
    assert_eq!(out.rd, 0);
}
