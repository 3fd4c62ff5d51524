//! Fetch Stage Tests.

use pretty_assertions::assert_eq;

use rv32pipe_core::common::log::{NullLog, RecordingLog, Stage};
use rv32pipe_core::core::pipeline::latches::IfIdEntry;
use rv32pipe_core::core::pipeline::stages::fetch::{FetchUnit, fetch_stage};

#[test]
fn boots_at_zero() {
    let out = fetch_stage(&FetchUnit::default(), None, false, &NullLog, 0);
    assert_eq!(out.addr, Some(0));
    assert_eq!(out.if_id, Some(IfIdEntry { pc: 0, predicted: 4 }));
    assert_eq!(out.next, FetchUnit { pc: 4, prev_pc: 0 });
}

#[test]
fn sequential_fetch_advances_by_word() {
    let mut unit = FetchUnit::default();
    for expected in [0, 4, 8, 12] {
        let out = fetch_stage(&unit, None, false, &NullLog, 0);
        assert_eq!(out.addr, Some(expected));
        unit = out.next;
    }
}

#[test]
fn stall_presents_nothing_and_empties_if_id() {
    let unit = FetchUnit { pc: 0x14, prev_pc: 0x10 };
    let out = fetch_stage(&unit, None, true, &NullLog, 3);
    assert_eq!(out.addr, None);
    assert_eq!(out.if_id, None);
    assert_eq!(out.next, FetchUnit { pc: 0x10, prev_pc: 0x10 });
}

#[test]
fn stalls_in_a_row_keep_replay_address() {
    let mut unit = FetchUnit { pc: 0x14, prev_pc: 0x10 };
    for _ in 0..3 {
        unit = fetch_stage(&unit, None, true, &NullLog, 0).next;
    }
    let out = fetch_stage(&unit, None, false, &NullLog, 0);
    assert_eq!(out.addr, Some(0x10));
    assert_eq!(out.next.pc, 0x14);
}

#[test]
fn redirect_restarts_at_target() {
    let unit = FetchUnit { pc: 0x0C, prev_pc: 0x08 };
    let out = fetch_stage(&unit, Some(0x40), false, &NullLog, 0);
    assert_eq!(out.addr, Some(0x40));
    assert_eq!(out.if_id, Some(IfIdEntry { pc: 0x40, predicted: 0x44 }));
    assert_eq!(out.next, FetchUnit { pc: 0x44, prev_pc: 0x40 });
}

#[test]
fn redirect_during_stall_holds_target() {
    let unit = FetchUnit { pc: 0x0C, prev_pc: 0x08 };
    let out = fetch_stage(&unit, Some(0x40), true, &NullLog, 0);
    assert_eq!(out.addr, None);
    assert_eq!(out.next, FetchUnit { pc: 0x40, prev_pc: 0x40 });
}

#[test]
fn logs_redirect() {
    let log = RecordingLog::new();
    let _ = fetch_stage(&FetchUnit::default(), Some(0x80), false, &log, 9);
    let records = log.records_for(Stage::Fetch);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].cycle, 9);
    assert!(records[0].message.contains("redirect to 0x00000080"));
}
