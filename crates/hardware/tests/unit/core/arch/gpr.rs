//! General-Purpose Register File Tests.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use rv32pipe_core::core::arch::gpr::Gpr;

#[test]
fn boots_to_zero() {
    assert_eq!(Gpr::new().snapshot(), [0; 32]);
}

#[test]
fn x0_storage_stays_zero() {
    let mut rf = Gpr::new();
    rf.write(0, 0xDEAD_BEEF);
    assert_eq!(rf, Gpr::new());
}

#[test]
fn writes_overwrite() {
    let mut rf = Gpr::new();
    rf.write(1, 0x1234_5678);
    rf.write(1, 0x1111_1111);
    rf.write(31, 0xFFFF_FFFF);
    assert_eq!(rf.read(1), 0x1111_1111);
    assert_eq!(rf.read(31), 0xFFFF_FFFF);
}

#[test]
fn dump_has_eight_rows_of_four() {
    let mut rf = Gpr::new();
    rf.write(2, 0x1000);
    let text = rf.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].starts_with("x0(zero)  =0x00000000"));
    assert!(lines[0].contains("x2(sp)    =0x00001000"));
    assert!(lines[7].contains("x31(t6)"));
}

proptest! {
    #[test]
    fn x0_reads_zero_after_any_write(val in any::<u32>(), other in 1_usize..32) {
        let mut rf = Gpr::new();
        rf.write(0, val);
        rf.write(other, val);
        rf.write(0, val.wrapping_add(1));
        prop_assert_eq!(rf.read(0), 0);
        prop_assert_eq!(rf.snapshot()[0], 0);
        prop_assert_eq!(rf.read(other), val);
    }

    #[test]
    fn other_registers_hold_value(idx in 1_usize..32, val in any::<u32>()) {
        let mut rf = Gpr::new();
        rf.write(idx, val);
        prop_assert_eq!(rf.read(idx), val);
        prop_assert_eq!(rf.snapshot().iter().filter(|&&v| v != 0).count(), usize::from(val != 0));
    }
}
