//! ABI Register Name Tests.

use rstest::rstest;

use rv32pipe_core::isa::abi::{REG_A0, REG_NAMES, parse_reg, reg_name};

#[rstest]
#[case("a0", Some(10))]
#[case("x10", Some(10))]
#[case("zero", Some(0))]
#[case("fp", Some(8))]
#[case("s0", Some(8))]
#[case("T6", Some(31))]
#[case(" sp ", Some(2))]
#[case("x32", None)]
#[case("q1", None)]
#[case("", None)]
fn parses_names(#[case] text: &str, #[case] idx: Option<usize>) {
    assert_eq!(parse_reg(text), idx);
}

#[test]
fn every_name_round_trips() {
    for (i, name) in REG_NAMES.iter().enumerate() {
        assert_eq!(reg_name(i), *name);
        assert_eq!(parse_reg(name), Some(i));
        assert_eq!(parse_reg(&format!("x{i}")), Some(i));
    }
    assert_eq!(reg_name(REG_A0), "a0");
    assert_eq!(reg_name(40), "x??");
}
