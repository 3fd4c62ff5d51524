//! ALU Tests.

use proptest::prelude::*;
use rstest::rstest;

use rv32pipe_core::core::pipeline::signals::AluOp;
use rv32pipe_core::core::units::alu::Alu;

#[rstest]
#[case(AluOp::Add, 5, 7, 12)]
#[case(AluOp::Add, 0xFFFF_FFFF, 1, 0)]
#[case(AluOp::Sub, 0, 1, 0xFFFF_FFFF)]
#[case(AluOp::Sub, 10, 3, 7)]
#[case(AluOp::Slt, -5_i32 as u32, 10, 1)]
#[case(AluOp::Slt, 10, -5_i32 as u32, 0)]
#[case(AluOp::Sltu, -5_i32 as u32, 10, 0)]
#[case(AluOp::Sltu, 3, 4, 1)]
#[case(AluOp::Xor, 0xF0F0_F0F0, 0xFF00_FF00, 0x0FF0_0FF0)]
#[case(AluOp::Or, 0xF000_0000, 0x0000_000F, 0xF000_000F)]
#[case(AluOp::And, 0xFFFF_0000, 0x00FF_FF00, 0x00FF_0000)]
#[case(AluOp::Sll, 1, 31, 0x8000_0000)]
#[case(AluOp::Sll, 1, 33, 2)]
#[case(AluOp::Srl, 0x8000_0000, 31, 1)]
#[case(AluOp::Sra, 0x8000_0000, 4, 0xF800_0000)]
#[case(AluOp::Sra, 0x8000_0000, 0x400 | 4, 0xF800_0000)]
#[case(AluOp::Pass, 0xDEAD, 0x1234_5000, 0x1234_5000)]
#[case(AluOp::Nop, 0xDEAD, 0xBEEF, 0)]
fn computes(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, a, b), expected, "{op:?}({a:#x}, {b:#x})");
}

proptest! {
    #[test]
    fn sub_inverts_add(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(Alu::execute(AluOp::Sub, Alu::execute(AluOp::Add, a, b), b), a);
    }

    #[test]
    fn shifts_use_low_five_bits(a in any::<u32>(), b in any::<u32>()) {
        for op in [AluOp::Sll, AluOp::Srl, AluOp::Sra] {
            prop_assert_eq!(Alu::execute(op, a, b), Alu::execute(op, a, b & 0x1F));
        }
    }

    #[test]
    fn set_less_than_is_boolean(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(Alu::execute(AluOp::Slt, a, b), u32::from((a as i32) < (b as i32)));
        prop_assert_eq!(Alu::execute(AluOp::Sltu, a, b), u32::from(a < b));
    }
}
