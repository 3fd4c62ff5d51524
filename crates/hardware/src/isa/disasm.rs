//! Instruction Disassembler for RV32I.
//!
//! Converts a 32-bit instruction encoding into a human-readable string for
//! pipeline traces and test diagnostics. Classification goes through
//! [`Mnemonic::classify`](crate::isa::decode_table::Mnemonic::classify), so the disassembler and the decode table can never
//! disagree about which instruction a word is.

use crate::isa::abi::reg_name;
use crate::isa::decode_table::Mnemonic as M;
use crate::isa::imm;
use crate::isa::instruction::InstructionBits;
use crate::isa::system;

/// Disassembles a 32-bit RV32I instruction.
///
/// Returns text like `"add a0, a1, a2"`, or `"unknown"` for encodings the
/// pipeline treats as bubbles.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    match inst {
        system::ECALL => return "ecall".to_string(),
        system::EBREAK => return "ebreak".to_string(),
        system::HALT => return "halt".to_string(),
        _ => {}
    }

    let Some(m) = M::classify(inst.opcode(), inst.funct3(), inst.bit30()) else {
        return "unknown".to_string();
    };

    let name = m.name();
    let rd = reg_name(inst.rd());
    let rs1 = reg_name(inst.rs1());
    let rs2 = reg_name(inst.rs2());
    let imm_i = imm::i_type(inst) as i32;

    match m {
        M::Add | M::Sub | M::Sll | M::Slt | M::Sltu | M::Xor | M::Srl | M::Sra | M::Or | M::And => {
            format!("{name} {rd}, {rs1}, {rs2}")
        }
        M::Slli | M::Srli | M::Srai => format!("{name} {rd}, {rs1}, {}", inst.rs2()),
        M::Addi | M::Slti | M::Sltiu | M::Xori | M::Ori | M::Andi => {
            format!("{name} {rd}, {rs1}, {imm_i}")
        }
        M::Lb | M::Lh | M::Lw | M::Lbu | M::Lhu | M::Jalr => {
            format!("{name} {rd}, {imm_i}({rs1})")
        }
        M::Sb | M::Sh | M::Sw => {
            format!("{name} {rs2}, {}({rs1})", imm::s_type(inst) as i32)
        }
        M::Beq | M::Bne | M::Blt | M::Bge | M::Bltu | M::Bgeu => {
            format!("{name} {rs1}, {rs2}, {}", imm::b_type(inst) as i32)
        }
        M::Jal => format!("{name} {rd}, {}", imm::j_type(inst) as i32),
        M::Lui | M::Auipc => format!("{name} {rd}, {:#x}", imm::u_type(inst) >> 12),
    }
}
