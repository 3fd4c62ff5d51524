//! RV32I immediate decoding.
//!
//! Five fixed-layout extractors, one per format. Each one replicates the
//! instruction's bit 31 into every bit above the field it assembles, so the
//! returned `u32` is the two's-complement encoding of the signed immediate.

use crate::core::pipeline::signals::ImmKind;

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit shift for extracting I-Type immediate field (bits 20-31).
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
const I_IMM_SHIFT: u32 = 20;

/// Bit shift for extracting S-Type immediate low field (bits 7-11).
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
const S_IMM_LOW_SHIFT: u32 = 7;

/// Bit mask for S-Type immediate low field (5 bits: imm[4:0]).
const S_IMM_LOW_MASK: u32 = 0x1F;

/// Bit shift for extracting S-Type immediate high field (bits 25-31).
const S_IMM_HIGH_SHIFT: u32 = 25;

/// Bit mask for S-Type immediate high field (7 bits: imm[11:5]).
const S_IMM_HIGH_MASK: u32 = 0x7F;

/// Total number of bits in S-Type immediate (12 bits).
const S_IMM_BITS: u32 = 12;

/// Total number of bits in B-Type immediate (13 bits, bit 0 always zero).
///
/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
const B_IMM_BITS: u32 = 13;

/// Bit mask for extracting U-Type immediate field (bits 12-31).
///
/// U-Type format: `imm[31:12] | rd | opcode`
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Total number of bits in J-Type immediate (21 bits, bit 0 always zero).
///
/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
const J_IMM_BITS: u32 = 21;

/// Decodes the immediate selected by `kind`.
///
/// # Arguments
///
/// * `kind` - Immediate layout chosen by the decode table.
/// * `inst` - The raw 32-bit instruction.
///
/// # Returns
///
/// The sign-extended immediate, or 0 for R-type encodings.
pub const fn decode_imm(kind: ImmKind, inst: u32) -> u32 {
    match kind {
        ImmKind::R => 0,
        ImmKind::I => i_type(inst),
        ImmKind::S => s_type(inst),
        ImmKind::B => b_type(inst),
        ImmKind::U => u_type(inst),
        ImmKind::J => j_type(inst),
    }
}

/// I-Type immediate: loads, JALR and immediate arithmetic.
pub const fn i_type(inst: u32) -> u32 {
    ((inst as i32) >> I_IMM_SHIFT) as u32
}

/// S-Type immediate: stores.
pub const fn s_type(inst: u32) -> u32 {
    let low = (inst >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
    let high = (inst >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
    sign_extend((high << 5) | low, S_IMM_BITS)
}

/// B-Type immediate: conditional branches. Always even.
pub const fn b_type(inst: u32) -> u32 {
    let bit_11 = (inst >> 7) & 0x1;
    let bits_4_1 = (inst >> 8) & 0xF;
    let bits_10_5 = (inst >> 25) & 0x3F;
    let bit_12 = (inst >> 31) & 0x1;

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, B_IMM_BITS)
}

/// U-Type immediate: LUI and AUIPC. Already occupies the top 20 bits.
pub const fn u_type(inst: u32) -> u32 {
    inst & U_IMM_MASK
}

/// J-Type immediate: JAL. Always even.
pub const fn j_type(inst: u32) -> u32 {
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 0x1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = (inst >> 31) & 0x1;

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, J_IMM_BITS)
}

/// Sign extends the low `bits` bits of `val` to 32 bits.
const fn sign_extend(val: u32, bits: u32) -> u32 {
    let shift = INSTRUCTION_WIDTH - bits;
    (((val << shift) as i32) >> shift) as u32
}
