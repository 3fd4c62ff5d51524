//! RV32I decode table.
//!
//! This module maps a 32-bit instruction to exactly one control record. It provides:
//! 1. **Dispatch:** `Mnemonic::classify` matches the `(opcode, funct3, bit30)` tuple to a
//!    single variant; no row flags are ever OR-ed together.
//! 2. **Rows:** One static `DecodeEntry` per mnemonic carrying its match pattern and signals.
//! 3. **Validation:** `DecodeTable::from_rows` rejects overlapping patterns and rows the
//!    dispatcher can never select.
//! 4. **Halt Recognition:** The three halt literals are checked before dispatch.
//!
//! Anything the dispatcher does not recognise decodes to [`ControlSignals::BUBBLE`].

use crate::common::error::DecodeTableError;
use crate::core::pipeline::signals::{
    AluOp, BranchKind, ControlSignals, ImmKind, MemOp, MemWidth, Op1Src, Op2Src,
};
use crate::isa::imm::decode_imm;
use crate::isa::instruction::{ALT_BIT, InstructionBits};
use crate::isa::rv32i::{funct3, opcodes};
use crate::isa::system;

/// Every RV32I instruction the pipeline executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Mnemonic {
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    Addi,
    Slti,
    Sltiu,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,
    Sb,
    Sh,
    Sw,
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Jal,
    Jalr,
    Lui,
    Auipc,
}

impl Mnemonic {
    /// Number of variants.
    pub const COUNT: usize = 37;

    /// Assembly name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Sll => "sll",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
            Self::Xor => "xor",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Or => "or",
            Self::And => "and",
            Self::Addi => "addi",
            Self::Slti => "slti",
            Self::Sltiu => "sltiu",
            Self::Xori => "xori",
            Self::Ori => "ori",
            Self::Andi => "andi",
            Self::Slli => "slli",
            Self::Srli => "srli",
            Self::Srai => "srai",
            Self::Lb => "lb",
            Self::Lh => "lh",
            Self::Lw => "lw",
            Self::Lbu => "lbu",
            Self::Lhu => "lhu",
            Self::Sb => "sb",
            Self::Sh => "sh",
            Self::Sw => "sw",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blt => "blt",
            Self::Bge => "bge",
            Self::Bltu => "bltu",
            Self::Bgeu => "bgeu",
            Self::Jal => "jal",
            Self::Jalr => "jalr",
            Self::Lui => "lui",
            Self::Auipc => "auipc",
        }
    }

    /// Selects the mnemonic for an encoding's discriminating fields.
    ///
    /// # Arguments
    ///
    /// * `opcode` - Bits 6:0.
    /// * `f3` - Bits 14:12.
    /// * `alt` - Bit 30.
    ///
    /// # Returns
    ///
    /// `None` for encodings outside RV32I (including the SYSTEM opcode, whose
    /// only meaningful words are the halt literals).
    pub const fn classify(opcode: u32, f3: u32, alt: bool) -> Option<Self> {
        use funct3 as f;
        use opcodes as op;

        Some(match (opcode, f3, alt) {
            (op::OP_REG, f::ADD_SUB, false) => Self::Add,
            (op::OP_REG, f::ADD_SUB, true) => Self::Sub,
            (op::OP_REG, f::SLL, false) => Self::Sll,
            (op::OP_REG, f::SLT, false) => Self::Slt,
            (op::OP_REG, f::SLTU, false) => Self::Sltu,
            (op::OP_REG, f::XOR, false) => Self::Xor,
            (op::OP_REG, f::SRL_SRA, false) => Self::Srl,
            (op::OP_REG, f::SRL_SRA, true) => Self::Sra,
            (op::OP_REG, f::OR, false) => Self::Or,
            (op::OP_REG, f::AND, false) => Self::And,

            (op::OP_IMM, f::ADD_SUB, _) => Self::Addi,
            (op::OP_IMM, f::SLT, _) => Self::Slti,
            (op::OP_IMM, f::SLTU, _) => Self::Sltiu,
            (op::OP_IMM, f::XOR, _) => Self::Xori,
            (op::OP_IMM, f::OR, _) => Self::Ori,
            (op::OP_IMM, f::AND, _) => Self::Andi,
            (op::OP_IMM, f::SLL, _) => Self::Slli,
            (op::OP_IMM, f::SRL_SRA, false) => Self::Srli,
            (op::OP_IMM, f::SRL_SRA, true) => Self::Srai,

            (op::OP_LOAD, f::LB, _) => Self::Lb,
            (op::OP_LOAD, f::LH, _) => Self::Lh,
            (op::OP_LOAD, f::LW, _) => Self::Lw,
            (op::OP_LOAD, f::LBU, _) => Self::Lbu,
            (op::OP_LOAD, f::LHU, _) => Self::Lhu,

            (op::OP_STORE, f::SB, _) => Self::Sb,
            (op::OP_STORE, f::SH, _) => Self::Sh,
            (op::OP_STORE, f::SW, _) => Self::Sw,

            (op::OP_BRANCH, f::BEQ, _) => Self::Beq,
            (op::OP_BRANCH, f::BNE, _) => Self::Bne,
            (op::OP_BRANCH, f::BLT, _) => Self::Blt,
            (op::OP_BRANCH, f::BGE, _) => Self::Bge,
            (op::OP_BRANCH, f::BLTU, _) => Self::Bltu,
            (op::OP_BRANCH, f::BGEU, _) => Self::Bgeu,

            (op::OP_JAL, _, _) => Self::Jal,
            (op::OP_JALR, f::JALR, _) => Self::Jalr,
            (op::OP_LUI, _, _) => Self::Lui,
            (op::OP_AUIPC, _, _) => Self::Auipc,

            _ => return None,
        })
    }
}

/// One row of the decode table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeEntry {
    /// Instruction this row describes.
    pub mnemonic: Mnemonic,
    /// Required opcode.
    pub opcode: u32,
    /// Required funct3, or `None` when any value matches.
    pub funct3: Option<u32>,
    /// Required bit 30, or `None` when either value matches.
    pub bit30: Option<bool>,
    /// Signals issued when the row matches.
    pub ctrl: ControlSignals,
}

impl DecodeEntry {
    /// Returns `true` when `inst` satisfies this row's pattern.
    pub fn matches(&self, inst: u32) -> bool {
        inst.opcode() == self.opcode
            && self.funct3.is_none_or(|f| f == inst.funct3())
            && self.bit30.is_none_or(|b| b == inst.bit30())
    }

    /// Smallest encoding accepted by this row.
    pub const fn example(&self) -> u32 {
        let f3 = match self.funct3 {
            Some(f) => f,
            None => 0,
        };
        let alt = matches!(self.bit30, Some(true));
        encode_pattern(self.opcode, f3, alt)
    }

    /// Returns an encoding both rows accept, if their patterns intersect.
    fn intersection(&self, other: &Self) -> Option<u32> {
        if self.opcode != other.opcode {
            return None;
        }
        let f3 = match (self.funct3, other.funct3) {
            (Some(a), Some(b)) if a != b => return None,
            (Some(a), _) | (None, Some(a)) => a,
            (None, None) => 0,
        };
        let alt = match (self.bit30, other.bit30) {
            (Some(a), Some(b)) if a != b => return None,
            (Some(a), _) | (None, Some(a)) => a,
            (None, None) => false,
        };
        Some(encode_pattern(self.opcode, f3, alt))
    }
}

/// Builds the word with only the discriminating fields set.
const fn encode_pattern(opcode: u32, f3: u32, alt: bool) -> u32 {
    opcode | (f3 << 12) | ((alt as u32) << ALT_BIT)
}

const fn alu_reg(mnemonic: Mnemonic, f3: u32, alt: bool, alu: AluOp) -> DecodeEntry {
    DecodeEntry {
        mnemonic,
        opcode: opcodes::OP_REG,
        funct3: Some(f3),
        bit30: Some(alt),
        ctrl: ControlSignals {
            alu,
            reg_write: true,
            imm: ImmKind::R,
            ..ControlSignals::BUBBLE
        },
    }
}

const fn alu_imm(mnemonic: Mnemonic, f3: u32, alt: Option<bool>, alu: AluOp) -> DecodeEntry {
    DecodeEntry {
        mnemonic,
        opcode: opcodes::OP_IMM,
        funct3: Some(f3),
        bit30: alt,
        ctrl: ControlSignals {
            alu,
            op2: Op2Src::Imm,
            reg_write: true,
            ..ControlSignals::BUBBLE
        },
    }
}

const fn load(mnemonic: Mnemonic, f3: u32, width: MemWidth, signed: bool) -> DecodeEntry {
    DecodeEntry {
        mnemonic,
        opcode: opcodes::OP_LOAD,
        funct3: Some(f3),
        bit30: None,
        ctrl: ControlSignals {
            alu: AluOp::Add,
            op2: Op2Src::Imm,
            mem_op: MemOp::Load,
            width,
            signed,
            reg_write: true,
            ..ControlSignals::BUBBLE
        },
    }
}

const fn store(mnemonic: Mnemonic, f3: u32, width: MemWidth) -> DecodeEntry {
    DecodeEntry {
        mnemonic,
        opcode: opcodes::OP_STORE,
        funct3: Some(f3),
        bit30: None,
        ctrl: ControlSignals {
            alu: AluOp::Add,
            op2: Op2Src::Imm,
            mem_op: MemOp::Store,
            width,
            imm: ImmKind::S,
            ..ControlSignals::BUBBLE
        },
    }
}

/// Conditional branch. The ALU produces the comparison the branch unit tests.
const fn branch(mnemonic: Mnemonic, f3: u32, kind: BranchKind, alu: AluOp) -> DecodeEntry {
    DecodeEntry {
        mnemonic,
        opcode: opcodes::OP_BRANCH,
        funct3: Some(f3),
        bit30: None,
        ctrl: ControlSignals {
            alu,
            branch: kind,
            imm: ImmKind::B,
            ..ControlSignals::BUBBLE
        },
    }
}

/// Jump. The ALU computes the link address `pc + 4`.
const fn jump(mnemonic: Mnemonic, opcode: u32, f3: Option<u32>, kind: BranchKind, imm: ImmKind) -> DecodeEntry {
    DecodeEntry {
        mnemonic,
        opcode,
        funct3: f3,
        bit30: None,
        ctrl: ControlSignals {
            alu: AluOp::Add,
            op1: Op1Src::Pc,
            op2: Op2Src::Four,
            reg_write: true,
            branch: kind,
            imm,
            ..ControlSignals::BUBBLE
        },
    }
}

const fn upper(mnemonic: Mnemonic, opcode: u32, alu: AluOp, op1: Op1Src) -> DecodeEntry {
    DecodeEntry {
        mnemonic,
        opcode,
        funct3: None,
        bit30: None,
        ctrl: ControlSignals {
            alu,
            op1,
            op2: Op2Src::Imm,
            reg_write: true,
            imm: ImmKind::U,
            ..ControlSignals::BUBBLE
        },
    }
}

/// The RV32I rows.
pub static RV32I_ROWS: [DecodeEntry; Mnemonic::COUNT] = {
    use Mnemonic as M;
    use funct3 as f;
    [
        alu_reg(M::Add, f::ADD_SUB, false, AluOp::Add),
        alu_reg(M::Sub, f::ADD_SUB, true, AluOp::Sub),
        alu_reg(M::Sll, f::SLL, false, AluOp::Sll),
        alu_reg(M::Slt, f::SLT, false, AluOp::Slt),
        alu_reg(M::Sltu, f::SLTU, false, AluOp::Sltu),
        alu_reg(M::Xor, f::XOR, false, AluOp::Xor),
        alu_reg(M::Srl, f::SRL_SRA, false, AluOp::Srl),
        alu_reg(M::Sra, f::SRL_SRA, true, AluOp::Sra),
        alu_reg(M::Or, f::OR, false, AluOp::Or),
        alu_reg(M::And, f::AND, false, AluOp::And),
        alu_imm(M::Addi, f::ADD_SUB, None, AluOp::Add),
        alu_imm(M::Slti, f::SLT, None, AluOp::Slt),
        alu_imm(M::Sltiu, f::SLTU, None, AluOp::Sltu),
        alu_imm(M::Xori, f::XOR, None, AluOp::Xor),
        alu_imm(M::Ori, f::OR, None, AluOp::Or),
        alu_imm(M::Andi, f::AND, None, AluOp::And),
        alu_imm(M::Slli, f::SLL, None, AluOp::Sll),
        alu_imm(M::Srli, f::SRL_SRA, Some(false), AluOp::Srl),
        alu_imm(M::Srai, f::SRL_SRA, Some(true), AluOp::Sra),
        load(M::Lb, f::LB, MemWidth::Byte, true),
        load(M::Lh, f::LH, MemWidth::Half, true),
        load(M::Lw, f::LW, MemWidth::Word, true),
        load(M::Lbu, f::LBU, MemWidth::Byte, false),
        load(M::Lhu, f::LHU, MemWidth::Half, false),
        store(M::Sb, f::SB, MemWidth::Byte),
        store(M::Sh, f::SH, MemWidth::Half),
        store(M::Sw, f::SW, MemWidth::Word),
        branch(M::Beq, f::BEQ, BranchKind::Beq, AluOp::Sub),
        branch(M::Bne, f::BNE, BranchKind::Bne, AluOp::Sub),
        branch(M::Blt, f::BLT, BranchKind::Blt, AluOp::Slt),
        branch(M::Bge, f::BGE, BranchKind::Bge, AluOp::Slt),
        branch(M::Bltu, f::BLTU, BranchKind::Bltu, AluOp::Sltu),
        branch(M::Bgeu, f::BGEU, BranchKind::Bgeu, AluOp::Sltu),
        jump(M::Jal, opcodes::OP_JAL, None, BranchKind::Jal, ImmKind::J),
        jump(M::Jalr, opcodes::OP_JALR, Some(f::JALR), BranchKind::Jalr, ImmKind::I),
        upper(M::Lui, opcodes::OP_LUI, AluOp::Pass, Op1Src::Zero),
        upper(M::Auipc, opcodes::OP_AUIPC, AluOp::Add, Op1Src::Pc),
    ]
};

/// Fields extracted from one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Matched instruction, `None` for halts and unmapped encodings.
    pub mnemonic: Option<Mnemonic>,
    /// Control record.
    pub ctrl: ControlSignals,
    /// Destination register, forced to 0 when the row does not write back.
    pub rd: usize,
    /// Raw `rs1` field.
    pub rs1: usize,
    /// Raw `rs2` field.
    pub rs2: usize,
    /// Sign-extended immediate for the row's layout.
    pub imm: u32,
}

/// Validated, immutable decode table.
#[derive(Clone, Debug)]
pub struct DecodeTable {
    rows: Vec<DecodeEntry>,
    by_mnemonic: [Option<usize>; Mnemonic::COUNT],
}

impl DecodeTable {
    /// Builds the standard RV32I table.
    ///
    /// # Returns
    ///
    /// The table, or the first invariant violation found in [`RV32I_ROWS`].
    pub fn new() -> Result<Self, DecodeTableError> {
        Self::from_rows(&RV32I_ROWS)
    }

    /// Builds a table from arbitrary rows, checking that no encoding matches
    /// two rows and that every row is the one dispatch selects for its pattern.
    ///
    /// # Arguments
    ///
    /// * `rows` - Candidate rows.
    pub fn from_rows(rows: &[DecodeEntry]) -> Result<Self, DecodeTableError> {
        for (i, first) in rows.iter().enumerate() {
            for second in &rows[i + 1..] {
                if let Some(example) = first.intersection(second) {
                    return Err(DecodeTableError::Overlap {
                        first: first.mnemonic.name(),
                        second: second.mnemonic.name(),
                        example,
                    });
                }
            }
        }

        let mut by_mnemonic = [None; Mnemonic::COUNT];
        for (i, row) in rows.iter().enumerate() {
            let example = row.example();
            let dispatched = Mnemonic::classify(example.opcode(), example.funct3(), example.bit30());
            if dispatched != Some(row.mnemonic) {
                return Err(DecodeTableError::Unreachable {
                    row: row.mnemonic.name(),
                    dispatched: dispatched.map_or("<unmapped>", Mnemonic::name),
                });
            }
            by_mnemonic[row.mnemonic as usize] = Some(i);
        }

        Ok(Self {
            rows: rows.to_vec(),
            by_mnemonic,
        })
    }

    /// All rows, in construction order.
    pub fn rows(&self) -> &[DecodeEntry] {
        &self.rows
    }

    /// Row for a mnemonic, if the table has one.
    pub fn entry(&self, mnemonic: Mnemonic) -> Option<&DecodeEntry> {
        self.by_mnemonic[mnemonic as usize].map(|i| &self.rows[i])
    }

    /// Decodes one instruction word.
    ///
    /// Halt literals win over dispatch. Unmapped encodings, and mnemonics this
    /// table has no row for, decode to [`ControlSignals::BUBBLE`].
    ///
    /// # Arguments
    ///
    /// * `inst` - The raw 32-bit instruction.
    pub fn decode(&self, inst: u32) -> Decoded {
        if system::is_halt(inst) {
            return Decoded {
                ctrl: ControlSignals::HALT,
                ..Decoded::default()
            };
        }

        let mnemonic = Mnemonic::classify(inst.opcode(), inst.funct3(), inst.bit30());
        let ctrl = mnemonic
            .and_then(|m| self.entry(m))
            .map_or(ControlSignals::BUBBLE, |row| row.ctrl);

        Decoded {
            mnemonic: mnemonic.filter(|m| self.entry(*m).is_some()),
            ctrl,
            rd: if ctrl.reg_write { inst.rd() } else { 0 },
            rs1: inst.rs1(),
            rs2: inst.rs2(),
            imm: decode_imm(ctrl.imm, inst),
        }
    }
}
