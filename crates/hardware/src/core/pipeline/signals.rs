//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution. It performs:
//! 1. **Operation Classification:** Selects exactly one ALU operation per instruction.
//! 2. **Operand Selection:** Defines sources for ALU inputs (registers, PC, immediates, constants).
//! 3. **Memory Control:** Specifies load/store, access width and sign extension.
//! 4. **Control Flow:** Identifies the branch or jump kind resolved in Execute.
//!
//! Every enum's `Default` is the value an unmapped opcode decodes to, so
//! `ControlSignals::default()` is the bubble record.

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// No operation; result is zero.
    #[default]
    Nop,

    /// Integer addition.
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,

    /// Operand B passed through unchanged.
    Pass,
}

/// Source for ALU operand 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Op1Src {
    /// Use the forwarded `rs1` value.
    #[default]
    Rs1,

    /// Use the instruction's program counter.
    Pc,

    /// Use zero.
    Zero,
}

/// Source for ALU operand 2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Op2Src {
    /// Use the forwarded `rs2` value.
    #[default]
    Rs2,

    /// Use the sign-extended immediate.
    Imm,

    /// Use the constant 4 (link address for jumps).
    Four,
}

/// Memory operation requested from the arbiter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MemOp {
    /// No memory access.
    #[default]
    None,

    /// Read a word and extract a sub-field.
    Load,

    /// Read-modify-write of a sub-field.
    Store,
}

/// Memory access width for load and store operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MemWidth {
    /// 8-bit byte access.
    Byte,

    /// 16-bit half-word access.
    Half,

    /// 32-bit word access.
    #[default]
    Word,
}

impl MemWidth {
    /// Unshifted byte-lane mask for this width.
    pub const fn mask(self) -> u32 {
        match self {
            Self::Byte => 0x0000_00FF,
            Self::Half => 0x0000_FFFF,
            Self::Word => 0xFFFF_FFFF,
        }
    }
}

/// Branch or jump kind resolved in Execute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BranchKind {
    /// Not a control-flow instruction.
    #[default]
    None,
    /// Branch if equal.
    Beq,
    /// Branch if not equal.
    Bne,
    /// Branch if less than (signed).
    Blt,
    /// Branch if greater or equal (signed).
    Bge,
    /// Branch if less than (unsigned).
    Bltu,
    /// Branch if greater or equal (unsigned).
    Bgeu,
    /// Jump and link, PC-relative.
    Jal,
    /// Jump and link, register-relative.
    Jalr,
}

impl BranchKind {
    /// Returns `true` for the unconditional jumps.
    pub const fn is_jump(self) -> bool {
        matches!(self, Self::Jal | Self::Jalr)
    }

    /// Returns `true` for any control-flow instruction.
    pub const fn is_control(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Immediate layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImmKind {
    /// No immediate (register-register).
    R,
    /// 12-bit signed immediate in bits 31:20.
    #[default]
    I,
    /// Store offset split across bits 31:25 and 11:7.
    S,
    /// Branch offset, even, 13 bits.
    B,
    /// Upper immediate in bits 31:12.
    U,
    /// Jump offset, even, 21 bits.
    J,
}

/// Control signals for pipeline stage execution.
///
/// Produced once per instruction by the decode table and then narrowed as
/// the instruction moves down the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ControlSignals {
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand 1.
    pub op1: Op1Src,
    /// Source selection for ALU operand 2.
    pub op2: Op2Src,
    /// Memory operation.
    pub mem_op: MemOp,
    /// Width of memory access.
    pub width: MemWidth,
    /// Load should be sign-extended.
    pub signed: bool,
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Branch or jump kind.
    pub branch: BranchKind,
    /// Immediate layout.
    pub imm: ImmKind,
    /// Instruction ends the run when it reaches writeback.
    pub halt: bool,
}

impl ControlSignals {
    /// Record for an unmapped encoding: ALU-NOP, operands from `rs1`/`rs2`,
    /// I-type immediate, word width, and no side effects.
    pub const BUBBLE: Self = Self {
        alu: AluOp::Nop,
        op1: Op1Src::Rs1,
        op2: Op2Src::Rs2,
        mem_op: MemOp::None,
        width: MemWidth::Word,
        signed: false,
        reg_write: false,
        branch: BranchKind::None,
        imm: ImmKind::I,
        halt: false,
    };

    /// Record produced for a halt encoding: no side effects besides the halt flag.
    pub const HALT: Self = Self {
        halt: true,
        ..Self::BUBBLE
    };
}

/// Coarse instruction category used for retirement statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InstClass {
    /// Register or immediate arithmetic, and unmapped encodings.
    #[default]
    Alu,
    /// Memory read.
    Load,
    /// Memory write.
    Store,
    /// Conditional branch or jump.
    Branch,
    /// Halt encoding.
    System,
}

impl ControlSignals {
    /// Category this record retires as.
    pub const fn class(&self) -> InstClass {
        if self.halt {
            return InstClass::System;
        }
        match (self.mem_op, self.branch) {
            (MemOp::Load, _) => InstClass::Load,
            (MemOp::Store, _) => InstClass::Store,
            (MemOp::None, BranchKind::None) => InstClass::Alu,
            (MemOp::None, _) => InstClass::Branch,
        }
    }
}
