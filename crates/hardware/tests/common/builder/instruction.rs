use rv32pipe_core::isa::rv32i::{funct3, funct7, opcodes::*};

pub struct InstructionBuilder {
    opcode: u32,
    rd: u32,
    funct3: u32,
    rs1: u32,
    rs2: u32,
    funct7: u32,
    imm: i32,
}

impl Default for InstructionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self {
            opcode: 0,
            rd: 0,
            funct3: 0,
            rs1: 0,
            rs2: 0,
            funct7: 0,
            imm: 0,
        }
    }

    pub fn opcode(mut self, op: u32) -> Self {
        self.opcode = op;
        self
    }

    pub fn rd(mut self, rd: u32) -> Self {
        self.rd = rd;
        self
    }

    pub fn rs1(mut self, rs1: u32) -> Self {
        self.rs1 = rs1;
        self
    }

    pub fn rs2(mut self, rs2: u32) -> Self {
        self.rs2 = rs2;
        self
    }

    pub fn funct3(mut self, funct3: u32) -> Self {
        self.funct3 = funct3;
        self
    }

    pub fn funct7(mut self, funct7: u32) -> Self {
        self.funct7 = funct7;
        self
    }

    pub fn imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    fn reg(mut self, f3: u32, f7: u32, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.opcode = OP_REG;
        self.funct3 = f3;
        self.funct7 = f7;
        self.rd = rd;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self
    }

    fn itype(mut self, op: u32, f3: u32, rd: u32, rs1: u32, imm: i32) -> Self {
        self.opcode = op;
        self.funct3 = f3;
        self.rd = rd;
        self.rs1 = rs1;
        self.imm = imm;
        self
    }

    fn stype(mut self, f3: u32, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.opcode = OP_STORE;
        self.funct3 = f3;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.imm = imm;
        self
    }

    fn btype(mut self, f3: u32, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.opcode = OP_BRANCH;
        self.funct3 = f3;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.imm = imm;
        self
    }

    // --- Register-register ---

    pub fn add(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg(funct3::ADD_SUB, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn sub(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg(funct3::ADD_SUB, funct7::ALT, rd, rs1, rs2)
    }

    pub fn sll(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg(funct3::SLL, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn slt(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg(funct3::SLT, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn sltu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg(funct3::SLTU, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn xor(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg(funct3::XOR, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn srl(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg(funct3::SRL_SRA, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn sra(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg(funct3::SRL_SRA, funct7::ALT, rd, rs1, rs2)
    }

    pub fn or(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg(funct3::OR, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn and(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.reg(funct3::AND, funct7::DEFAULT, rd, rs1, rs2)
    }

    // --- Immediate arithmetic ---

    pub fn addi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_IMM, funct3::ADD_SUB, rd, rs1, imm)
    }

    pub fn slti(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_IMM, funct3::SLT, rd, rs1, imm)
    }

    pub fn sltiu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_IMM, funct3::SLTU, rd, rs1, imm)
    }

    pub fn xori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_IMM, funct3::XOR, rd, rs1, imm)
    }

    pub fn ori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_IMM, funct3::OR, rd, rs1, imm)
    }

    pub fn andi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_IMM, funct3::AND, rd, rs1, imm)
    }

    pub fn slli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.itype(OP_IMM, funct3::SLL, rd, rs1, (shamt & 0x1F) as i32)
            .funct7(funct7::DEFAULT)
    }

    pub fn srli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.itype(OP_IMM, funct3::SRL_SRA, rd, rs1, (shamt & 0x1F) as i32)
            .funct7(funct7::DEFAULT)
    }

    pub fn srai(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.itype(OP_IMM, funct3::SRL_SRA, rd, rs1, (shamt & 0x1F) as i32)
            .funct7(funct7::ALT)
    }

    // --- Memory ---

    pub fn lb(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_LOAD, funct3::LB, rd, rs1, imm)
    }

    pub fn lh(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_LOAD, funct3::LH, rd, rs1, imm)
    }

    pub fn lw(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_LOAD, funct3::LW, rd, rs1, imm)
    }

    pub fn lbu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_LOAD, funct3::LBU, rd, rs1, imm)
    }

    pub fn lhu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_LOAD, funct3::LHU, rd, rs1, imm)
    }

    pub fn sb(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.stype(funct3::SB, rs1, rs2, imm)
    }

    pub fn sh(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.stype(funct3::SH, rs1, rs2, imm)
    }

    pub fn sw(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.stype(funct3::SW, rs1, rs2, imm)
    }

    // --- Control flow ---

    pub fn beq(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.btype(funct3::BEQ, rs1, rs2, imm)
    }

    pub fn bne(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.btype(funct3::BNE, rs1, rs2, imm)
    }

    pub fn blt(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.btype(funct3::BLT, rs1, rs2, imm)
    }

    pub fn bge(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.btype(funct3::BGE, rs1, rs2, imm)
    }

    pub fn bltu(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.btype(funct3::BLTU, rs1, rs2, imm)
    }

    pub fn bgeu(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.btype(funct3::BGEU, rs1, rs2, imm)
    }

    pub fn jal(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_JAL;
        self.rd = rd;
        self.imm = imm;
        self
    }

    pub fn jalr(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.itype(OP_JALR, funct3::JALR, rd, rs1, imm)
    }

    /// `imm` is the 20-bit upper field, unshifted.
    pub fn lui(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_LUI;
        self.rd = rd;
        self.imm = imm;
        self
    }

    /// `imm` is the 20-bit upper field, unshifted.
    pub fn auipc(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_AUIPC;
        self.rd = rd;
        self.imm = imm;
        self
    }

    pub fn build(self) -> u32 {
        let imm = self.imm as u32;
        let rd = (self.rd & 0x1F) << 7;
        let rs1 = (self.rs1 & 0x1F) << 15;
        let rs2 = (self.rs2 & 0x1F) << 20;
        let f3 = (self.funct3 & 0x7) << 12;
        let f7 = (self.funct7 & 0x7F) << 25;

        match self.opcode {
            OP_REG => f7 | rs2 | rs1 | f3 | rd | self.opcode,
            OP_IMM if self.funct3 == funct3::SLL || self.funct3 == funct3::SRL_SRA => {
                f7 | ((imm & 0x1F) << 20) | rs1 | f3 | rd | self.opcode
            }
            OP_IMM | OP_LOAD | OP_JALR => ((imm & 0xFFF) << 20) | rs1 | f3 | rd | self.opcode,
            OP_STORE => {
                (((imm >> 5) & 0x7F) << 25) | rs2 | rs1 | f3 | ((imm & 0x1F) << 7) | self.opcode
            }
            OP_BRANCH => {
                let b12 = (imm >> 12) & 0x1;
                let b11 = (imm >> 11) & 0x1;
                let b10_5 = (imm >> 5) & 0x3F;
                let b4_1 = (imm >> 1) & 0xF;
                (b12 << 31) | (b10_5 << 25) | rs2 | rs1 | f3 | (b4_1 << 8) | (b11 << 7) | self.opcode
            }
            OP_LUI | OP_AUIPC => ((imm & 0xF_FFFF) << 12) | rd | self.opcode,
            OP_JAL => {
                let b20 = (imm >> 20) & 0x1;
                let b19_12 = (imm >> 12) & 0xFF;
                let b11 = (imm >> 11) & 0x1;
                let b10_1 = (imm >> 1) & 0x3FF;
                (b20 << 31) | (b10_1 << 21) | (b11 << 20) | (b19_12 << 12) | rd | self.opcode
            }
            _ => panic!("InstructionBuilder: unsupported opcode {:#09b}", self.opcode),
        }
    }
}
