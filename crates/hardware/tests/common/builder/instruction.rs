use mipssim_core::isa::opcodes::*;

/// Fluent encoder for one 32-bit program word.
///
/// Branch offsets and jump targets are given in bytes, exactly as the
/// disassembler prints them; the builder stores the word-scaled field.
pub struct InstructionBuilder {
    category: u32,
    opcode: u32,
    rs: u32,
    rt: u32,
    rd: u32,
    imm: u32,
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self {
            category: CAT_CONTROL,
            opcode: 0,
            rs: 0,
            rt: 0,
            rd: 0,
            imm: 0,
        }
    }

    pub fn category(mut self, category: u32) -> Self {
        self.category = category;
        self
    }

    pub fn opcode(mut self, op: u32) -> Self {
        self.opcode = op;
        self
    }

    pub fn rs(mut self, rs: u32) -> Self {
        self.rs = rs;
        self
    }

    pub fn rt(mut self, rt: u32) -> Self {
        self.rt = rt;
        self
    }

    pub fn rd(mut self, rd: u32) -> Self {
        self.rd = rd;
        self
    }

    pub fn imm(mut self, imm: u32) -> Self {
        self.imm = imm;
        self
    }

    // --- Register-register (category 110) ---
    //
    // Operands are given in printed order: `sub(4, 1, 5)` is `SUB R4, R1, R5`,
    // which computes `R5 - R1`.

    fn reg(self, op: u32, rd: u32, first: u32, second: u32) -> Self {
        self.category(CAT_REGISTER).opcode(op).rd(rd).rs(first).rt(second)
    }

    pub fn add(self, rd: u32, first: u32, second: u32) -> Self {
        self.reg(OP_ADD, rd, first, second)
    }

    pub fn sub(self, rd: u32, first: u32, second: u32) -> Self {
        self.reg(OP_SUB, rd, first, second)
    }

    pub fn mul(self, rd: u32, first: u32, second: u32) -> Self {
        self.reg(OP_MUL, rd, first, second)
    }

    pub fn and(self, rd: u32, first: u32, second: u32) -> Self {
        self.reg(OP_AND, rd, first, second)
    }

    pub fn or(self, rd: u32, first: u32, second: u32) -> Self {
        self.reg(OP_OR, rd, first, second)
    }

    pub fn xor(self, rd: u32, first: u32, second: u32) -> Self {
        self.reg(OP_XOR, rd, first, second)
    }

    pub fn nor(self, rd: u32, first: u32, second: u32) -> Self {
        self.reg(OP_NOR, rd, first, second)
    }

    // --- Register-immediate (category 111) ---

    fn imm_op(self, op: u32, rt: u32, rs: u32, imm: u32) -> Self {
        self.category(CAT_IMMEDIATE).opcode(op).rt(rt).rs(rs).imm(imm)
    }

    pub fn addi(self, rt: u32, rs: u32, imm: u32) -> Self {
        self.imm_op(OP_ADDI, rt, rs, imm)
    }

    pub fn andi(self, rt: u32, rs: u32, imm: u32) -> Self {
        self.imm_op(OP_ANDI, rt, rs, imm)
    }

    pub fn ori(self, rt: u32, rs: u32, imm: u32) -> Self {
        self.imm_op(OP_ORI, rt, rs, imm)
    }

    pub fn xori(self, rt: u32, rs: u32, imm: u32) -> Self {
        self.imm_op(OP_XORI, rt, rs, imm)
    }

    // --- Control and memory (category 000) ---

    pub fn j(self, target: u32) -> Self {
        self.category(CAT_CONTROL).opcode(OP_J).imm(target >> 2)
    }

    pub fn beq(self, rs: u32, rt: u32, offset: u32) -> Self {
        self.category(CAT_CONTROL)
            .opcode(OP_BEQ)
            .rs(rs)
            .rt(rt)
            .imm(offset >> 2)
    }

    pub fn bgtz(self, rs: u32, offset: u32) -> Self {
        self.category(CAT_CONTROL).opcode(OP_BGTZ).rs(rs).imm(offset >> 2)
    }

    pub fn brk(self) -> Self {
        self.category(CAT_CONTROL).opcode(OP_BREAK).imm(0x0D)
    }

    pub fn sw(self, rt: u32, offset: u32, base: u32) -> Self {
        self.category(CAT_CONTROL)
            .opcode(OP_SW)
            .rt(rt)
            .rs(base)
            .imm(offset)
    }

    pub fn lw(self, rt: u32, offset: u32, base: u32) -> Self {
        self.category(CAT_CONTROL)
            .opcode(OP_LW)
            .rt(rt)
            .rs(base)
            .imm(offset)
    }

    pub fn build(self) -> u32 {
        match self.category {
            CAT_REGISTER => {
                (CAT_REGISTER << 29)
                    | (self.rs & 0x1F) << 24
                    | (self.rt & 0x1F) << 19
                    | (self.opcode & 0x7) << 16
                    | (self.rd & 0x1F) << 11
            }
            CAT_IMMEDIATE => {
                (CAT_IMMEDIATE << 29)
                    | (self.rs & 0x1F) << 24
                    | (self.rt & 0x1F) << 19
                    | (self.opcode & 0x7) << 16
                    | (self.imm & 0xFFFF)
            }
            category if self.opcode == OP_J => {
                (category << 29) | (OP_J << 26) | (self.imm & 0x03FF_FFFF)
            }
            category => {
                (category << 29)
                    | (self.opcode & 0x7) << 26
                    | (self.rs & 0x1F) << 21
                    | (self.rt & 0x1F) << 16
                    | (self.imm & 0xFFFF)
            }
        }
    }
}

/// Renders program words and data values as loader input text.
pub fn program_text(words: &[u32], data: &[i32]) -> String {
    words
        .iter()
        .copied()
        .chain(data.iter().map(|&v| v as u32))
        .map(|w| format!("{w:032b}\n"))
        .collect()
}

/// Shorthand for `InstructionBuilder::new()`.
pub fn inst() -> InstructionBuilder {
    InstructionBuilder::new()
}
