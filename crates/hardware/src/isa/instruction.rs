//! Instruction encoding and the decoded instruction record.
//!
//! Provides bit extraction for the three instruction categories and the
//! [`Instruction`] record that flows through the pipeline queues. Operands are
//! carried by a per-class [`Operation`] payload, so a stage can only read the
//! fields its opcode class actually defines.

use std::fmt;

/// Bit mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for a 3-bit category or opcode field.
pub const FIELD3_MASK: u32 = 0x7;
/// Bit mask for the 16-bit immediate/offset field (bits 15-0).
pub const IMM16_MASK: u32 = 0xFFFF;
/// Bit mask for the 8-bit arithmetic immediate (bits 7-0).
pub const IMM8_MASK: u32 = 0xFF;
/// Bit mask for the 26-bit jump target field (bits 25-0).
pub const TARGET_MASK: u32 = 0x03FF_FFFF;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the category selector (bits 31-29).
    fn category(&self) -> u32;

    /// Extracts the control/memory opcode (bits 28-26).
    fn control_opcode(&self) -> u32;

    /// Extracts the arithmetic opcode of categories `110`/`111` (bits 18-16).
    fn arith_opcode(&self) -> u32;

    /// Extracts `rs` of a control/memory instruction (bits 25-21).
    fn rs(&self) -> usize;

    /// Extracts `rt` of a control/memory instruction (bits 20-16).
    fn rt(&self) -> usize;

    /// Extracts `rs` of an arithmetic instruction (bits 28-24).
    fn arith_rs(&self) -> usize;

    /// Extracts `rt` of an arithmetic instruction (bits 23-19).
    fn arith_rt(&self) -> usize;

    /// Extracts `rd` of a register-register instruction (bits 15-11).
    fn rd(&self) -> usize;

    /// Extracts the unsigned 16-bit branch/memory offset (bits 15-0).
    fn imm16(&self) -> u32;

    /// Extracts the unsigned 8-bit arithmetic immediate (bits 7-0).
    fn imm8(&self) -> u32;

    /// Extracts the 26-bit jump target field (bits 25-0).
    fn target(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn category(&self) -> u32 {
        (self >> 29) & FIELD3_MASK
    }

    #[inline(always)]
    fn control_opcode(&self) -> u32 {
        (self >> 26) & FIELD3_MASK
    }

    #[inline(always)]
    fn arith_opcode(&self) -> u32 {
        (self >> 16) & FIELD3_MASK
    }

    #[inline(always)]
    fn rs(&self) -> usize {
        ((self >> 21) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rt(&self) -> usize {
        ((self >> 16) & REG_MASK) as usize
    }

    #[inline(always)]
    fn arith_rs(&self) -> usize {
        ((self >> 24) & REG_MASK) as usize
    }

    #[inline(always)]
    fn arith_rt(&self) -> usize {
        ((self >> 19) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 11) & REG_MASK) as usize
    }

    #[inline(always)]
    fn imm16(&self) -> u32 {
        self & IMM16_MASK
    }

    #[inline(always)]
    fn imm8(&self) -> u32 {
        self & IMM8_MASK
    }

    #[inline(always)]
    fn target(&self) -> u32 {
        self & TARGET_MASK
    }
}

/// Opcode class of a program word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Register-register add.
    Add,
    /// Register-register subtract.
    Sub,
    /// Register-register multiply.
    Mul,
    /// Register-register AND.
    And,
    /// Register-register OR.
    Or,
    /// Register-register XOR.
    Xor,
    /// Register-register NOR.
    Nor,
    /// Add immediate.
    Addi,
    /// AND immediate.
    Andi,
    /// OR immediate.
    Ori,
    /// XOR immediate.
    Xori,
    /// Absolute jump.
    J,
    /// Branch on equal.
    Beq,
    /// Branch on greater than zero.
    Bgtz,
    /// Store word.
    Sw,
    /// Load word.
    Lw,
    /// End of the executable region.
    Break,
    /// Raw data word (not executable).
    Data,
    /// Undecodable word.
    Unknown,
}

impl Opcode {
    /// Upper-case assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Nor => "NOR",
            Self::Addi => "ADDI",
            Self::Andi => "ANDI",
            Self::Ori => "ORI",
            Self::Xori => "XORI",
            Self::J => "J",
            Self::Beq => "BEQ",
            Self::Bgtz => "BGTZ",
            Self::Sw => "SW",
            Self::Lw => "LW",
            Self::Break => "BREAK",
            Self::Data => "DATA",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Register-register ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Wrapping multiplication (low 32 bits).
    Mul,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Bitwise NOR.
    Nor,
}

impl AluOp {
    /// Computes `a op b`.
    pub const fn apply(self, a: i32, b: i32) -> i32 {
        match self {
            Self::Add => a.wrapping_add(b),
            Self::Sub => a.wrapping_sub(b),
            Self::Mul => a.wrapping_mul(b),
            Self::And => a & b,
            Self::Or => a | b,
            Self::Xor => a ^ b,
            Self::Nor => !(a | b),
        }
    }

    /// Opcode class of this operation.
    pub const fn opcode(self) -> Opcode {
        match self {
            Self::Add => Opcode::Add,
            Self::Sub => Opcode::Sub,
            Self::Mul => Opcode::Mul,
            Self::And => Opcode::And,
            Self::Or => Opcode::Or,
            Self::Xor => Opcode::Xor,
            Self::Nor => Opcode::Nor,
        }
    }
}

/// Register-immediate ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImmOp {
    /// Wrapping addition of the immediate.
    Addi,
    /// Bitwise AND with the immediate.
    Andi,
    /// Bitwise OR with the immediate.
    Ori,
    /// Bitwise XOR with the immediate.
    Xori,
}

impl ImmOp {
    /// Computes `a op imm`, with `imm` zero-extended.
    pub const fn apply(self, a: i32, imm: u32) -> i32 {
        let imm = imm as i32;
        match self {
            Self::Addi => a.wrapping_add(imm),
            Self::Andi => a & imm,
            Self::Ori => a | imm,
            Self::Xori => a ^ imm,
        }
    }

    /// Opcode class of this operation.
    pub const fn opcode(self) -> Opcode {
        match self {
            Self::Addi => Opcode::Addi,
            Self::Andi => Opcode::Andi,
            Self::Ori => Opcode::Ori,
            Self::Xori => Opcode::Xori,
        }
    }
}

/// Decoded operands, one variant per opcode class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `rd = rs op rt`, printed as `rd, rt, rs`.
    Alu {
        /// Operation to apply.
        op: AluOp,
        /// Destination register.
        rd: usize,
        /// Left operand (bits 23-19, printed last).
        rs: usize,
        /// Right operand (bits 28-24, printed second).
        rt: usize,
    },
    /// `rt = rs op imm`. The destination is the field printed first.
    AluImm {
        /// Operation to apply.
        op: ImmOp,
        /// Destination register.
        rt: usize,
        /// Source register.
        rs: usize,
        /// Zero-extended 8-bit immediate.
        imm: u32,
    },
    /// Absolute jump; `target` is the 26-bit field already shifted left by 2.
    Jump {
        /// Low 28 bits of the destination address.
        target: u32,
    },
    /// Branch to `pc + 4 + offset` when `R[rs] == R[rt]`.
    Beq {
        /// First compared register.
        rs: usize,
        /// Second compared register.
        rt: usize,
        /// Byte offset (16-bit field shifted left by 2, unsigned).
        offset: u32,
    },
    /// Branch to `pc + 4 + offset` when `R[rs] > 0`.
    Bgtz {
        /// Tested register.
        rs: usize,
        /// Byte offset (16-bit field shifted left by 2, unsigned).
        offset: u32,
    },
    /// `MEM[R[base] + offset] = R[rt]`.
    Store {
        /// Base address register.
        base: usize,
        /// Register whose value is stored.
        rt: usize,
        /// Unsigned byte offset.
        offset: u32,
    },
    /// `R[rt] = MEM[R[base] + offset]`.
    Load {
        /// Base address register.
        base: usize,
        /// Destination register.
        rt: usize,
        /// Unsigned byte offset.
        offset: u32,
    },
    /// End of the executable region.
    Break,
    /// Raw data word.
    Data(i32),
    /// Undecodable word.
    Unknown,
}

/// One decoded program word.
///
/// Records are produced once at load time. The pipeline moves copies of them
/// between queues; `result` is the only field written after decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Raw 32-bit encoding.
    pub raw: u32,
    /// Word-aligned program address; unique per record.
    pub address: u32,
    /// Decoded operands.
    pub op: Operation,
    /// Value computed by ALU or MEM execute, consumed by writeback.
    pub result: Option<i32>,
}

impl Instruction {
    /// Creates a record with no computed result.
    pub const fn new(raw: u32, address: u32, op: Operation) -> Self {
        Self {
            raw,
            address,
            op,
            result: None,
        }
    }

    /// Opcode class of this record.
    pub const fn opcode(&self) -> Opcode {
        match self.op {
            Operation::Alu { op, .. } => op.opcode(),
            Operation::AluImm { op, .. } => op.opcode(),
            Operation::Jump { .. } => Opcode::J,
            Operation::Beq { .. } => Opcode::Beq,
            Operation::Bgtz { .. } => Opcode::Bgtz,
            Operation::Store { .. } => Opcode::Sw,
            Operation::Load { .. } => Opcode::Lw,
            Operation::Break => Opcode::Break,
            Operation::Data(_) => Opcode::Data,
            Operation::Unknown => Opcode::Unknown,
        }
    }

    /// Register this instruction eventually writes, if any.
    pub const fn destination_register(&self) -> Option<usize> {
        match self.op {
            Operation::Alu { rd, .. } => Some(rd),
            Operation::AluImm { rt, .. } | Operation::Load { rt, .. } => Some(rt),
            _ => None,
        }
    }

    /// Registers this instruction reads (zero, one, or two).
    pub fn source_registers(&self) -> impl Iterator<Item = usize> + use<> {
        let pair = match self.op {
            Operation::Alu { rs, rt, .. }
            | Operation::Beq { rs, rt, .. }
            | Operation::Store { base: rs, rt, .. } => [Some(rs), Some(rt)],
            Operation::AluImm { rs, .. }
            | Operation::Bgtz { rs, .. }
            | Operation::Load { base: rs, .. } => [Some(rs), None],
            _ => [None, None],
        };
        pair.into_iter().flatten()
    }

    /// Returns `true` if `reg` is one of this instruction's sources.
    pub fn reads(&self, reg: usize) -> bool {
        self.source_registers().any(|src| src == reg)
    }

    /// Returns `true` if `reg` is this instruction's destination.
    pub fn writes(&self, reg: usize) -> bool {
        self.destination_register() == Some(reg)
    }

    /// Control transfer instructions resolve in fetch and never enter a queue.
    pub const fn is_control_transfer(&self) -> bool {
        matches!(
            self.op,
            Operation::Jump { .. } | Operation::Beq { .. } | Operation::Bgtz { .. } | Operation::Break
        )
    }

    /// Returns `true` for `SW`.
    pub const fn is_store(&self) -> bool {
        matches!(self.op, Operation::Store { .. })
    }

    /// Returns `true` for `LW`.
    pub const fn is_load(&self) -> bool {
        matches!(self.op, Operation::Load { .. })
    }

    /// Returns `true` for `SW` and `LW`.
    pub const fn is_memory(&self) -> bool {
        self.is_store() || self.is_load()
    }
}
