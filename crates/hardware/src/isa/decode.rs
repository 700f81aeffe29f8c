//! MIPS Subset Instruction Decoder.
//!
//! This module translates 32-bit program words into [`Instruction`] records. It
//! dispatches on the category selector (bits 31-29) and then on the category's
//! opcode field, extracting only the operands that opcode class defines.
//!
//! Decoding is a pure function of the word and its address: decoding the same
//! word twice yields identical records.

use crate::isa::instruction::{AluOp, ImmOp, Instruction, InstructionBits, Operation};
use crate::isa::opcodes;

/// Shift applied to branch offsets and jump targets (word to byte address).
const WORD_SHIFT: u32 = 2;

/// Decodes an executable program word.
///
/// Words whose category or opcode is not part of the instruction subset decode
/// to [`Operation::Unknown`].
///
/// # Arguments
///
/// * `word` - The raw 32-bit encoding.
/// * `address` - Program address of the word.
pub fn decode(word: u32, address: u32) -> Instruction {
    let op = match word.category() {
        opcodes::CAT_CONTROL => decode_control(word),
        opcodes::CAT_REGISTER => decode_register(word),
        opcodes::CAT_IMMEDIATE => decode_immediate(word),
        _ => Operation::Unknown,
    };
    Instruction::new(word, address, op)
}

/// Decodes a word from the data segment as a signed 32-bit value.
pub fn decode_data(word: u32, address: u32) -> Instruction {
    Instruction::new(word, address, Operation::Data(word as i32))
}

/// Category `000`: jumps, branches, `BREAK`, and memory operations.
fn decode_control(word: u32) -> Operation {
    let rs = word.rs();
    let rt = word.rt();
    match word.control_opcode() {
        opcodes::OP_J => Operation::Jump {
            target: word.target() << WORD_SHIFT,
        },
        opcodes::OP_BEQ => Operation::Beq {
            rs,
            rt,
            offset: word.imm16() << WORD_SHIFT,
        },
        opcodes::OP_BGTZ => Operation::Bgtz {
            rs,
            offset: word.imm16() << WORD_SHIFT,
        },
        opcodes::OP_BREAK => Operation::Break,
        opcodes::OP_SW => Operation::Store {
            base: rs,
            rt,
            offset: word.imm16(),
        },
        opcodes::OP_LW => Operation::Load {
            base: rs,
            rt,
            offset: word.imm16(),
        },
        _ => Operation::Unknown,
    }
}

/// Category `110`: register-register arithmetic.
///
/// The left operand is bits 23-19, so `SUB R4, R1, R5` computes `R5 - R1`.
fn decode_register(word: u32) -> Operation {
    let op = match word.arith_opcode() {
        opcodes::OP_ADD => AluOp::Add,
        opcodes::OP_SUB => AluOp::Sub,
        opcodes::OP_MUL => AluOp::Mul,
        opcodes::OP_AND => AluOp::And,
        opcodes::OP_OR => AluOp::Or,
        opcodes::OP_XOR => AluOp::Xor,
        opcodes::OP_NOR => AluOp::Nor,
        _ => return Operation::Unknown,
    };
    Operation::Alu {
        op,
        rd: word.rd(),
        rs: word.arith_rt(),
        rt: word.arith_rs(),
    }
}

/// Category `111`: register-immediate arithmetic.
fn decode_immediate(word: u32) -> Operation {
    let op = match word.arith_opcode() {
        opcodes::OP_ADDI => ImmOp::Addi,
        opcodes::OP_ANDI => ImmOp::Andi,
        opcodes::OP_ORI => ImmOp::Ori,
        opcodes::OP_XORI => ImmOp::Xori,
        _ => return Operation::Unknown,
    };
    Operation::AluImm {
        op,
        rt: word.arith_rt(),
        rs: word.arith_rs(),
        imm: word.imm8(),
    }
}
