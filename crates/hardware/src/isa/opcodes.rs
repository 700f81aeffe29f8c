//! MIPS Subset Category and Opcode Encodings.
//!
//! Defines the category selector (bits 31-29) and the per-category opcode
//! values recognised by the decoder.

/// Control transfer and memory instructions (J, BEQ, BGTZ, BREAK, SW, LW).
pub const CAT_CONTROL: u32 = 0b000;

/// Register-register arithmetic and logic (ADD, SUB, MUL, AND, OR, XOR, NOR).
pub const CAT_REGISTER: u32 = 0b110;

/// Register-immediate arithmetic and logic (ADDI, ANDI, ORI, XORI).
pub const CAT_IMMEDIATE: u32 = 0b111;

/// Unconditional absolute jump.
pub const OP_J: u32 = 0b000;

/// Branch if the two registers are equal.
pub const OP_BEQ: u32 = 0b010;

/// Branch if the register is strictly positive.
pub const OP_BGTZ: u32 = 0b100;

/// End of the executable region.
pub const OP_BREAK: u32 = 0b101;

/// Store word.
pub const OP_SW: u32 = 0b110;

/// Load word.
pub const OP_LW: u32 = 0b111;

/// Register-register add.
pub const OP_ADD: u32 = 0b000;

/// Register-register subtract.
pub const OP_SUB: u32 = 0b001;

/// Register-register multiply.
pub const OP_MUL: u32 = 0b010;

/// Register-register bitwise AND.
pub const OP_AND: u32 = 0b011;

/// Register-register bitwise OR.
pub const OP_OR: u32 = 0b100;

/// Register-register bitwise XOR.
pub const OP_XOR: u32 = 0b101;

/// Register-register bitwise NOR.
pub const OP_NOR: u32 = 0b110;

/// Add immediate.
pub const OP_ADDI: u32 = 0b000;

/// Bitwise AND with immediate.
pub const OP_ANDI: u32 = 0b001;

/// Bitwise OR with immediate.
pub const OP_ORI: u32 = 0b010;

/// Bitwise XOR with immediate.
pub const OP_XORI: u32 = 0b011;
