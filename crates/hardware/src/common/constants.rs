//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Addressing Constants:** Program base address and word size.
//! 2. **Register Constants:** Architectural register count.
//! 3. **Report Constants:** Layout parameters for data memory dumps.

/// Address of the first program word (0x80).
pub const BASE_ADDRESS: u32 = 0x0000_0080;

/// Size of one instruction or data word in bytes.
pub const WORD_SIZE: u32 = 4;

/// Number of architectural general-purpose registers.
pub const REGISTER_COUNT: usize = 32;

/// Number of characters in one textual program word.
pub const WORD_BITS: usize = 32;

/// Mask selecting the region bits preserved by an absolute jump.
pub const JUMP_REGION_MASK: u32 = 0xF000_0000;

/// Number of data words printed per row of a memory dump.
pub const DATA_WORDS_PER_ROW: usize = 8;

/// Number of registers printed per row of a register dump.
pub const REGISTERS_PER_ROW: usize = 8;
