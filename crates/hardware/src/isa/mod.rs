//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the encodings, the decoded instruction record, the decoder, and the
//! disassembler for the MIPS subset executed by the pipeline.
//!
//! # Instruction categories
//!
//! * `000`: jumps, branches, `BREAK`, and `SW`/`LW`.
//! * `110`: register-register arithmetic and logic.
//! * `111`: register-immediate arithmetic and logic.

/// Instruction decoding logic for all three categories.
pub mod decode;

/// Instruction disassembler for listings, reports, and diagnostics.
pub mod disasm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Category and opcode field values.
pub mod opcodes;
