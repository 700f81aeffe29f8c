//! Simulator error definitions.
//!
//! This module defines the error handling for the simulator. It distinguishes:
//! 1. **Input Errors:** Malformed program text and invalid configuration.
//! 2. **Fatal Pipeline Errors:** Internal invariant breaches (full-queue pushes, an
//!    instruction reaching a stage that cannot handle it, out-of-range data accesses).
//! 3. **Run Limits:** Programs that never reach `BREAK`.
//!
//! Hazards and structural backpressure are not errors; blocked instructions simply
//! remain in their queue until the next cycle.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::pipeline::queue::QueueKind;
use crate::isa::instruction::Instruction;

/// Errors produced while loading or simulating a program.
#[derive(Debug, Error)]
pub enum SimError {
    /// A program line is not a 32-character binary word.
    #[error("line {line}: expected a 32-bit binary word, found {text:?}")]
    InvalidWord {
        /// 1-based line number in the program text.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },

    /// A program word would lie past the end of the 32-bit address space.
    #[error("line {line}: program word at address {address} runs past the end of memory")]
    AddressOverflow {
        /// 1-based line number of the word that does not fit.
        line: usize,
        /// Address assigned to that word.
        address: u32,
    },

    /// The program text contains no words at all.
    #[error("program contains no instruction words")]
    EmptyProgram,

    /// A push was attempted on a queue that is already at capacity.
    #[error("push onto full {queue} queue (capacity {capacity})")]
    QueueOverflow {
        /// Queue that overflowed.
        queue: QueueKind,
        /// Capacity of that queue.
        capacity: usize,
    },

    /// An instruction reached a stage that has no handling for its class.
    #[error("{stage} stage received {mnemonic} at address {address}")]
    UnexpectedInstruction {
        /// Name of the stage that rejected the instruction.
        stage: &'static str,
        /// Program address of the instruction.
        address: u32,
        /// Disassembled form of the instruction.
        mnemonic: String,
    },

    /// An instruction reached a stage before an earlier stage computed its result.
    #[error("{stage} stage found no computed result for {mnemonic} at address {address}")]
    MissingResult {
        /// Name of the stage that needed the result.
        stage: &'static str,
        /// Program address of the instruction.
        address: u32,
        /// Disassembled form of the instruction.
        mnemonic: String,
    },

    /// A load or store addressed memory outside the data segment.
    #[error("data address {address} outside data segment [{base}, {end})")]
    DataAddressOutOfRange {
        /// Effective address computed by the instruction.
        address: u32,
        /// First address of the data segment.
        base: u32,
        /// One past the last address of the data segment.
        end: u32,
    },

    /// A load or store addressed memory that is not word aligned.
    #[error("data address {0} is not word aligned")]
    MisalignedDataAddress(u32),

    /// The run exceeded the configured cycle budget before `BREAK` resolved.
    #[error("simulation exceeded {0} cycles without reaching BREAK")]
    CycleLimitExceeded(u64),

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading the program or configuration failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SimError {
    /// Wraps an I/O error with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// An instruction of the wrong class reached `stage`.
    pub fn unexpected(stage: &'static str, inst: &Instruction) -> Self {
        Self::UnexpectedInstruction {
            stage,
            address: inst.address,
            mnemonic: inst.to_string(),
        }
    }

    /// `stage` needed a computed result that `inst` does not carry.
    pub fn missing_result(stage: &'static str, inst: &Instruction) -> Self {
        Self::MissingResult {
            stage,
            address: inst.address,
            mnemonic: inst.to_string(),
        }
    }
}
