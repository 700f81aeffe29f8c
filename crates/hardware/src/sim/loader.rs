//! Program Loader.
//!
//! This module turns program text into decoded records. It performs:
//! 1. **Parsing:** Reads one 32-character binary word per line, ignoring blank lines.
//! 2. **Segmentation:** Threads an explicit [`Mode`] through the load loop; every word
//!    after the first `BREAK` is a data word.
//! 3. **Addressing:** Assigns consecutive word addresses from the text base; the data
//!    segment starts right after the last executable word.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::common::constants::{WORD_BITS, WORD_SIZE};
use crate::common::error::SimError;
use crate::isa::decode::{decode, decode_data};
use crate::isa::instruction::{Instruction, Operation};

/// What the loader is currently reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Executable words, up to and including `BREAK`.
    #[default]
    Instructions,
    /// Raw data words following `BREAK`.
    Data,
}

/// A loaded program: executable records followed by data records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    text_base: u32,
    data_base: u32,
    instructions: Vec<Instruction>,
    data: Vec<Instruction>,
}

impl Program {
    /// Address of the first executable word.
    pub const fn text_base(&self) -> u32 {
        self.text_base
    }

    /// Address of the first data word (one past the last executable word).
    pub const fn data_base(&self) -> u32 {
        self.data_base
    }

    /// Executable records in address order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Data records in address order.
    pub fn data(&self) -> &[Instruction] {
        &self.data
    }

    /// Initial data memory contents.
    pub fn data_values(&self) -> Vec<i32> {
        self.data
            .iter()
            .map(|inst| match inst.op {
                Operation::Data(value) => value,
                _ => inst.raw as i32,
            })
            .collect()
    }

    /// Every record, executable then data, in address order.
    pub fn records(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter().chain(self.data.iter())
    }
}

/// Parses one trimmed line into a program word.
fn parse_word(line: usize, text: &str) -> Result<u32, SimError> {
    let invalid = || SimError::InvalidWord {
        line,
        text: text.to_string(),
    };
    if text.len() != WORD_BITS || !text.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(invalid());
    }
    u32::from_str_radix(text, 2).map_err(|_| invalid())
}

/// Parses program text into a [`Program`].
///
/// # Arguments
///
/// * `text` - One 32-bit binary word per line.
/// * `base` - Address of the first word.
///
/// # Errors
///
/// Returns [`SimError::InvalidWord`] for a malformed line,
/// [`SimError::AddressOverflow`] if a word would end past `u32::MAX`, and
/// [`SimError::EmptyProgram`] if the text holds no words.
pub fn parse_program(text: &str, base: u32) -> Result<Program, SimError> {
    let mut mode = Mode::Instructions;
    let mut address = base;
    let mut data_base = base;
    let mut instructions = Vec::new();
    let mut data = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let word = parse_word(idx + 1, line)?;
        let next = address
            .checked_add(WORD_SIZE)
            .ok_or(SimError::AddressOverflow {
                line: idx + 1,
                address,
            })?;

        match mode {
            Mode::Instructions => {
                let inst = decode(word, address);
                match inst.op {
                    Operation::Break => mode = Mode::Data,
                    Operation::Unknown => {
                        warn!(address, raw = word, "unknown instruction in executable region");
                    }
                    _ => {}
                }
                instructions.push(inst);
                data_base = next;
            }
            Mode::Data => data.push(decode_data(word, address)),
        }
        address = next;
    }

    if instructions.is_empty() {
        return Err(SimError::EmptyProgram);
    }
    debug!(
        instructions = instructions.len(),
        data = data.len(),
        "program loaded"
    );
    Ok(Program {
        text_base: base,
        data_base,
        instructions,
        data,
    })
}

/// Reads and parses a program file.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read, otherwise the errors of
/// [`parse_program`].
pub fn load_program(path: impl AsRef<Path>, base: u32) -> Result<Program, SimError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
    parse_program(&text, base)
}
