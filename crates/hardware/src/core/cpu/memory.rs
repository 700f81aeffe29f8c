//! Data Memory Access Helpers.
//!
//! This module provides the data segment and the interface between the memory
//! stage and it. It performs the following:
//! 1. **Storage:** Holds the initialized data words loaded after `BREAK`.
//! 2. **Address Mapping:** Converts byte addresses into word indices relative to the data base.
//! 3. **Validation:** Rejects misaligned and out-of-range accesses as fatal errors.

use super::Cpu;
use crate::common::constants::WORD_SIZE;
use crate::common::error::SimError;

/// Word-addressed data segment starting right after the executable region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataMemory {
    base: u32,
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates a data segment holding `words`, the first one at byte address `base`.
    pub const fn new(base: u32, words: Vec<i32>) -> Self {
        Self { base, words }
    }

    /// Byte address of the first data word.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// One past the last byte address of the segment.
    pub fn end(&self) -> u32 {
        self.base
            .saturating_add((self.words.len() as u32).saturating_mul(WORD_SIZE))
    }

    /// All data words in address order.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Converts a byte address into a word index.
    fn index(&self, address: u32) -> Result<usize, SimError> {
        if address % WORD_SIZE != 0 {
            return Err(SimError::MisalignedDataAddress(address));
        }
        if address < self.base || address >= self.end() {
            return Err(SimError::DataAddressOutOfRange {
                address,
                base: self.base,
                end: self.end(),
            });
        }
        Ok(((address - self.base) / WORD_SIZE) as usize)
    }

    /// Reads the word at byte address `address`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is misaligned or outside the segment.
    pub fn load(&self, address: u32) -> Result<i32, SimError> {
        let idx = self.index(address)?;
        Ok(self.words[idx])
    }

    /// Writes `value` to byte address `address`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is misaligned or outside the segment.
    pub fn store(&mut self, address: u32, value: i32) -> Result<(), SimError> {
        let idx = self.index(address)?;
        self.words[idx] = value;
        Ok(())
    }
}

impl Cpu {
    /// Reads a data word for `LW`.
    ///
    /// # Arguments
    ///
    /// * `address` - Effective byte address computed by the ALU.
    ///
    /// # Errors
    ///
    /// Propagates misaligned and out-of-range accesses.
    pub fn load_word(&self, address: u32) -> Result<i32, SimError> {
        self.data.load(address)
    }

    /// Writes a data word for `SW`.
    ///
    /// # Arguments
    ///
    /// * `address` - Effective byte address computed by the ALU.
    /// * `value` - Register value being stored.
    ///
    /// # Errors
    ///
    /// Propagates misaligned and out-of-range accesses.
    pub fn store_word(&mut self, address: u32, value: i32) -> Result<(), SimError> {
        self.data.store(address, value)
    }
}
