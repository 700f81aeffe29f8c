//! MIPS General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) storage. It performs the following:
//! 1. **Storage:** Maintains 32 signed 32-bit integer registers (`R0`-`R31`).
//! 2. **Snapshots:** Copies the whole file out for per-cycle reports.
//!
//! `R0` is an ordinary register in this instruction subset; writes to it are kept.

use crate::common::constants::REGISTER_COUNT;

/// General-Purpose Register file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; REGISTER_COUNT],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; REGISTER_COUNT],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    pub const fn read(&self, idx: usize) -> i32 {
        self.regs[idx]
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: i32) {
        self.regs[idx] = val;
    }

    /// Returns a copy of every register value in index order.
    pub const fn values(&self) -> [i32; REGISTER_COUNT] {
        self.regs
    }
}
