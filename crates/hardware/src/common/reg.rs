//! Architectural Register File.
//!
//! This module provides the `RegisterFile` struct, the interface every pipeline stage
//! uses to read and commit general-purpose register values. It provides:
//! 1. **Storage:** The 32 architectural integer registers.
//! 2. **Abstraction:** A single set of methods for reading and writing register values.
//! 3. **Observability:** A snapshot accessor used by the per-cycle report.

use crate::core::arch::gpr::Gpr;

/// Architectural register file.
///
/// Thin wrapper over the general-purpose registers so stages never touch the raw
/// storage directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self { gpr: Gpr::new() }
    }

    /// Reads a value from a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    pub const fn read(&self, idx: usize) -> i32 {
        self.gpr.read(idx)
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: i32) {
        self.gpr.write(idx, val);
    }

    /// Returns a copy of all 32 register values, in index order.
    pub const fn snapshot(&self) -> [i32; 32] {
        self.gpr.values()
    }
}
