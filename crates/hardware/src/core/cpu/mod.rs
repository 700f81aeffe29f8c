//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! architectural state the pipeline stages read and write. It coordinates the following:
//! 1. **State Management:** Maintains the register file and the program counter.
//! 2. **Program Storage:** Holds the read-only executable records indexed by address.
//! 3. **Data Memory:** Owns the mutable data segment accessed by `LW`/`SW`.
//! 4. **Accounting:** Carries the statistics counters updated by every stage.

/// Data memory access and load/store helpers.
pub mod memory;

use crate::common::RegisterFile;
use crate::common::constants::WORD_SIZE;
use crate::config::Config;
use crate::isa::instruction::Instruction;
use crate::sim::loader::Program;
use crate::stats::SimStats;

pub use self::memory::DataMemory;

/// Main CPU structure containing all architectural state.
///
/// Pipeline bookkeeping (queues, reservations, fetch status) lives in
/// [`Pipeline`](crate::core::pipeline::Pipeline); everything here is visible
/// to the program itself.
#[derive(Debug, Clone)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Program Counter (byte address of the next fetch).
    pub pc: u32,
    /// Data segment.
    pub data: DataMemory,
    /// Executable records in address order.
    pub program: Vec<Instruction>,
    /// Address of the first executable record.
    pub text_base: u32,
    /// Emit a `trace!` event for every instruction movement.
    pub trace: bool,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a new CPU with the program loaded and the PC at its first word.
    ///
    /// # Arguments
    ///
    /// * `program` - The loaded program (executable and data records).
    /// * `config` - The simulator configuration parameters.
    pub fn new(program: &Program, config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: program.text_base(),
            data: DataMemory::new(program.data_base(), program.data_values()),
            program: program.instructions().to_vec(),
            text_base: program.text_base(),
            trace: config.general.trace_instructions,
            stats: SimStats::default(),
        }
    }

    /// One past the last executable address; also the data base.
    pub const fn text_end(&self) -> u32 {
        self.data.base()
    }

    /// Executable record at byte address `pc`, if `pc` is inside the executable region.
    pub fn instruction_at(&self, pc: u32) -> Option<Instruction> {
        if pc < self.text_base || pc % WORD_SIZE != 0 {
            return None;
        }
        let idx = ((pc - self.text_base) / WORD_SIZE) as usize;
        self.program.get(idx).copied()
    }

    /// Returns `true` once the PC has left the executable region.
    pub fn is_halted(&self) -> bool {
        self.instruction_at(self.pc).is_none()
    }
}
