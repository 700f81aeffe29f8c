//! Core processor implementation.
//!
//! This module contains the architectural state of the processor and the
//! queue-coupled pipeline that drives it one clock cycle at a time.

/// Architecture-specific components (register storage).
pub mod arch;

/// CPU architectural state (program counter, registers, memories).
pub mod cpu;

/// Instruction pipeline implementation (queues, reservations, hazards, stages).
pub mod pipeline;

pub use self::cpu::Cpu;
