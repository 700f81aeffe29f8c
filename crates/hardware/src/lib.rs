//! MIPS pipeline simulator library.
//!
//! This crate implements a cycle-accurate simulator of a dual-issue, queue-coupled
//! MIPS subset pipeline with the following:
//! 1. **Core:** Bounded inter-stage queues, the register reservation table, hazard
//!    detection, and the Fetch/Issue/ALU/MEM/Writeback stages.
//! 2. **ISA:** Decoding and disassembly of the 16-opcode subset plus data words.
//! 3. **Simulation:** Program loader, per-cycle report, configuration, and statistics.
//!
//! # Example
//!
//! ```
//! use mipssim_core::{Config, Simulator, sim::parse_program};
//!
//! let text = "\
//! 11100000000010000000000000000101
//! 00010100000000000000000000001101
//! ";
//! let program = parse_program(text, 128).unwrap();
//! let mut sim = Simulator::new(&program, &Config::default());
//! let cycles = sim.run().unwrap();
//! assert_eq!(cycles, 1);
//! ```

/// Common types and constants (errors, registers, addressing).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (architectural state and pipeline).
pub mod core;
/// Instruction set (opcodes, decode, instruction record, disassembly).
pub mod isa;
/// Program loader, per-cycle report, and simulator façade.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Error type for every fallible operation in the crate.
pub use crate::common::SimError;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Architectural state holder.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
