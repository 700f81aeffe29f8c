//! Simulation driver, program loading, and reporting.
//!
//! Provides the program loader, the per-cycle report, and the [`Simulator`]
//! façade that ties the CPU state and the pipeline together.

/// Program text parsing and segmentation.
pub mod loader;

/// Per-cycle report captured after every cycle.
pub mod report;

/// Top-level simulator owning CPU and pipeline.
pub mod simulator;

pub use loader::{Mode, Program, load_program, parse_program};
pub use report::CycleReport;
pub use simulator::Simulator;
