//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the queue-coupled, dual-issue
//! pipeline. It includes the following components:
//! 1. **Queues:** Bounded FIFOs between stages with snapshot-latched fullness.
//! 2. **Scoreboard:** The register reservation table (committed and next copies).
//! 3. **Hazards:** Pure RAW/WAW/WAR/memory-order and branch-readiness checks.
//! 4. **Stages:** Fetch, Issue, ALU, MEM, and Writeback.
//! 5. **Engine:** The per-cycle snapshot and stage ordering.

/// Cycle orchestration and pipeline state.
pub mod engine;

/// Issue and branch hazard detection.
pub mod hazards;

/// Bounded inter-stage queues.
pub mod queue;

/// Register reservation table.
pub mod scoreboard;

/// Pipeline stage implementations (fetch, issue, execute, memory, writeback).
pub mod stages;

pub use engine::{FetchStatus, Pipeline, RunState};
