//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Fills pre-issue from the PC and resolves control transfers.
//! 2. **Issue:** Moves hazard-free instructions from pre-issue to pre-ALU.
//! 3. **Execute:** Computes ALU results and load/store addresses.
//! 4. **Memory:** Performs data loads and stores.
//! 5. **Writeback:** Commits results to the register file and releases reservations.
//!
//! The engine calls them in reverse order (writeback first) once per cycle.

/// ALU execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Instruction issue stage implementation.
pub mod issue;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Execute stage entry point (ALU stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Issue stage entry point.
pub use issue::issue_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
