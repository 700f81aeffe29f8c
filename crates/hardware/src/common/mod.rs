//! Common utilities and types used throughout the MIPS pipeline simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Architectural constants for addressing, word size, and register count.
//! 2. **Error Handling:** The `SimError` type covering load, configuration, and fatal pipeline errors.
//! 3. **Register Management:** The architectural register file consulted by every stage.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for loading, configuration, and fatal pipeline faults.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{BASE_ADDRESS, REGISTER_COUNT, WORD_SIZE};
pub use error::SimError;
pub use reg::RegisterFile;
