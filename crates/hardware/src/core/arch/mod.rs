//! Architectural storage components.
//!
//! This module contains the general-purpose register storage backing the
//! [`RegisterFile`](crate::common::RegisterFile).

/// General-Purpose Register file implementation.
pub mod gpr;
