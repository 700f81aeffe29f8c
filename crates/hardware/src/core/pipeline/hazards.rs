//! Data and Ordering Hazard Detection.
//!
//! This module holds the pure decision functions consulted by issue and fetch.
//! It provides:
//! 1. **Issue Hazards:** RAW, WAW, WAR, and memory-ordering checks against the
//!    committed reservation table and the older instructions still waiting in
//!    the pre-issue queue.
//! 2. **Pairing:** The extra check between instructions issued in the same cycle.
//! 3. **Branch Readiness:** Whether a control transfer can read its source
//!    registers at fetch this cycle.
//!
//! None of these functions mutate state. A blocked instruction is not an error;
//! it stays where it is and is asked again next cycle.

use std::fmt;

use serde::Serialize;

use crate::core::pipeline::scoreboard::Scoreboard;
use crate::isa::instruction::Instruction;

/// Reason an instruction could not issue this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Hazard {
    /// A source register has an unfinished older writer.
    Raw,
    /// The destination register has an unfinished older writer.
    Waw,
    /// An older unissued instruction still reads the destination register.
    War,
    /// An older store has not issued yet.
    MemoryOrder,
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Raw => "RAW",
            Self::Waw => "WAW",
            Self::War => "WAR",
            Self::MemoryOrder => "memory order",
        })
    }
}

/// Checks whether `candidate` may move from pre-issue to pre-ALU this cycle.
///
/// `waiting` holds the instructions that remain in the pre-issue queue this
/// cycle (scanned but not issued); only those with a lower address than the
/// candidate are considered. `board` is the committed reservation table.
///
/// Checks run in a fixed order (memory order, WAW, RAW, WAR) and the first
/// hazard found is returned.
pub fn issue_hazard(
    candidate: &Instruction,
    waiting: &[Instruction],
    board: &Scoreboard,
) -> Option<Hazard> {
    let older = || waiting.iter().filter(|w| w.address < candidate.address);

    // Stores issue in order; loads wait for every older store to issue.
    if candidate.is_memory() && older().any(Instruction::is_store) {
        return Some(Hazard::MemoryOrder);
    }

    if let Some(dest) = candidate.destination_register() {
        if board.is_reserved(dest) || older().any(|w| w.writes(dest)) {
            return Some(Hazard::Waw);
        }
    }

    for src in candidate.source_registers() {
        if board.is_reserved(src) || older().any(|w| w.writes(src)) {
            return Some(Hazard::Raw);
        }
    }

    if let Some(dest) = candidate.destination_register() {
        if older().any(|w| w.reads(dest)) {
            return Some(Hazard::War);
        }
    }

    None
}

/// Checks `second` against `first` when both would issue in the same cycle.
pub fn pair_hazard(first: &Instruction, second: &Instruction) -> Option<Hazard> {
    let first_dest = first.destination_register();
    let second_dest = second.destination_register();

    if first_dest.is_some() && first_dest == second_dest {
        return Some(Hazard::Waw);
    }
    if first_dest.is_some_and(|dest| second.reads(dest)) {
        return Some(Hazard::Raw);
    }
    if second_dest.is_some_and(|dest| first.reads(dest)) {
        return Some(Hazard::War);
    }
    None
}

/// Returns `true` if a control transfer at fetch can read its sources now.
///
/// # Arguments
///
/// * `branch` - The control-transfer instruction at the program counter.
/// * `board` - The committed reservation table.
/// * `last_pre_issue` - Pre-issue contents captured at the last snapshot. These
///   may not have reserved their destinations yet.
/// * `bundle` - Instructions already fetched earlier in this cycle.
pub fn branch_ready(
    branch: &Instruction,
    board: &Scoreboard,
    last_pre_issue: &[Instruction],
    bundle: &[Instruction],
) -> bool {
    branch.source_registers().all(|src| {
        !board.is_reserved(src)
            && !last_pre_issue.iter().any(|inst| inst.writes(src))
            && !bundle.iter().any(|inst| inst.writes(src))
    })
}
