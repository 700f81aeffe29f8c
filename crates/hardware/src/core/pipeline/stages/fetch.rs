//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It
//! fetches up to `fetch_width` instructions in program order into the
//! pre-issue queue and resolves control transfers on the spot.
//!
//! # Control transfers
//!
//! `J`, `BEQ`, `BGTZ`, and `BREAK` never enter a queue. When one reaches the
//! program counter, fetch checks whether its source registers can be read:
//! - If they can, the outcome is computed immediately, the PC is updated, and
//!   fetch stops for the rest of the cycle.
//! - If they cannot, the instruction becomes the waiting branch and fetch
//!   stalls until a later cycle finds its sources ready.

use tracing::{debug, trace, warn};

use crate::common::constants::{JUMP_REGION_MASK, WORD_SIZE};
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::{Pipeline, hazards};
use crate::isa::instruction::{Instruction, Operation};

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `pipe` - Mutable reference to the pipeline queues and fetch status
///
/// # Behavior
///
/// - A waiting branch is re-checked every cycle; nothing else is fetched while it waits
/// - Otherwise nothing is fetched if pre-issue was full at the last snapshot
/// - Up to `min(fetch_width, latched free pre-issue slots)` words are consumed
/// - Unknown words are reported and skipped
///
/// # Errors
///
/// Fails if a pre-issue push overflows or a non-branch reaches branch resolution.
pub fn fetch_stage(cpu: &mut Cpu, pipe: &mut Pipeline) -> Result<(), SimError> {
    pipe.fetch.executed = None;
    if cpu.is_halted() {
        return Ok(());
    }

    if let Some(branch) = pipe.fetch.waiting {
        if hazards::branch_ready(&branch, &pipe.scoreboard, &pipe.last_pre_issue, &[]) {
            resolve(cpu, pipe, branch)?;
        } else {
            cpu.stats.branch_stall_cycles += 1;
            debug!(address = branch.address, "fetch stalled on {branch}");
        }
        return Ok(());
    }

    if pipe.pre_issue.was_full() {
        cpu.stats.fetch_full_stalls += 1;
        debug!("fetch stalled: Pre-Issue full");
        return Ok(());
    }

    let slots = pipe.fetch_width.min(pipe.pre_issue.latched_free_slots());
    let mut bundle: Vec<Instruction> = Vec::with_capacity(slots);

    for _ in 0..slots {
        let Some(inst) = cpu.instruction_at(cpu.pc) else {
            break;
        };

        if inst.is_control_transfer() {
            if hazards::branch_ready(&inst, &pipe.scoreboard, &pipe.last_pre_issue, &bundle) {
                resolve(cpu, pipe, inst)?;
            } else {
                debug!(address = inst.address, "branch waiting: {inst}");
                pipe.fetch.waiting = Some(inst);
            }
            break;
        }

        cpu.pc = cpu.pc.wrapping_add(WORD_SIZE);
        cpu.stats.instructions_fetched += 1;

        if inst.op == Operation::Unknown {
            warn!(address = inst.address, raw = inst.raw, "skipping unknown instruction");
            cpu.stats.unknown_skipped += 1;
            continue;
        }

        if cpu.trace {
            trace!(address = inst.address, "IF  {inst}");
        }
        pipe.pre_issue.push(inst)?;
        bundle.push(inst);
    }
    Ok(())
}

/// Computes a control transfer's outcome and redirects the PC.
fn resolve(cpu: &mut Cpu, pipe: &mut Pipeline, branch: Instruction) -> Result<(), SimError> {
    let next = branch.address.wrapping_add(WORD_SIZE);
    cpu.pc = match branch.op {
        Operation::Jump { target } => (next & JUMP_REGION_MASK) | target,
        Operation::Beq { rs, rt, offset } => {
            if cpu.regs.read(rs) == cpu.regs.read(rt) {
                next.wrapping_add(offset)
            } else {
                next
            }
        }
        Operation::Bgtz { rs, offset } => {
            if cpu.regs.read(rs) > 0 {
                next.wrapping_add(offset)
            } else {
                next
            }
        }
        Operation::Break => cpu.text_end(),
        _ => return Err(SimError::unexpected("fetch", &branch)),
    };

    debug!(address = branch.address, pc = cpu.pc, "resolved {branch}");
    pipe.fetch.waiting = None;
    pipe.fetch.executed = Some(branch);
    cpu.stats.instructions_fetched += 1;
    cpu.stats.branches_resolved += 1;
    Ok(())
}
