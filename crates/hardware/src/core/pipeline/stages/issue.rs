//! Issue Stage.
//!
//! This module implements the issue stage of the instruction pipeline. Each
//! cycle it scans the pre-issue queue head to tail and moves up to
//! `issue_width` hazard-free instructions into the pre-ALU queue.
//!
//! # Rules
//!
//! - Nothing issues if pre-ALU was full at the last snapshot.
//! - A candidate is checked against the committed reservation table and every
//!   older instruction left waiting in pre-issue (see [`hazards::issue_hazard`]).
//! - A second candidate is also checked against the instructions issued
//!   earlier in the same cycle (see [`hazards::pair_hazard`]).
//! - An issued instruction reserves its destination in the next-cycle table.
//! - Blocked instructions stay in pre-issue, which is re-sorted by address.

use tracing::{debug, trace};

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::{Pipeline, hazards};
use crate::isa::instruction::Instruction;

/// Executes the issue stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `pipe` - Mutable reference to the pipeline queues and reservations
///
/// # Errors
///
/// Fails only if a queue push overflows, which the budget computation rules out.
pub fn issue_stage(cpu: &mut Cpu, pipe: &mut Pipeline) -> Result<(), SimError> {
    if pipe.pre_issue.is_empty() {
        return Ok(());
    }
    if pipe.pre_alu.was_full() {
        cpu.stats.issue_full_stalls += 1;
        debug!("issue stalled: Pre-ALU full");
        return Ok(());
    }

    let budget = pipe.issue_width.min(pipe.pre_alu.free_slots());
    let mut waiting: Vec<Instruction> = Vec::with_capacity(pipe.pre_issue.capacity());
    let mut issued: Vec<Instruction> = Vec::with_capacity(budget);

    for inst in pipe.pre_issue.take_all() {
        if issued.len() >= budget {
            waiting.push(inst);
            continue;
        }

        let hazard = hazards::issue_hazard(&inst, &waiting, &pipe.scoreboard)
            .or_else(|| issued.iter().find_map(|first| hazards::pair_hazard(first, &inst)));

        if let Some(hazard) = hazard {
            debug!(address = inst.address, %hazard, "issue blocked: {inst}");
            cpu.stats.record_hazard(hazard);
            waiting.push(inst);
            continue;
        }

        if let Some(dest) = inst.destination_register() {
            pipe.scoreboard.reserve(dest, inst.address);
        }
        issued.push(inst);
    }

    for inst in issued {
        if cpu.trace {
            trace!(address = inst.address, "IS  {inst}");
        }
        pipe.pre_alu.push(inst)?;
        cpu.stats.instructions_issued += 1;
    }
    for inst in waiting {
        pipe.pre_issue.push(inst)?;
    }
    pipe.pre_issue.sort_by_address();
    Ok(())
}
