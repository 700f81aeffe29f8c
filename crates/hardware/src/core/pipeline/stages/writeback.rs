//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline. It
//! commits at most one loaded value from post-MEM and at most one ALU result
//! from post-ALU into the register file each cycle, and releases the
//! destination reservation in the next-cycle table. The two lanes are
//! independent and may both commit in the same cycle.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::Pipeline;
use crate::isa::instruction::Instruction;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `pipe` - Mutable reference to the pipeline queues and reservations
///
/// # Errors
///
/// Fails if a record without a destination register or without a computed
/// result reaches writeback.
pub fn wb_stage(cpu: &mut Cpu, pipe: &mut Pipeline) -> Result<(), SimError> {
    if let Some(inst) = pipe.post_mem.pop() {
        commit(cpu, pipe, &inst)?;
    }
    if let Some(inst) = pipe.post_alu.pop() {
        commit(cpu, pipe, &inst)?;
    }
    Ok(())
}

fn commit(cpu: &mut Cpu, pipe: &mut Pipeline, inst: &Instruction) -> Result<(), SimError> {
    let dest = inst
        .destination_register()
        .ok_or_else(|| SimError::unexpected("writeback", inst))?;
    let value = inst
        .result
        .ok_or_else(|| SimError::missing_result("writeback", inst))?;

    cpu.regs.write(dest, value);
    pipe.scoreboard.release(dest, inst.address);
    cpu.stats.writebacks += 1;

    if cpu.trace {
        trace!(address = inst.address, "WB  {inst} # R{dest} <- {value}");
    }
    Ok(())
}
