//! Memory Access (MEM) Stage.
//!
//! This module implements the memory stage of the instruction pipeline. Once
//! per cycle it takes the head of the pre-MEM queue, whose effective address
//! the ALU has already computed:
//! - `SW` writes its `rt` register to data memory and leaves the pipeline.
//! - `LW` reads data memory into the record's result and moves to post-MEM.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::Pipeline;
use crate::isa::instruction::Operation;

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `pipe` - Mutable reference to the pipeline queues
///
/// # Errors
///
/// Fails on a record without a computed address, a non-memory record, an
/// address outside the data segment, or a push onto a full post-MEM queue.
pub fn mem_stage(cpu: &mut Cpu, pipe: &mut Pipeline) -> Result<(), SimError> {
    let Some(mut inst) = pipe.pre_mem.pop() else {
        return Ok(());
    };
    let address = inst
        .result
        .ok_or_else(|| SimError::missing_result("memory", &inst))? as u32;

    match inst.op {
        Operation::Store { rt, .. } => {
            let value = cpu.regs.read(rt);
            cpu.store_word(address, value)?;
            cpu.stats.stores_retired += 1;
            if cpu.trace {
                trace!(address = inst.address, "MEM {inst} # [{address}] <- {value}");
            }
        }
        Operation::Load { .. } => {
            let value = cpu.load_word(address)?;
            inst.result = Some(value);
            if cpu.trace {
                trace!(address = inst.address, "MEM {inst} # {value} <- [{address}]");
            }
            pipe.post_mem.push(inst)?;
        }
        _ => return Err(SimError::unexpected("memory", &inst)),
    }

    cpu.stats.memory_accesses += 1;
    Ok(())
}
