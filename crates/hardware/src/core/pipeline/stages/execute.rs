//! ALU Execute Stage.
//!
//! This module implements the ALU stage of the instruction pipeline. Once per
//! cycle it removes the head of the pre-ALU queue, strictly in order, and:
//! 1. **Arithmetic:** Computes register-register and register-immediate results
//!    and forwards the record to post-ALU.
//! 2. **Address Generation:** Computes `R[base] + offset` for `SW`/`LW` and
//!    forwards the record to pre-MEM.
//!
//! Issue has already cleared every hazard, so no checks are repeated here.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::Pipeline;
use crate::isa::instruction::Operation;

/// Executes the ALU stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `pipe` - Mutable reference to the pipeline queues
///
/// # Errors
///
/// Fails if a record that is neither arithmetic nor memory reaches the ALU, or
/// if the target queue is already full.
pub fn execute_stage(cpu: &mut Cpu, pipe: &mut Pipeline) -> Result<(), SimError> {
    let Some(mut inst) = pipe.pre_alu.pop() else {
        return Ok(());
    };

    match inst.op {
        Operation::Alu { op, rs, rt, .. } => {
            inst.result = Some(op.apply(cpu.regs.read(rs), cpu.regs.read(rt)));
        }
        Operation::AluImm { op, rs, imm, .. } => {
            inst.result = Some(op.apply(cpu.regs.read(rs), imm));
        }
        Operation::Store { base, offset, .. } | Operation::Load { base, offset, .. } => {
            let address = (cpu.regs.read(base) as u32).wrapping_add(offset);
            inst.result = Some(address as i32);
        }
        _ => return Err(SimError::unexpected("ALU", &inst)),
    }

    cpu.stats.alu_ops += 1;
    if cpu.trace {
        trace!(address = inst.address, "EX  {inst} # result={:?}", inst.result);
    }

    if inst.is_memory() {
        pipe.pre_mem.push(inst)
    } else {
        pipe.post_alu.push(inst)
    }
}
