//! Instruction Disassembler for the MIPS subset.
//!
//! Converts a decoded [`Instruction`] into its assembler text for the
//! disassembly listing, the per-cycle report, trace logs, and error
//! diagnostics.
//!
//! # Usage
//!
//! ```
//! use mipssim_core::isa::{decode::decode, disasm::disassemble};
//! let inst = decode(0xC020_1000, 128);
//! assert_eq!(disassemble(&inst), "ADD R2, R0, R4");
//! ```

use std::fmt;

use crate::isa::instruction::{Instruction, Operation};

/// Disassembles a decoded instruction into a human-readable string.
///
/// Returns text such as `"ADD R1, R2, R3"`, `"SW R1, 4(R2)"`, the signed value
/// of a data word, or `"UNKNOWN"` for unrecognised encodings.
pub fn disassemble(inst: &Instruction) -> String {
    let name = inst.opcode();
    match inst.op {
        Operation::Alu { rd, rs, rt, .. } => format!("{name} R{rd}, R{rt}, R{rs}"),
        Operation::AluImm { rt, rs, imm, .. } => format!("{name} R{rt}, R{rs}, #{imm}"),
        Operation::Jump { target } => format!("{name} #{target}"),
        Operation::Beq { rs, rt, offset } => format!("{name} R{rs}, R{rt}, #{offset}"),
        Operation::Bgtz { rs, offset } => format!("{name} R{rs}, #{offset}"),
        Operation::Store { base, rt, offset } | Operation::Load { base, rt, offset } => {
            format!("{name} R{rt}, {offset}(R{base})")
        }
        Operation::Break | Operation::Unknown => name.to_string(),
        Operation::Data(value) => value.to_string(),
    }
}

/// Renders one line of the disassembly listing:
/// `<32-bit pattern>\t<address>\t<text>`.
pub fn listing_line(inst: &Instruction) -> String {
    format!("{:032b}\t{}\t{}", inst.raw, inst.address, disassemble(inst))
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&disassemble(self))
    }
}
