//! Per-cycle simulation report.
//!
//! A [`CycleReport`] is captured from simulator state after each cycle's stages
//! have run. It renders as text through `Display` and as JSON through
//! `serde::Serialize`.

use std::fmt;

use serde::Serialize;

use crate::common::constants::{DATA_WORDS_PER_ROW, REGISTERS_PER_ROW, WORD_SIZE};
use crate::core::Cpu;
use crate::core::pipeline::Pipeline;
use crate::core::pipeline::queue::{BoundedQueue, QueueKind};

const SEPARATOR: &str = "--------------------";

/// Contents of one bounded queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueReport {
    /// Which queue this is.
    pub kind: QueueKind,
    /// Queue capacity; the text layout prints one slot per unit.
    pub capacity: usize,
    /// Disassembled entries, head first.
    pub entries: Vec<String>,
}

impl QueueReport {
    fn capture(queue: &BoundedQueue) -> Self {
        Self {
            kind: queue.kind(),
            capacity: queue.capacity(),
            entries: queue.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Snapshot of the machine after one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Control transfer waiting at fetch.
    pub waiting: Option<String>,
    /// Control transfer resolved at fetch this cycle.
    pub executed: Option<String>,
    /// Queues in report order.
    pub queues: Vec<QueueReport>,
    /// All 32 registers in index order.
    pub registers: Vec<i32>,
    /// Address of the first data word.
    pub data_base: u32,
    /// Data memory in address order.
    pub data: Vec<i32>,
}

impl CycleReport {
    /// Captures the report for `cycle` from the current state.
    pub fn capture(cycle: u64, cpu: &Cpu, pipe: &Pipeline) -> Self {
        Self {
            cycle,
            waiting: pipe.fetch.waiting.map(|inst| inst.to_string()),
            executed: pipe.fetch.executed.map(|inst| inst.to_string()),
            queues: QueueKind::ALL
                .iter()
                .map(|&kind| QueueReport::capture(pipe.queue(kind)))
                .collect(),
            registers: cpu.regs.snapshot().to_vec(),
            data_base: cpu.data.base(),
            data: cpu.data.words().to_vec(),
        }
    }
}

fn bracketed(entry: Option<&String>) -> String {
    entry.map(|text| format!("[{text}]")).unwrap_or_default()
}

fn write_row(f: &mut fmt::Formatter<'_>, label: &str, values: &[i32]) -> fmt::Result {
    write!(f, "{label}:")?;
    for value in values {
        write!(f, "\t{value}")?;
    }
    writeln!(f)
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "Cycle {}:", self.cycle)?;
        writeln!(f)?;
        writeln!(f, "IF Unit:")?;
        writeln!(f, "\tWaiting Instruction: {}", bracketed(self.waiting.as_ref()))?;
        writeln!(f, "\tExecuted Instruction: {}", bracketed(self.executed.as_ref()))?;

        for queue in &self.queues {
            if queue.capacity == 1 {
                writeln!(f, "{} Queue: {}", queue.kind, bracketed(queue.entries.first()))?;
                continue;
            }
            writeln!(f, "{} Queue:", queue.kind)?;
            for slot in 0..queue.capacity {
                writeln!(f, "\tEntry {slot}: {}", bracketed(queue.entries.get(slot)))?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Registers")?;
        for (row, values) in self.registers.chunks(REGISTERS_PER_ROW).enumerate() {
            write_row(f, &format!("R{:02}", row * REGISTERS_PER_ROW), values)?;
        }
        writeln!(f)?;

        writeln!(f, "Data")?;
        let row_bytes = DATA_WORDS_PER_ROW as u32 * WORD_SIZE;
        for (row, values) in self.data.chunks(DATA_WORDS_PER_ROW).enumerate() {
            let address = self.data_base + row as u32 * row_bytes;
            write_row(f, &address.to_string(), values)?;
        }
        Ok(())
    }
}
