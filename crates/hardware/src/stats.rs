//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Throughput:** Total cycles, issued and written-back instructions, and IPC.
//! 2. **Stage activity:** Fetch, branch resolution, ALU, and memory counts.
//! 3. **Stalls:** Fetch cycles lost to a waiting branch or a full pre-issue queue,
//!    and issue cycles lost to a full pre-ALU queue.
//! 4. **Hazards:** Issue blocks by hazard kind.

use std::fmt;

use serde::Serialize;

use crate::core::pipeline::hazards::Hazard;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Words consumed by fetch, including resolved control transfers.
    pub instructions_fetched: u64,
    /// Control transfers resolved at fetch.
    pub branches_resolved: u64,
    /// Unknown words skipped by fetch.
    pub unknown_skipped: u64,
    /// Instructions moved from pre-issue to pre-ALU.
    pub instructions_issued: u64,
    /// Instructions executed by the ALU stage.
    pub alu_ops: u64,
    /// Loads and stores performed by the memory stage.
    pub memory_accesses: u64,
    /// Stores that completed in the memory stage.
    pub stores_retired: u64,
    /// Results committed to the register file.
    pub writebacks: u64,

    /// Cycles fetch spent behind a waiting control transfer.
    pub branch_stall_cycles: u64,
    /// Cycles fetch was blocked by a full pre-issue queue.
    pub fetch_full_stalls: u64,
    /// Cycles issue was blocked by a full pre-ALU queue.
    pub issue_full_stalls: u64,

    /// Issue blocks caused by RAW hazards.
    pub hazards_raw: u64,
    /// Issue blocks caused by WAW hazards.
    pub hazards_waw: u64,
    /// Issue blocks caused by WAR hazards.
    pub hazards_war: u64,
    /// Issue blocks caused by store ordering.
    pub hazards_memory_order: u64,
}

impl SimStats {
    /// Counts one issue block of the given kind.
    pub const fn record_hazard(&mut self, hazard: Hazard) {
        match hazard {
            Hazard::Raw => self.hazards_raw += 1,
            Hazard::Waw => self.hazards_waw += 1,
            Hazard::War => self.hazards_war += 1,
            Hazard::MemoryOrder => self.hazards_memory_order += 1,
        }
    }

    /// Total issue blocks across all hazard kinds.
    pub const fn total_hazards(&self) -> u64 {
        self.hazards_raw + self.hazards_waw + self.hazards_war + self.hazards_memory_order
    }

    /// Instructions completed per cycle (writebacks plus retired stores).
    pub fn ipc(&self) -> f64 {
        let cyc = self.cycles.max(1);
        (self.writebacks + self.stores_retired) as f64 / cyc as f64
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "MIPS PIPELINE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_ipc                  {:.4}", self.ipc())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "STAGES")?;
        writeln!(f, "  fetch.words            {}", self.instructions_fetched)?;
        writeln!(f, "  fetch.branches         {}", self.branches_resolved)?;
        writeln!(f, "  fetch.unknown          {}", self.unknown_skipped)?;
        writeln!(f, "  issue.instructions     {}", self.instructions_issued)?;
        writeln!(f, "  alu.ops                {}", self.alu_ops)?;
        writeln!(f, "  mem.accesses           {}", self.memory_accesses)?;
        writeln!(f, "  mem.stores             {}", self.stores_retired)?;
        writeln!(f, "  wb.commits             {}", self.writebacks)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "STALLS")?;
        writeln!(f, "  fetch.branch_wait      {}", self.branch_stall_cycles)?;
        writeln!(f, "  fetch.queue_full       {}", self.fetch_full_stalls)?;
        writeln!(f, "  issue.queue_full       {}", self.issue_full_stalls)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "HAZARDS")?;
        writeln!(f, "  raw                    {}", self.hazards_raw)?;
        writeln!(f, "  waw                    {}", self.hazards_waw)?;
        writeln!(f, "  war                    {}", self.hazards_war)?;
        writeln!(f, "  memory_order           {}", self.hazards_memory_order)?;
        write!(f, "==========================================================")
    }
}
