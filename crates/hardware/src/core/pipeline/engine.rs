//! Cycle orchestration for the queue-coupled pipeline.
//!
//! This module owns the pipeline bookkeeping and the per-cycle sequence:
//! 1. **Snapshot:** Commit the reservation table, record the pre-issue
//!    contents for fetch, and latch every queue's length.
//! 2. **Stages:** Run Writeback, MEM, ALU, Issue, and Fetch in that order, so
//!    each stage reads the state its downstream neighbour left at cycle start.
//! 3. **Termination:** Report [`RunState::Terminated`] once the PC has left the
//!    executable region (after `BREAK` resolves).

use crate::common::error::SimError;
use crate::config::PipelineConfig;
use crate::core::Cpu;
use crate::core::pipeline::queue::{BoundedQueue, QueueKind};
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::core::pipeline::stages::{execute_stage, fetch_stage, issue_stage, mem_stage, wb_stage};
use crate::isa::instruction::Instruction;

/// Simulation state after a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// More cycles remain.
    Running,
    /// `BREAK` has resolved (or the instruction stream ran out).
    Terminated,
}

/// Control transfers observed by fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStatus {
    /// Control transfer stalled at fetch, waiting for its sources.
    pub waiting: Option<Instruction>,
    /// Control transfer resolved during the last cycle.
    pub executed: Option<Instruction>,
}

/// Queues, reservations, and fetch status of the pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Fetched instructions waiting for issue.
    pub pre_issue: BoundedQueue,
    /// Issued instructions waiting for the ALU.
    pub pre_alu: BoundedQueue,
    /// Loads and stores waiting for the memory stage.
    pub pre_mem: BoundedQueue,
    /// Loaded values waiting for writeback.
    pub post_mem: BoundedQueue,
    /// ALU results waiting for writeback.
    pub post_alu: BoundedQueue,
    /// Register reservation table.
    pub scoreboard: Scoreboard,
    /// Pre-issue contents captured at the last snapshot.
    pub last_pre_issue: Vec<Instruction>,
    /// Waiting and executed control transfers.
    pub fetch: FetchStatus,
    /// Instructions fetched per cycle.
    pub fetch_width: usize,
    /// Instructions issued per cycle.
    pub issue_width: usize,
}

impl Pipeline {
    /// Creates an empty pipeline with the configured widths and capacities.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            pre_issue: BoundedQueue::new(QueueKind::PreIssue, config.pre_issue_size),
            pre_alu: BoundedQueue::new(QueueKind::PreAlu, config.pre_alu_size),
            pre_mem: BoundedQueue::new(QueueKind::PreMem, config.pre_mem_size),
            post_mem: BoundedQueue::new(QueueKind::PostMem, config.post_mem_size),
            post_alu: BoundedQueue::new(QueueKind::PostAlu, config.post_alu_size),
            scoreboard: Scoreboard::new(),
            last_pre_issue: Vec::with_capacity(config.pre_issue_size),
            fetch: FetchStatus::default(),
            fetch_width: config.fetch_width,
            issue_width: config.issue_width,
        }
    }

    /// Freezes the start-of-cycle state every stage reads this cycle.
    pub fn snapshot(&mut self) {
        self.scoreboard.commit();
        self.last_pre_issue.clear();
        self.last_pre_issue.extend(self.pre_issue.iter().copied());
        self.pre_issue.latch();
        self.pre_alu.latch();
        self.pre_mem.latch();
        self.post_mem.latch();
        self.post_alu.latch();
    }

    /// Run one cycle of the entire pipeline.
    ///
    /// # Errors
    ///
    /// Propagates the first fatal error raised by a stage; the cycle is then
    /// left partially applied and the run must stop.
    pub fn tick(&mut self, cpu: &mut Cpu) -> Result<RunState, SimError> {
        self.snapshot();

        wb_stage(cpu, self)?;
        mem_stage(cpu, self)?;
        execute_stage(cpu, self)?;
        issue_stage(cpu, self)?;
        fetch_stage(cpu, self)?;

        cpu.stats.cycles += 1;
        Ok(if cpu.is_halted() {
            RunState::Terminated
        } else {
            RunState::Running
        })
    }

    /// Queue identified by `kind`.
    pub const fn queue(&self, kind: QueueKind) -> &BoundedQueue {
        match kind {
            QueueKind::PreIssue => &self.pre_issue,
            QueueKind::PreAlu => &self.pre_alu,
            QueueKind::PreMem => &self.pre_mem,
            QueueKind::PostMem => &self.post_mem,
            QueueKind::PostAlu => &self.post_alu,
        }
    }

    /// Every instruction issued but not yet written back, oldest queue first.
    pub fn in_flight(&self) -> impl Iterator<Item = &Instruction> {
        self.pre_alu
            .iter()
            .chain(self.pre_mem.iter())
            .chain(self.post_mem.iter())
            .chain(self.post_alu.iter())
    }

    /// Returns `true` when no instruction is resident in any queue.
    pub fn is_drained(&self) -> bool {
        QueueKind::ALL.iter().all(|&kind| self.queue(kind).is_empty())
    }
}
