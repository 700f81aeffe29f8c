//! Simulator: owns both the CPU and the pipeline side-by-side.
//!
//! Stages borrow the CPU and the pipeline separately, so neither has to be
//! stored inside the other.

use tracing::info;

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::queue::{BoundedQueue, QueueKind};
use crate::core::pipeline::{FetchStatus, Pipeline, RunState};
use crate::sim::loader::Program;
use crate::sim::report::CycleReport;
use crate::stats::SimStats;

/// Top-level simulator: CPU architectural state + pipeline.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// CPU architectural state (PC, registers, data memory, stats).
    pub cpu: Cpu,
    /// Pipeline queues, reservations, and fetch status.
    pub pipeline: Pipeline,
    max_cycles: u64,
    state: RunState,
}

impl Simulator {
    /// Creates a new simulator with the given program and configuration.
    pub fn new(program: &Program, config: &Config) -> Self {
        let cpu = Cpu::new(program, config);
        info!(
            instructions = program.instructions().len(),
            data_words = program.data().len(),
            text_base = program.text_base(),
            "simulation start"
        );
        Self {
            cpu,
            pipeline: Pipeline::new(&config.pipeline),
            max_cycles: config.general.max_cycles,
            state: RunState::Running,
        }
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// Calling `tick` after termination is a no-op that returns
    /// [`RunState::Terminated`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimitExceeded`] once the cycle budget is spent,
    /// or the fatal error raised by a stage.
    pub fn tick(&mut self) -> Result<RunState, SimError> {
        if self.state == RunState::Terminated {
            return Ok(RunState::Terminated);
        }
        if self.cpu.stats.cycles >= self.max_cycles {
            return Err(SimError::CycleLimitExceeded(self.max_cycles));
        }
        self.state = self.pipeline.tick(&mut self.cpu)?;
        if self.state == RunState::Terminated {
            info!(cycles = self.cpu.stats.cycles, "simulation finished");
        }
        Ok(self.state)
    }

    /// Runs until `BREAK` resolves and returns the number of cycles simulated.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by [`Simulator::tick`].
    pub fn run(&mut self) -> Result<u64, SimError> {
        while self.tick()? == RunState::Running {}
        Ok(self.cycle())
    }

    /// Runs to completion, handing each cycle's report to `on_cycle`.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Simulator::tick`] or from `on_cycle`.
    pub fn run_with<F>(&mut self, mut on_cycle: F) -> Result<u64, SimError>
    where
        F: FnMut(&CycleReport) -> Result<(), SimError>,
    {
        while self.state == RunState::Running {
            let _ = self.tick()?;
            on_cycle(&self.report())?;
        }
        Ok(self.cycle())
    }

    /// Report of the state after the last completed cycle.
    pub fn report(&self) -> CycleReport {
        CycleReport::capture(self.cycle(), &self.cpu, &self.pipeline)
    }

    /// Number of completed cycles.
    pub const fn cycle(&self) -> u64 {
        self.cpu.stats.cycles
    }

    /// Current run state.
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// All 32 registers in index order.
    pub const fn registers(&self) -> [i32; 32] {
        self.cpu.regs.snapshot()
    }

    /// Data memory in address order.
    pub fn data(&self) -> &[i32] {
        self.cpu.data.words()
    }

    /// Queue identified by `kind`.
    pub const fn queue(&self, kind: QueueKind) -> &BoundedQueue {
        self.pipeline.queue(kind)
    }

    /// Waiting and executed control transfers.
    pub const fn fetch_status(&self) -> &FetchStatus {
        &self.pipeline.fetch
    }

    /// Collected statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }
}
