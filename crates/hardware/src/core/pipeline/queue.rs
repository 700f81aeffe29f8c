//! Bounded inter-stage queues.
//!
//! Every boundary between two pipeline stages is a [`BoundedQueue`]: a FIFO of
//! instruction records with a hard capacity. Besides its live contents, each
//! queue carries the length it had at the last snapshot. Structural hazards are
//! decided from that latched value, so every stage in a cycle sees the same
//! start-of-cycle fullness no matter which stage ran before it.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use crate::common::error::SimError;
use crate::isa::instruction::Instruction;

/// Identity of a bounded queue, listed in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QueueKind {
    /// Fetched instructions waiting for issue.
    PreIssue,
    /// Issued instructions waiting for the ALU.
    PreAlu,
    /// Loads and stores waiting for the memory stage.
    PreMem,
    /// Loaded values waiting for writeback.
    PostMem,
    /// ALU results waiting for writeback.
    PostAlu,
}

impl QueueKind {
    /// All queues in report order.
    pub const ALL: [Self; 5] = [
        Self::PreIssue,
        Self::PreAlu,
        Self::PreMem,
        Self::PostMem,
        Self::PostAlu,
    ];

    /// Heading used by the per-cycle report.
    pub const fn label(self) -> &'static str {
        match self {
            Self::PreIssue => "Pre-Issue",
            Self::PreAlu => "Pre-ALU",
            Self::PreMem => "Pre-MEM",
            Self::PostMem => "Post-MEM",
            Self::PostAlu => "Post-ALU",
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-capacity FIFO between two pipeline stages.
#[derive(Debug, Clone)]
pub struct BoundedQueue {
    kind: QueueKind,
    capacity: usize,
    entries: VecDeque<Instruction>,
    /// Length observed at the last snapshot.
    latched_len: usize,
}

impl BoundedQueue {
    /// Creates an empty queue.
    ///
    /// # Arguments
    ///
    /// * `kind` - Which pipeline boundary this queue models.
    /// * `capacity` - Maximum number of resident instructions.
    pub fn new(kind: QueueKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            entries: VecDeque::with_capacity(capacity),
            latched_len: 0,
        }
    }

    /// Which pipeline boundary this queue models.
    pub const fn kind(&self) -> QueueKind {
        self.kind
    }

    /// Maximum number of resident instructions.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Live number of resident instructions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no instruction is resident.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live number of free slots.
    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.entries.len())
    }

    /// Appends an instruction at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::QueueOverflow`] if the queue is already at capacity.
    /// Stages check capacity before pushing, so this only fires on an internal
    /// invariant breach.
    pub fn push(&mut self, inst: Instruction) -> Result<(), SimError> {
        if self.entries.len() >= self.capacity {
            return Err(SimError::QueueOverflow {
                queue: self.kind,
                capacity: self.capacity,
            });
        }
        self.entries.push_back(inst);
        Ok(())
    }

    /// Removes and returns the head instruction.
    pub fn pop(&mut self) -> Option<Instruction> {
        self.entries.pop_front()
    }

    /// Head instruction without removing it.
    pub fn front(&self) -> Option<&Instruction> {
        self.entries.front()
    }

    /// Resident instructions, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.entries.iter()
    }

    /// Removes every resident instruction, head first.
    pub fn take_all(&mut self) -> Vec<Instruction> {
        self.entries.drain(..).collect()
    }

    /// Restores program order by sorting the live contents on address.
    pub fn sort_by_address(&mut self) {
        self.entries.make_contiguous().sort_by_key(|inst| inst.address);
    }

    /// Records the current length as the snapshot value for the coming cycle.
    pub fn latch(&mut self) {
        self.latched_len = self.entries.len();
    }

    /// Returns `true` if the queue was at capacity at the last snapshot.
    pub const fn was_full(&self) -> bool {
        self.latched_len >= self.capacity
    }

    /// Free slots as of the last snapshot.
    pub const fn latched_free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.latched_len)
    }
}
