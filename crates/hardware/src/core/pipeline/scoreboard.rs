//! Register reservation table.
//!
//! Maps each architectural register to the address of the in-flight
//! instruction that will write it, or `None` if the register file already
//! holds its final value. Two copies are kept: the committed table read by
//! every stage this cycle, and the next table written by issue and writeback.
//! The snapshot at the start of each cycle copies next into committed.

use crate::common::constants::REGISTER_COUNT;

/// Per-register writer reservations with a committed and a next-cycle copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    /// Reservations visible to this cycle's stages.
    committed: [Option<u32>; REGISTER_COUNT],
    /// Reservations that become visible at the next snapshot.
    next: [Option<u32>; REGISTER_COUNT],
}

impl Scoreboard {
    /// Create a new scoreboard with all registers clear (no pending writers).
    pub const fn new() -> Self {
        Self {
            committed: [None; REGISTER_COUNT],
            next: [None; REGISTER_COUNT],
        }
    }

    /// Reserve `reg` for the instruction at `address` in the next-cycle table.
    pub const fn reserve(&mut self, reg: usize, address: u32) {
        self.next[reg] = Some(address);
    }

    /// Clear `reg` in the next-cycle table, but ONLY if `address` still owns it.
    pub fn release(&mut self, reg: usize, address: u32) {
        let slot = &mut self.next[reg];
        if *slot == Some(address) {
            *slot = None;
        }
    }

    /// Address of the committed owner of `reg`.
    pub const fn owner(&self, reg: usize) -> Option<u32> {
        self.committed[reg]
    }

    /// Returns `true` if `reg` has a committed outstanding writer.
    pub const fn is_reserved(&self, reg: usize) -> bool {
        self.committed[reg].is_some()
    }

    /// Address of the next-cycle owner of `reg`.
    pub const fn pending_owner(&self, reg: usize) -> Option<u32> {
        self.next[reg]
    }

    /// Snapshot: the next-cycle table becomes the committed table.
    pub const fn commit(&mut self) {
        self.committed = self.next;
    }

    /// Number of registers with a committed outstanding writer.
    pub fn outstanding(&self) -> usize {
        self.committed.iter().filter(|slot| slot.is_some()).count()
    }
}
