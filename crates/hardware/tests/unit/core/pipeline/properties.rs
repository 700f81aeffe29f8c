//! Randomized Pipeline Properties.
//!
//! Generates forward-only programs (so every run reaches `BREAK`), checks
//! structural invariants after every cycle, and compares the drained
//! machine state against a sequential reference interpreter.

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use mipssim_core::Simulator;
use mipssim_core::common::constants::REGISTER_COUNT;
use mipssim_core::core::pipeline::RunState;
use mipssim_core::core::pipeline::queue::QueueKind;
use mipssim_core::isa::decode::decode;
use mipssim_core::isa::instruction::Operation;

use crate::common::builder::instruction::inst;
use crate::common::harness::{BASE, TestContext};

const DATA_WORDS: u32 = 4;

/// One generated program slot, encoded once the program length is known.
#[derive(Debug, Clone)]
enum Gen {
    Alu(u8, u32, u32, u32),
    Imm(u8, u32, u32, u32),
    /// Loads read slots 0-1 only.
    Load(u32, u32),
    /// Stores write slots 2-3 only, so a store that overtakes an older
    /// blocked load never changes what that load reads.
    Store(u32, u32),
    Beq(u32, u32, u32),
    Bgtz(u32, u32),
}

fn dest() -> impl Strategy<Value = u32> {
    1u32..=8
}

fn src() -> impl Strategy<Value = u32> {
    0u32..=8
}

fn gen_slot() -> impl Strategy<Value = Gen> {
    prop_oneof![
        4 => (0u8..7, dest(), src(), src()).prop_map(|(op, d, s, t)| Gen::Alu(op, d, s, t)),
        3 => (0u8..4, dest(), src(), 0u32..64).prop_map(|(op, d, s, i)| Gen::Imm(op, d, s, i)),
        2 => (dest(), 0u32..2).prop_map(|(d, slot)| Gen::Load(d, slot)),
        2 => (src(), 2u32..DATA_WORDS).prop_map(|(t, slot)| Gen::Store(t, slot)),
        1 => (src(), src(), 0u32..4).prop_map(|(s, t, skip)| Gen::Beq(s, t, skip)),
        1 => (src(), 0u32..4).prop_map(|(s, skip)| Gen::Bgtz(s, skip)),
    ]
}

/// Encodes the body followed by `BREAK`; branches never jump past `BREAK`.
fn encode(body: &[Gen]) -> Vec<u32> {
    let n = body.len() as u32;
    let data_base = BASE + 4 * (n + 1);
    let forward = |i: u32, skip: u32| ((i + 1 + skip).min(n) - i - 1) * 4;

    let mut words: Vec<u32> = body
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let i = i as u32;
            match *g {
                Gen::Alu(op, d, s, t) => match op {
                    0 => inst().add(d, s, t),
                    1 => inst().sub(d, s, t),
                    2 => inst().mul(d, s, t),
                    3 => inst().and(d, s, t),
                    4 => inst().or(d, s, t),
                    5 => inst().xor(d, s, t),
                    _ => inst().nor(d, s, t),
                }
                .build(),
                Gen::Imm(op, d, s, imm) => match op {
                    0 => inst().addi(d, s, imm),
                    1 => inst().andi(d, s, imm),
                    2 => inst().ori(d, s, imm),
                    _ => inst().xori(d, s, imm),
                }
                .build(),
                Gen::Load(d, slot) => inst().lw(d, data_base + 4 * slot, 0).build(),
                Gen::Store(t, slot) => inst().sw(t, data_base + 4 * slot, 0).build(),
                Gen::Beq(s, t, skip) => inst().beq(s, t, forward(i, skip)).build(),
                Gen::Bgtz(s, skip) => inst().bgtz(s, forward(i, skip)).build(),
            }
        })
        .collect();
    words.push(inst().brk().build());
    words
}

/// Executes the program one instruction at a time, with no pipeline.
fn reference_run(words: &[u32], regs: &[i32], data: &[i32]) -> ([i32; REGISTER_COUNT], Vec<i32>) {
    let mut r = [0i32; REGISTER_COUNT];
    r[..regs.len()].copy_from_slice(regs);
    let mut mem = data.to_vec();
    let data_base = BASE + 4 * words.len() as u32;
    let slot = |addr: u32| ((addr - data_base) / 4) as usize;

    let mut pc = BASE;
    loop {
        let inst = decode(words[((pc - BASE) / 4) as usize], pc);
        let next = pc + 4;
        pc = match inst.op {
            Operation::Alu { op, rd, rs, rt } => {
                r[rd] = op.apply(r[rs], r[rt]);
                next
            }
            Operation::AluImm { op, rt, rs, imm } => {
                r[rt] = op.apply(r[rs], imm);
                next
            }
            Operation::Load { base, rt, offset } => {
                r[rt] = mem[slot((r[base] as u32).wrapping_add(offset))];
                next
            }
            Operation::Store { base, rt, offset } => {
                mem[slot((r[base] as u32).wrapping_add(offset))] = r[rt];
                next
            }
            Operation::Beq { rs, rt, offset } if r[rs] == r[rt] => next + offset,
            Operation::Bgtz { rs, offset } if r[rs] > 0 => next + offset,
            Operation::Beq { .. } | Operation::Bgtz { .. } => next,
            _ => break,
        };
    }
    (r, mem)
}

fn check_cycle(sim: &Simulator) -> Result<(), TestCaseError> {
    for kind in QueueKind::ALL {
        let queue = sim.queue(kind);
        prop_assert!(queue.len() <= queue.capacity(), "{kind} over capacity");
    }

    let mut dests = HashSet::new();
    for inst in sim.pipeline.in_flight() {
        if let Some(d) = inst.destination_register() {
            prop_assert!(dests.insert(d), "two in-flight writers of R{d}");
        }
    }

    let pre_issue = sim.queue(QueueKind::PreIssue);
    let addrs: Vec<u32> = pre_issue.iter().map(|i| i.address).collect();
    prop_assert!(addrs.windows(2).all(|w| w[0] < w[1]), "pre-issue out of order");

    for issued in sim.pipeline.in_flight().filter(|i| i.is_memory()) {
        prop_assert!(
            !pre_issue
                .iter()
                .any(|w| w.is_store() && w.address < issued.address),
            "memory op {} overtook an older store",
            issued.address
        );
    }
    Ok(())
}

fn machine() -> impl Strategy<Value = (Vec<Gen>, Vec<i32>, Vec<i32>)> {
    (
        prop::collection::vec(gen_slot(), 1..16),
        prop::collection::vec(-20i32..20, 9),
        prop::collection::vec(-20i32..20, DATA_WORDS as usize),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn invariants_hold_every_cycle((body, regs, data) in machine()) {
        let words = encode(&body);
        let mut ctx = TestContext::with_data(&words, &data);
        for (r, &v) in regs.iter().enumerate() {
            let _ = ctx.set_reg(r, v);
        }

        loop {
            let state = ctx.sim.tick().map_err(|e| TestCaseError::fail(e.to_string()))?;
            check_cycle(&ctx.sim)?;
            if state == RunState::Terminated {
                break;
            }
        }
    }

    #[test]
    fn drained_state_matches_sequential_execution((body, regs, data) in machine()) {
        let words = encode(&body);
        let mut ctx = TestContext::with_data(&words, &data);
        for (r, &v) in regs.iter().enumerate() {
            let _ = ctx.set_reg(r, v);
        }
        let _ = ctx.run().map_err(|e| TestCaseError::fail(e.to_string()))?;

        // BREAK stops the run with work still queued; finish it off.
        let sim = &mut ctx.sim;
        for _ in 0..256 {
            if sim.pipeline.is_drained() {
                break;
            }
            let _ = sim
                .pipeline
                .tick(&mut sim.cpu)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
        }
        prop_assert!(sim.pipeline.is_drained());

        let (expected_regs, expected_data) = reference_run(&words, &regs, &data);
        prop_assert_eq!(sim.registers(), expected_regs);
        prop_assert_eq!(sim.data(), expected_data.as_slice());
    }
}
