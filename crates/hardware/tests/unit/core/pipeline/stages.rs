//! Stage Behaviour Tests.
//!
//! Each test drives a short program one cycle at a time and inspects the
//! queue or register state that a single stage is responsible for.

use pretty_assertions::assert_eq;
use rstest::rstest;

use mipssim_core::SimError;
use mipssim_core::config::Config;
use mipssim_core::core::pipeline::RunState;
use mipssim_core::core::pipeline::queue::QueueKind;

use crate::common::builder::instruction::inst;
use crate::common::harness::TestContext;

// ══════════════════════════════════════════════════════════
// 1. Fetch
// ══════════════════════════════════════════════════════════

#[test]
fn fetch_moves_two_words_per_cycle() {
    let mut ctx = TestContext::new(&[
        inst().add(1, 2, 3).build(),
        inst().add(4, 5, 6).build(),
        inst().add(7, 8, 9).build(),
        inst().j(140).build(),
    ]);
    let _ = ctx.step();
    assert_eq!(ctx.queue_addrs(QueueKind::PreIssue), vec![128, 132]);
    assert_eq!(ctx.pc(), 136);
    assert_eq!(ctx.sim.stats().instructions_fetched, 2);
}

#[test]
fn fetch_stops_after_resolving_a_jump() {
    let mut ctx = TestContext::new(&[
        inst().j(136).build(),
        inst().add(1, 2, 3).build(),
        inst().j(136).build(),
    ]);
    let _ = ctx.step();
    assert_eq!(ctx.executed(), Some(128));
    assert_eq!(ctx.pc(), 136);
    assert!(ctx.queue_addrs(QueueKind::PreIssue).is_empty());
}

#[test]
fn executed_slot_is_cleared_next_cycle() {
    let mut ctx = TestContext::new(&[
        inst().j(132).build(),
        inst().add(1, 2, 3).build(),
        inst().add(4, 5, 6).build(),
        inst().j(140).build(),
    ]);
    let _ = ctx.step();
    assert_eq!(ctx.executed(), Some(128));
    let _ = ctx.step();
    assert_eq!(ctx.executed(), None);
}

#[test]
fn jump_keeps_region_bits_of_next_pc() {
    let mut ctx = TestContext::new(&[inst().add(1, 2, 3).build(), inst().j(128).build()]);
    let _ = ctx.step();
    assert_eq!(ctx.executed(), Some(132));
    assert_eq!(ctx.pc(), 128);
}

#[test]
fn unknown_word_is_skipped_and_consumes_a_slot() {
    let mut ctx = TestContext::new(&[
        0x4000_0000,
        inst().addi(1, 0, 1).build(),
        inst().j(136).build(),
    ]);
    let _ = ctx.step();
    assert_eq!(ctx.queue_addrs(QueueKind::PreIssue), vec![132]);
    assert_eq!(ctx.pc(), 136);
    assert_eq!(ctx.sim.stats().unknown_skipped, 1);
    assert_eq!(ctx.sim.stats().instructions_fetched, 2);
}

#[rstest]
#[case::positive(1, 136)]
#[case::zero(0, 132)]
#[case::negative(-4, 132)]
fn bgtz_resolves_on_sign(#[case] value: i32, #[case] expected_pc: u32) {
    let mut ctx = TestContext::new(&[
        inst().bgtz(1, 4).build(),
        inst().j(132).build(),
        inst().j(136).build(),
    ]);
    let _ = ctx.set_reg(1, value);
    let _ = ctx.step();
    assert_eq!(ctx.executed(), Some(128));
    assert_eq!(ctx.pc(), expected_pc);
}

#[test]
fn break_redirects_past_the_executable_region() {
    let mut ctx = TestContext::with_data(
        &[inst().addi(1, 0, 1).build(), inst().brk().build()],
        &[3],
    );
    assert_eq!(ctx.step(), RunState::Terminated);
    assert_eq!(ctx.pc(), 136);
    assert_eq!(ctx.executed(), Some(132));
}

#[test]
fn narrow_fetch_width_is_honoured() {
    let mut config = Config::default();
    config.pipeline.fetch_width = 1;
    let mut ctx = TestContext::with_config(
        &[
            inst().add(1, 2, 3).build(),
            inst().add(4, 5, 6).build(),
            inst().j(136).build(),
        ],
        &[],
        &config,
    );
    let _ = ctx.step();
    assert_eq!(ctx.queue_addrs(QueueKind::PreIssue), vec![128]);
    assert_eq!(ctx.pc(), 132);
}

// ══════════════════════════════════════════════════════════
// 2. Issue
// ══════════════════════════════════════════════════════════

#[test]
fn independent_pair_issues_together() {
    let mut ctx = TestContext::new(&[
        inst().add(1, 2, 3).build(),
        inst().add(4, 5, 6).build(),
        inst().j(136).build(),
    ]);
    let _ = ctx.step_n(2);
    assert_eq!(ctx.queue_addrs(QueueKind::PreAlu), vec![128, 132]);
    assert!(ctx.queue_addrs(QueueKind::PreIssue).is_empty());
    assert_eq!(ctx.sim.stats().instructions_issued, 2);
}

#[test]
fn dependent_pair_issues_only_the_producer() {
    let mut ctx = TestContext::new(&[
        inst().add(1, 2, 3).build(),
        inst().sub(4, 1, 5).build(),
        inst().j(136).build(),
    ]);
    let _ = ctx.step_n(2);
    assert_eq!(ctx.queue_addrs(QueueKind::PreAlu), vec![128]);
    assert_eq!(ctx.queue_addrs(QueueKind::PreIssue), vec![132]);
    assert_eq!(ctx.sim.stats().hazards_raw, 1);
}

#[test]
fn younger_instruction_bypasses_a_blocked_one() {
    let mut ctx = TestContext::new(&[
        inst().add(1, 2, 3).build(),
        inst().sub(4, 1, 5).build(),
        inst().add(6, 7, 8).build(),
        inst().j(140).build(),
    ]);
    // Cycle 2 issues 128 and fetches 136; cycle 3 issues 136 past the blocked 132.
    let _ = ctx.step_n(3);
    assert_eq!(ctx.queue_addrs(QueueKind::PreAlu), vec![136]);
    assert_eq!(ctx.queue_addrs(QueueKind::PreIssue), vec![132]);
}

#[test]
fn single_issue_width_is_honoured() {
    let mut config = Config::default();
    config.pipeline.issue_width = 1;
    let mut ctx = TestContext::with_config(
        &[
            inst().add(1, 2, 3).build(),
            inst().add(4, 5, 6).build(),
            inst().j(136).build(),
        ],
        &[],
        &config,
    );
    let _ = ctx.step_n(2);
    assert_eq!(ctx.queue_addrs(QueueKind::PreAlu), vec![128]);
    assert_eq!(ctx.queue_addrs(QueueKind::PreIssue), vec![132]);
}

#[test]
fn destination_is_reserved_from_issue_to_writeback() {
    let mut ctx = TestContext::new(&[inst().addi(9, 0, 1).build(), inst().j(132).build()]);
    let board = |ctx: &TestContext| ctx.sim.pipeline.scoreboard.pending_owner(9);

    let _ = ctx.step();
    assert_eq!(board(&ctx), None);
    let _ = ctx.step();
    assert_eq!(board(&ctx), Some(128));
    let _ = ctx.step();
    assert_eq!(board(&ctx), Some(128));
    let _ = ctx.step();
    assert_eq!(board(&ctx), None);
    assert_eq!(ctx.reg(9), 1);
}

// ══════════════════════════════════════════════════════════
// 3. ALU
// ══════════════════════════════════════════════════════════

#[test]
fn alu_computes_every_operation() {
    let mut ctx = TestContext::new(&[
        inst().add(10, 2, 3).build(),
        inst().sub(11, 2, 3).build(),
        inst().mul(12, 2, 3).build(),
        inst().and(13, 2, 3).build(),
        inst().or(14, 2, 3).build(),
        inst().xor(15, 2, 3).build(),
        inst().nor(16, 2, 3).build(),
        inst().addi(17, 2, 255).build(),
        inst().andi(18, 3, 255).build(),
        inst().ori(19, 0, 7).build(),
        inst().xori(20, 3, 1).build(),
        inst().j(172).build(),
    ]);
    let _ = ctx.set_reg(2, 6).set_reg(3, -3);
    let _ = ctx.step_n(40);

    let expected = [3, -9, -18, 4, -1, -5, 0, 261, 253, 7, -4];
    let actual: Vec<i32> = (10..=20).map(|r| ctx.reg(r)).collect();
    assert_eq!(actual, expected);
    assert_eq!(ctx.sim.stats().alu_ops, 11);
    assert_eq!(ctx.sim.stats().writebacks, 11);
}

#[test]
fn sub_subtracts_the_second_printed_register_from_the_third() {
    let mut ctx = TestContext::new(&[inst().sub(4, 1, 5).build(), inst().j(132).build()]);
    let _ = ctx.set_reg(1, 10).set_reg(5, 3);
    let _ = ctx.step_n(4);
    assert_eq!(ctx.reg(4), -7);
}

#[test]
fn immediate_above_a_byte_is_truncated() {
    let mut ctx = TestContext::new(&[inst().addi(1, 2, 0x1FF).build(), inst().j(132).build()]);
    let _ = ctx.set_reg(2, 1);
    let _ = ctx.step_n(4);
    assert_eq!(ctx.reg(1), 256);
}

#[test]
fn arithmetic_wraps() {
    let mut ctx = TestContext::new(&[inst().add(1, 2, 2).build(), inst().j(132).build()]);
    let _ = ctx.set_reg(2, i32::MAX);
    let _ = ctx.step_n(4);
    assert_eq!(ctx.reg(1), -2);
}

#[test]
fn r0_is_an_ordinary_register() {
    let mut ctx = TestContext::new(&[inst().addi(0, 0, 5).build(), inst().j(132).build()]);
    let _ = ctx.step_n(4);
    assert_eq!(ctx.reg(0), 5);
}

#[test]
fn memory_ops_route_to_pre_mem() {
    let mut ctx = TestContext::with_data(
        &[
            inst().lw(1, 140, 0).build(),
            inst().j(132).build(),
            inst().brk().build(),
        ],
        &[77],
    );
    let _ = ctx.step_n(3);
    assert_eq!(ctx.queue_addrs(QueueKind::PreMem), vec![128]);
    assert!(ctx.queue_addrs(QueueKind::PostAlu).is_empty());
}

// ══════════════════════════════════════════════════════════
// 4. MEM and Writeback
// ══════════════════════════════════════════════════════════

#[test]
fn load_reads_data_memory() {
    let mut ctx = TestContext::with_data(
        &[
            inst().lw(1, 4, 2).build(),
            inst().j(132).build(),
            inst().brk().build(),
        ],
        &[11, 22],
    );
    let _ = ctx.set_reg(2, 140);
    let _ = ctx.step_n(4);
    assert_eq!(ctx.queue_addrs(QueueKind::PostMem), vec![128]);
    let _ = ctx.step();
    assert_eq!(ctx.reg(1), 22);
    assert_eq!(ctx.sim.stats().memory_accesses, 1);
}

#[test]
fn store_completes_in_mem_without_writeback() {
    let mut ctx = TestContext::with_data(
        &[
            inst().sw(1, 140, 0).build(),
            inst().j(132).build(),
            inst().brk().build(),
        ],
        &[0],
    );
    let _ = ctx.set_reg(1, -9);
    let _ = ctx.step_n(4);
    assert_eq!(ctx.sim.data(), &[-9]);
    assert!(ctx.queue_addrs(QueueKind::PostMem).is_empty());
    assert_eq!(ctx.sim.stats().stores_retired, 1);
    assert_eq!(ctx.sim.stats().writebacks, 0);
}

#[test]
fn both_result_queues_write_back_in_one_cycle() {
    let mut ctx = TestContext::with_data(
        &[
            inst().lw(3, 144, 0).build(),
            inst().add(5, 6, 7).build(),
            inst().j(136).build(),
            inst().brk().build(),
        ],
        &[8],
    );
    let _ = ctx.set_reg(6, 1).set_reg(7, 2);
    let _ = ctx.step_n(4);
    assert_eq!(ctx.queue_addrs(QueueKind::PostMem), vec![128]);
    assert_eq!(ctx.queue_addrs(QueueKind::PostAlu), vec![132]);
    let _ = ctx.step();
    assert_eq!((ctx.reg(3), ctx.reg(5)), (8, 3));
    assert_eq!(ctx.sim.stats().writebacks, 2);
}

#[rstest]
#[case(0, SimError::DataAddressOutOfRange { address: 0, base: 140, end: 144 })]
#[case(142, SimError::MisalignedDataAddress(142))]
#[case(144, SimError::DataAddressOutOfRange { address: 144, base: 140, end: 144 })]
fn bad_data_address_is_fatal(#[case] offset: u32, #[case] expected: SimError) {
    let mut ctx = TestContext::with_data(
        &[
            inst().lw(1, offset, 0).build(),
            inst().j(132).build(),
            inst().brk().build(),
        ],
        &[1],
    );
    let err = ctx.run().unwrap_err();
    assert_eq!(err.to_string(), expected.to_string());
}
