//! # Fetch-Execute Loop Tests

use a64emu_core::common::{ExecError, MemoryError, SimError};
use a64emu_core::config::{Config, MemoryConfig};
use a64emu_core::isa::encoding::Family;
use a64emu_core::sim::{Emulator, StopReason, load_elf};
use pretty_assertions::assert_eq;

use crate::common::builder::elf::ElfBuilder;
use crate::common::builder::instruction::{R31, RET, SVC_0, add_x, assemble, logical_imm, subs_x};
use crate::common::harness::{CODE_BASE, INITIAL_SP, TestContext};

fn limited(max: u64) -> Config {
    let mut config = Config::default();
    config.general.max_instructions = Some(max);
    config
}

#[test]
fn starts_at_entry_with_initial_sp() {
    let ctx = TestContext::new(&[RET]);
    assert_eq!(ctx.cpu().pc, CODE_BASE);
    assert_eq!(ctx.cpu().sp(), INITIAL_SP);
    assert_eq!(ctx.emu.executed(), 0);
}

#[test]
fn stops_on_unimplemented_instruction_without_advancing() {
    let mut ctx = TestContext::new(&[add_x(0, 0, 1), add_x(0, 0, 1), RET]);
    let summary = ctx.run();

    assert_eq!(summary.executed, 2);
    assert_eq!(
        summary.stop,
        StopReason::Fault(SimError::Exec {
            pc: CODE_BASE + 8,
            source: ExecError::Unimplemented {
                raw: RET,
                family: Family::SystemAndBranchReg,
            },
        })
    );
    assert_eq!(ctx.cpu().pc, CODE_BASE + 8);
    assert_eq!(ctx.cpu().x(0), 2);
}

#[test]
fn zero_padding_is_unallocated() {
    let mut ctx = TestContext::new(&[add_x(1, 1, 7)]);
    let summary = ctx.run();

    assert_eq!(summary.executed, 1);
    match summary.stop {
        StopReason::Fault(SimError::Exec { pc, source }) => {
            assert_eq!(pc, CODE_BASE + 4);
            assert!(matches!(source, ExecError::Unallocated { raw: 0, .. }));
        }
        stop => panic!("unexpected stop {stop:?}"),
    }
}

#[test]
fn step_limit() {
    let program = [add_x(0, 0, 1); 8];
    let mut ctx = TestContext::with_config(&program, &limited(3));
    let summary = ctx.run();

    assert_eq!(summary.executed, 3);
    assert_eq!(summary.stop, StopReason::StepLimit);
    assert_eq!(ctx.cpu().pc, CODE_BASE + 12);
    assert_eq!(ctx.cpu().x(0), 3);
}

#[test]
fn zero_limit_executes_nothing() {
    let mut ctx = TestContext::with_config(&[add_x(0, 0, 1)], &limited(0));
    let summary = ctx.run();
    assert_eq!(summary.executed, 0);
    assert_eq!(summary.stop, StopReason::StepLimit);
    assert_eq!(ctx.cpu().x(0), 0);
}

#[test]
fn misaligned_pc() {
    let mut ctx = TestContext::new(&[add_x(0, 0, 1)]);
    ctx.cpu_mut().pc = CODE_BASE + 2;

    assert_eq!(
        ctx.emu.step(),
        Err(SimError::Fetch {
            pc: CODE_BASE + 2,
            source: MemoryError::Misaligned {
                addr: CODE_BASE + 2,
                align: 4,
            },
        })
    );
    assert_eq!(ctx.emu.executed(), 0);
}

#[test]
fn unmapped_pc() {
    let mut ctx = TestContext::new(&[RET]);
    ctx.cpu_mut().pc = 0x1000_0000;

    let summary = ctx.run();
    assert_eq!(
        summary.stop,
        StopReason::Fault(SimError::Fetch {
            pc: 0x1000_0000,
            source: MemoryError::Unmapped {
                addr: 0x1000_0000,
                len: 4,
            },
        })
    );
}

#[test]
fn tracing_does_not_change_results() {
    let program = [add_x(0, 0, 5), add_x(0, 0, 5)];
    let quiet = limited(2);
    let mut traced = limited(2);
    traced.general.trace_instructions = true;

    let mut plain = TestContext::with_config(&program, &quiet);
    let mut logged = TestContext::with_config(&program, &traced);
    assert!(!plain.emu.traces_instructions());
    assert!(logged.emu.traces_instructions());

    assert_eq!(plain.run(), logged.run());
    assert_eq!(logged.cpu().x(0), 10);
    assert_eq!(plain.cpu(), logged.cpu());
}

#[test]
fn runs_a_loaded_executable() {
    let entry = 0x40_0000;
    let code = assemble(&[
        // mov x0, #0xff
        logical_imm(true, 1, true, 0, 0b000111, R31, 0),
        add_x(1, 0, 1),
        subs_x(2, 1, 0x100),
        SVC_0,
    ]);
    let elf = ElfBuilder::new(entry).load(entry, &code, code.len() as u64).build();
    let layout = MemoryConfig {
        stack_top: 0x80_0000,
        stack_size: 0x1_0000,
        stack_reserve: 0x100,
        ..MemoryConfig::default()
    };
    let config = Config {
        memory: layout.clone(),
        ..Config::default()
    };

    let image = load_elf(&elf, &layout).unwrap();
    let mut emu = Emulator::new(image, &config);
    let summary = emu.run();

    assert_eq!(summary.executed, 3);
    assert!(matches!(
        summary.stop,
        StopReason::Fault(SimError::Exec {
            pc,
            source: ExecError::Unimplemented { raw: SVC_0, .. },
        }) if pc == entry + 12
    ));
    assert_eq!(emu.cpu.x(0), 0xFF);
    assert_eq!(emu.cpu.x(1), 0x100);
    assert_eq!(emu.cpu.x(2), 0);
    assert!(emu.cpu.flags.z && emu.cpu.flags.c);
    assert_eq!(emu.cpu.sp(), 0x7F_FF00);
}
