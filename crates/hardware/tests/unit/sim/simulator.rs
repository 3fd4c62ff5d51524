//! Run Driver Tests.

use pretty_assertions::assert_eq;

use crate::common::builder::instruction::InstructionBuilder as I;
use crate::common::harness::init_tracing;
use rv32pipe_core::Simulator;
use rv32pipe_core::common::error::{ConfigError, ImageError, MemoryError, SimError};
use rv32pipe_core::config::{Config, OutOfRangePolicy};
use rv32pipe_core::isa::system::ECALL;
use rv32pipe_core::sim::ProgramImage;

fn config(depth_log: u32, max_cycles: u64) -> Config {
    let mut config = Config::default();
    config.memory.depth_log = depth_log;
    config.general.max_cycles = max_cycles;
    config
}

fn simulator(config: Config, words: Vec<u32>) -> Simulator {
    init_tracing();
    let mut sim = Simulator::new(config).unwrap();
    sim.load(&ProgramImage { base: 0, words }).unwrap();
    sim
}

#[test]
fn run_returns_registers_and_stats() {
    let mut sim = simulator(config(10, 100), vec![I::new().addi(10, 0, 42).build(), ECALL]);
    let summary = sim.run().unwrap();
    assert_eq!(summary.reg(10), 42);
    assert_eq!(summary.registers[10], sim.cpu.regs.read(10));
    assert_eq!(summary.stats, sim.cpu.stats);
    assert!(sim.cpu.halted);
}

#[test]
fn infinite_loop_hits_cycle_limit() {
    let mut sim = simulator(config(10, 50), vec![I::new().jal(0, 0).build()]);
    match sim.run() {
        Err(SimError::CycleLimit { cycles }) => assert_eq!(cycles, 50),
        other => panic!("expected cycle limit, got {other:?}"),
    }
    assert_eq!(sim.cpu.stats.cycles, 50);
}

#[test]
fn fault_policy_stops_run() {
    let mut cfg = config(10, 100);
    cfg.memory.out_of_range = OutOfRangePolicy::Fault;
    let mut sim = simulator(
        cfg,
        vec![I::new().lui(1, 0x10).build(), I::new().lw(2, 1, 0).build(), ECALL],
    );
    match sim.run() {
        Err(SimError::Memory(e)) => assert_eq!(
            e,
            MemoryError::OutOfRange {
                addr: 0x1_0000,
                depth_words: 1024,
            }
        ),
        other => panic!("expected memory fault, got {other:?}"),
    }
}

#[test]
fn wrap_policy_keeps_running() {
    let mut sim = simulator(
        config(10, 100),
        vec![I::new().lui(1, 0x10).build(), I::new().lw(2, 1, 0).build(), ECALL],
    );
    // 0x10000 wraps onto word 0, the lui itself.
    assert_eq!(sim.run().unwrap().reg(2), I::new().lui(1, 0x10).build());
}

#[test]
fn invalid_config_is_rejected() {
    let err = Simulator::new(config(40, 100)).unwrap_err();
    assert!(matches!(err, SimError::Config(ConfigError::DepthLog { got: 40, .. })));
}

#[test]
fn oversized_image_is_rejected() {
    let mut sim = Simulator::new(config(2, 100)).unwrap();
    let err = sim
        .load(&ProgramImage {
            base: 8,
            words: vec![0; 3],
        })
        .unwrap_err();
    assert!(matches!(err, SimError::Image(ImageError::TooLarge { end_word: 5, capacity: 4 })));
}

#[test]
fn load_file_applies_halt_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.hex");
    std::fs::write(&path, "00100093\n0ff00513\n").unwrap();

    let mut sim = Simulator::new(config(8, 100)).unwrap();
    sim.load_file(&path).unwrap();
    let summary = sim.run().unwrap();
    assert_eq!(summary.reg(1), 1);
    assert_eq!(summary.reg(10), 0);
}

#[test]
fn halt_idiom_runs_as_addi_without_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.hex");
    std::fs::write(&path, "0ff00513\n00000073\n").unwrap();

    let mut cfg = config(8, 100);
    cfg.image.rewrite_halt = false;
    let mut sim = Simulator::new(cfg).unwrap();
    sim.load_file(&path).unwrap();
    assert_eq!(sim.run().unwrap().reg(10), 255);
}

#[test]
fn summary_serializes() {
    let mut sim = simulator(config(10, 100), vec![ECALL]);
    let json = serde_json::to_value(sim.run().unwrap()).unwrap();
    assert_eq!(json["registers"].as_array().map(Vec::len), Some(32));
    assert_eq!(json["stats"]["instructions_retired"], 1);
}

#[test]
fn tick_advances_one_cycle() {
    let mut sim = simulator(config(10, 100), vec![ECALL]);
    let report = sim.tick().unwrap();
    assert_eq!(report.cycle, 0);
    assert_eq!(sim.cpu.cycle, 1);
    assert_eq!(sim.config().general.max_cycles, 100);
}

#[test]
fn sparse_image_file_is_rejected_against_memory_depth() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sparse.hex");
    std::fs::write(&path, "@00000000\n13 00 00 00\n@01000000\n73 00 00 00\n").unwrap();

    let mut sim = Simulator::new(config(10, 100)).unwrap();
    let err = sim.load_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SimError::Image(ImageError::TooLarge {
            end_word: 0x40_0001,
            capacity: 1024,
        })
    ));
}
