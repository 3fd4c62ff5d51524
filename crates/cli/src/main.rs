//! RV32I pipeline model CLI.
//!
//! This binary is the workload runner for the pipeline model. It performs:
//! 1. **Run:** Load a hex image, tick the core until it halts, print the final
//!    registers and statistics, and optionally check an expected answer.
//! 2. **Disassemble:** List the words of a hex image after loading, the way the
//!    decode table will see them.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use rv32pipe_core::config::{Config, ImageFormat};
use rv32pipe_core::isa::abi;
use rv32pipe_core::isa::disasm::disassemble;
use rv32pipe_core::sim::loader;
use rv32pipe_core::sim::{RunSummary, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "rv32pipe",
    author,
    version,
    about = "Cycle-accurate RV32I five-stage pipeline model",
    long_about = "Run a hex program image on the pipeline model.\n\nExamples:\n  rv32pipe run workloads/sum.data\n  rv32pipe run prog.exe --format words --expect 42\n  rv32pipe run prog.data --trace --max-cycles 5000"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an image until it halts.
    Run {
        /// Hex image (Verilog `@addr` + bytes, or one word per line).
        image: PathBuf,

        /// Image format.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// JSON configuration file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Cycle budget (overrides the configuration).
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Log every pipeline event at DEBUG level.
        #[arg(long)]
        trace: bool,

        /// Expected answer; the run fails if it does not match.
        #[arg(long, value_parser = parse_u32)]
        expect: Option<u32>,

        /// Register holding the answer (`a0`, `x10`, ...).
        #[arg(long, default_value = "a0", value_parser = parse_reg)]
        expect_reg: usize,

        /// Compare `reg % modulo` against `expect % modulo` (0 compares exactly).
        #[arg(long, default_value_t = 256)]
        modulo: u32,

        /// Print the summary as JSON instead of tables.
        #[arg(long)]
        json: bool,
    },

    /// Disassemble an image as it will be placed in memory.
    Disasm {
        /// Hex image.
        image: PathBuf,

        /// Image format.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Leave the halt idiom as written.
        #[arg(long)]
        no_rewrite: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Auto,
    Verilog,
    Words,
}

impl From<FormatArg> for ImageFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Auto => Self::Auto,
            FormatArg::Verilog => Self::Verilog,
            FormatArg::Words => Self::Words,
        }
    }
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).map_err(|e| e.to_string()),
        None => s.parse::<i64>().map_err(|e| e.to_string()).and_then(|v| {
            if (i64::from(i32::MIN)..=i64::from(u32::MAX)).contains(&v) {
                Ok(v as u32)
            } else {
                Err("out of 32-bit range".to_string())
            }
        }),
    };
    parsed.map_err(|e| format!("`{s}`: {e}"))
}

fn parse_reg(s: &str) -> Result<usize, String> {
    abi::parse_reg(s).ok_or_else(|| format!("unknown register `{s}`"))
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("\n[!] FATAL: {msg}");
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            image,
            format,
            config,
            max_cycles,
            trace,
            expect,
            expect_reg,
            modulo,
            json,
        } => {
            init_tracing(trace);
            let mut config = match config {
                Some(path) => Config::from_file(&path).unwrap_or_else(|e| fail(e)),
                None => Config::default(),
            };
            if let Some(f) = format {
                config.image.format = f.into();
            }
            if let Some(n) = max_cycles {
                config.general.max_cycles = n;
            }
            config.general.trace_pipeline |= trace;

            let summary = cmd_run(config, &image);
            report(&summary, json);
            if let Some(want) = expect {
                check_answer(&summary, expect_reg, want, modulo);
            }
        }
        Commands::Disasm {
            image,
            format,
            no_rewrite,
        } => {
            init_tracing(false);
            let mut config = Config::default();
            if let Some(f) = format {
                config.image.format = f.into();
            }
            config.image.rewrite_halt = !no_rewrite;
            cmd_disasm(&config, &image);
        }
    }
}

/// Loads the image and runs it to completion, exiting on any error.
fn cmd_run(config: Config, image: &Path) -> RunSummary {
    let mut sim = Simulator::new(config).unwrap_or_else(|e| fail(e));
    if let Err(e) = sim.load_file(image) {
        fail(e);
    }
    match sim.run() {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            eprintln!("{}", sim.cpu.regs);
            sim.cpu.stats.print();
            process::exit(1);
        }
    }
}

fn report(summary: &RunSummary, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{text}"),
            Err(e) => fail(e),
        }
        return;
    }
    println!("Final registers:");
    for (i, chunk) in summary.registers.chunks(4).enumerate() {
        let row: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(j, v)| {
                let idx = i * 4 + j;
                format!("{:<10}={v:#010x}", format!("x{idx}({})", abi::reg_name(idx)))
            })
            .collect();
        println!("{}", row.join("  "));
    }
    summary.stats.print();
}

fn check_answer(summary: &RunSummary, reg: usize, want: u32, modulo: u32) {
    let got = summary.reg(reg);
    let (got_cmp, want_cmp) = if modulo == 0 {
        (got, want)
    } else {
        (got % modulo, want % modulo)
    };
    if got_cmp == want_cmp {
        println!("[*] PASS: x{reg}({}) = {got} ({got_cmp} mod {modulo})", abi::reg_name(reg));
    } else {
        eprintln!(
            "[!] FAIL: x{reg}({}) = {got} ({got_cmp} mod {modulo}), expected {want} ({want_cmp})",
            abi::reg_name(reg)
        );
        process::exit(2);
    }
}

fn cmd_disasm(config: &Config, image: &Path) {
    let prog = loader::load_image_file(image, &config.image, config.memory.depth_words())
        .unwrap_or_else(|e| fail(e));
    for (i, word) in prog.words.iter().enumerate() {
        let addr = prog.base + (i as u32) * 4;
        println!("{addr:08x}:  {word:08x}  {}", disassemble(*word));
    }
}
