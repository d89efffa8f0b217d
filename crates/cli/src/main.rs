//! AArch64 user-mode emulator CLI.
//!
//! This binary loads a statically linked AArch64 ELF executable and runs it.
//! It performs:
//! 1. **Configuration:** Defaults, an optional JSON file, then command-line overrides.
//! 2. **Loading:** Builds the process image (segments, BSS, stack).
//! 3. **Execution:** Runs the fetch-execute loop until a fault or the step limit,
//!    then prints the stop reason and the register state.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use a64emu_core::config::Config;
use a64emu_core::sim::{Emulator, StopReason, load_elf_file};

#[derive(Parser, Debug)]
#[command(
    name = "a64emu",
    author,
    version,
    about = "AArch64 user-mode emulator",
    long_about = "Load a statically linked AArch64 ELF executable and interpret it.\n\nLog output is controlled by RUST_LOG (default: info).\n\nExamples:\n  a64emu run hello\n  a64emu run hello --max-instructions 1000 --trace\n  a64emu run hello --config run.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an executable until it faults or hits the instruction limit.
    Run {
        /// ELF executable to run.
        file: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop after this many instructions.
        #[arg(short = 'n', long)]
        max_instructions: Option<u64>,

        /// Trace every executed instruction.
        #[arg(long)]
        trace: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            config,
            max_instructions,
            trace,
        } => cmd_run(&file, config, max_instructions, trace),
    }
}

/// Installs the log subscriber; `--trace` raises the default filter so
/// per-instruction events are visible.
fn init_logging(trace: bool) {
    let default = if trace { "trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads `file`, runs it, and reports the outcome.
///
/// Exits with success when the step limit is reached and failure on a load
/// error or execution fault.
fn cmd_run(
    file: &Path,
    config_path: Option<PathBuf>,
    max_instructions: Option<u64>,
    trace: bool,
) -> ExitCode {
    init_logging(trace);

    let mut config = match config_path.map_or_else(|| Ok(Config::default()), Config::from_file) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if max_instructions.is_some() {
        config.general.max_instructions = max_instructions;
    }
    config.general.trace_instructions |= trace;

    let image = match load_elf_file(file, &config.memory) {
        Ok(image) => image,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut emu = Emulator::new(image, &config);
    let summary = emu.run();

    match summary.stop {
        StopReason::StepLimit => {
            println!("[*] Stopped after {} instructions (limit reached)", summary.executed);
        }
        StopReason::Fault(e) => {
            println!("[!] Stopped after {} instructions: {e}", summary.executed);
        }
    }
    emu.cpu.dump_state();

    match summary.stop {
        StopReason::StepLimit => ExitCode::SUCCESS,
        StopReason::Fault(_) => ExitCode::FAILURE,
    }
}
