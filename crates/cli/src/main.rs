//! MIPS pipeline simulator CLI.
//!
//! This binary loads a program of 32-bit binary words and performs:
//! 1. **Disassembly:** Writes one listing line per input word.
//! 2. **Simulation:** Runs the pipeline to `BREAK`, writing a report after every cycle.
//! 3. **Statistics:** Optionally prints the run summary to stdout.
//!
//! Logs go to stderr; set `RUST_LOG` or pass `--trace` to see stage activity.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mipssim_core::isa::disasm::listing_line;
use mipssim_core::sim::{CycleReport, load_program};
use mipssim_core::{Config, SimError, Simulator};

/// Layout of the per-cycle simulation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable text blocks.
    Text,
    /// One JSON object per cycle, one per line.
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "mipssim",
    author,
    version,
    about = "Cycle-accurate MIPS subset pipeline simulator",
    long_about = "Disassemble a program of 32-bit binary words and simulate it cycle by cycle.\n\nExamples:\n  mipssim sample.txt\n  mipssim sample.txt --simulation out.json --format json --stats\n  mipssim sample.txt --config machine.json --trace"
)]
struct Cli {
    /// Program file: one 32-character binary word per line.
    input: PathBuf,

    /// Where to write the disassembly listing.
    #[arg(long, default_value = "disassembly.txt")]
    disassembly: PathBuf,

    /// Where to write the per-cycle simulation report.
    #[arg(long, default_value = "simulation.txt")]
    simulation: PathBuf,

    /// JSON configuration file; built-in defaults are used when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report layout.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print run statistics to stdout when the simulation ends.
    #[arg(long)]
    stats: bool,

    /// Trace every instruction movement to stderr.
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.trace);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr subscriber; `RUST_LOG` wins unless `--trace` is given.
fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("warn,mipssim_core=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config, SimError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let json = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
    Config::from_json(&json)
}

fn create(path: &Path) -> Result<BufWriter<File>, SimError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| SimError::io(path, e))
}

fn write_report(
    out: &mut impl Write,
    report: &CycleReport,
    format: Format,
) -> std::io::Result<()> {
    match format {
        Format::Text => write!(out, "{report}"),
        Format::Json => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)
        }
    }
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let mut config = load_config(cli.config.as_deref())?;
    config.general.trace_instructions |= cli.trace;
    config.validate()?;

    let program = load_program(&cli.input, config.memory.base_address)?;

    let mut listing = create(&cli.disassembly)?;
    for inst in program.records() {
        writeln!(listing, "{}", listing_line(inst))
            .map_err(|e| SimError::io(&cli.disassembly, e))?;
    }
    listing
        .flush()
        .map_err(|e| SimError::io(&cli.disassembly, e))?;

    let mut sim = Simulator::new(&program, &config);
    let mut out = create(&cli.simulation)?;
    let cycles = sim.run_with(|report| {
        write_report(&mut out, report, cli.format).map_err(|e| SimError::io(&cli.simulation, e))
    })?;
    out.flush().map_err(|e| SimError::io(&cli.simulation, e))?;

    tracing::info!(cycles, "reports written");
    if cli.stats {
        println!("{}", sim.stats());
    }
    Ok(())
}
