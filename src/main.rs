//! secretome - Bacterial Secretome Dashboard
//!
//! A terminal dashboard for a table of bacterial secretome proteins.
//!
//! ## Usage
//!
//! ```bash
//! secretome                                   # dashboard on the default table
//! secretome --data proteins.xlsx              # another table
//! secretome --gc ATGCGC                       # print GC content and exit
//! secretome --search toxin -o hits.csv        # export matching rows and exit
//! ```
//!
//! ## Views
//!
//! - About Disease: educational text
//! - Search Protein: case-insensitive search on `Protein Name`
//! - GC Content Tool: GC percentage of a DNA sequence
//! - View Database: the whole table

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;

use secretome::controller::run_app;
use secretome::formats::delimited::write_delimited;
use secretome::formats::{load, DataFormat, DEFAULT_DATA_PATH};
use secretome::gc::{compute_gc, GcError};
use secretome::logging::{default_log_path, init_file_logging, init_stderr_logging};
use secretome::model::AppState;
use secretome::search::{search, summary, SearchOutcome};
use secretome::ui::glyphs;

/// Runs CLI mode for the GC tool: print the GC content of `sequence`.
fn run_gc_cli(sequence: &str) -> Result<()> {
    match compute_gc(sequence) {
        Ok(gc) => {
            println!("GC Content: {}", gc);
            Ok(())
        }
        // Empty input: nothing to compute, nothing to report
        Err(GcError::Empty) => Ok(()),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Runs CLI mode for the search: write matching rows as CSV to `output`.
fn run_search_cli(
    data: &Path,
    forced_format: Option<DataFormat>,
    query: &str,
    output: &str,
) -> Result<()> {
    let outcome = load(data, forced_format);
    if let Some(message) = outcome.message() {
        anyhow::bail!("{}", message);
    }
    let dataset = outcome.dataset;
    if dataset.is_empty() {
        anyhow::bail!("Load the dataset to use this feature.");
    }

    let records = match search(&dataset, query) {
        SearchOutcome::NotPerformed => return Ok(()),
        SearchOutcome::NoMatch => Vec::new(),
        SearchOutcome::Found(records) => records,
    };

    if output == "-" {
        let stdout = io::stdout();
        write_delimited(stdout.lock(), dataset.columns(), &records)?;
    } else {
        let file = std::fs::File::create(output)?;
        write_delimited(file, dataset.columns(), &records)?;
    }
    eprintln!("{}", summary(records.len()));

    Ok(())
}

/// File format specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Comma-separated text
    Csv,
    /// Tab-separated text
    Tsv,
    /// Excel or OpenDocument workbook (first sheet)
    Spreadsheet,
    /// Auto-detect from extension and content
    Auto,
}

impl From<FormatArg> for Option<DataFormat> {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Some(DataFormat::Csv),
            FormatArg::Tsv => Some(DataFormat::Tsv),
            FormatArg::Spreadsheet => Some(DataFormat::Spreadsheet),
            FormatArg::Auto => None,
        }
    }
}

/// secretome - A terminal dashboard for bacterial secretome proteins
///
/// Without --gc or --search, opens the interactive dashboard.
/// With --gc or --search, runs in CLI mode and prints the result.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Protein table to load (CSV, TSV, or spreadsheet with a "Protein Name" column)
    #[arg(short = 'd', long = "data", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Force a specific file format (overrides auto-detection)
    #[arg(short = 'f', long = "format", value_enum, default_value = "auto")]
    format: FormatArg,

    /// Use Unicode symbols instead of plain ASCII
    #[arg(long = "fancy")]
    fancy: bool,

    /// Print the GC content of a DNA sequence and exit
    #[arg(long = "gc", value_name = "SEQUENCE", conflicts_with = "search")]
    gc: Option<String>,

    /// Write proteins whose name contains QUERY (case-insensitive) as CSV and exit
    #[arg(short = 's', long = "search", value_name = "QUERY")]
    search: Option<String>,

    /// Output file for --search. Use "-" for stdout (default).
    #[arg(short = 'o', long = "output", requires = "search")]
    output: Option<String>,

    /// Log level filter (RUST_LOG takes precedence)
    #[arg(long = "log-level", default_value = "info")]
    log_level: String,

    /// Log file for the dashboard (default: a new file in the temp directory)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let forced_format: Option<DataFormat> = args.format.into();

    // CLI mode: result to stdout, logs to stderr
    if let Some(sequence) = &args.gc {
        init_stderr_logging("warn")?;
        return run_gc_cli(sequence);
    }
    if let Some(query) = &args.search {
        init_stderr_logging("warn")?;
        let output = args.output.as_deref().unwrap_or("-");
        return run_search_cli(&args.data, forced_format, query, output);
    }

    // Dashboard mode: the terminal is taken, so logs go to a file
    let log_path = args.log_file.unwrap_or_else(default_log_path);
    init_file_logging(&log_path, &args.log_level)?;
    info!("Starting secretome dashboard (log file {})", log_path.display());

    let outcome = load(&args.data, forced_format);
    let message = outcome.message();
    let state = AppState::new(outcome.dataset, message);

    run_app(state, glyphs::select(args.fancy))?;
    info!("Exiting");

    Ok(())
}
