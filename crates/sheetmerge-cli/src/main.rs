//! sheetmerge CLI
//!
//! Command-line driver for the editing session: load, merge, filter, and
//! re-export tabular data files, reporting the four row counters after every
//! mutating operation.

use clap::{Parser, Subcommand};
use sheetmerge_core::{FileFormat, FilterMode, RowCounts, Session};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetmerge")]
#[command(about = "Tabular data editor and merger", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a single file and print its table
    Show {
        /// Path to the input file
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Merge multiple files into one table (union header) and export it
    Merge {
        /// Input files, in merge order
        #[arg(short, long, required = true, num_args = 2..)]
        file: Vec<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (defaults to the output extension)
        #[arg(long)]
        format: Option<FileFormat>,
    },

    /// Concatenate pre-normalized tables (first file's header wins)
    Stack {
        /// Input files, in stacking order
        #[arg(short, long, required = true, num_args = 2..)]
        file: Vec<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (defaults to the output extension)
        #[arg(long)]
        format: Option<FileFormat>,
    },

    /// Delete or keep rows matching a keyword, then export
    Filter {
        /// Path to the input file
        #[arg(short, long)]
        file: PathBuf,

        /// Case-insensitive keyword to match against row text
        #[arg(short, long)]
        keyword: String,

        /// What to do with matching rows: delete them, or keep only them
        #[arg(short, long, default_value = "delete")]
        mode: String,

        /// Print how many rows would be affected without writing anything
        #[arg(long)]
        preview: bool,

        /// Output file path (required unless --preview)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (defaults to the output extension)
        #[arg(long)]
        format: Option<FileFormat>,
    },

    /// Create a blank table and export it
    New {
        /// Number of columns
        #[arg(long, default_value_t = 1)]
        cols: usize,

        /// Number of blank rows
        #[arg(long, default_value_t = 1)]
        rows: usize,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (defaults to the output extension)
        #[arg(long)]
        format: Option<FileFormat>,
    },

    /// Convert a file to another tabular format
    Convert {
        /// Path to the input file
        #[arg(short, long)]
        file: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (defaults to the output extension)
        #[arg(long)]
        format: Option<FileFormat>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> sheetmerge_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { file, limit } => cmd_show(&file, limit),
        Commands::Merge {
            file,
            output,
            format,
        } => cmd_merge(&file, &output, format),
        Commands::Stack {
            file,
            output,
            format,
        } => cmd_stack(&file, &output, format),
        Commands::Filter {
            file,
            keyword,
            mode,
            preview,
            output,
            format,
        } => cmd_filter(&file, &keyword, &mode, preview, output.as_deref(), format),
        Commands::New {
            cols,
            rows,
            output,
            format,
        } => cmd_new(cols, rows, &output, format),
        Commands::Convert {
            file,
            output,
            format,
        } => cmd_convert(&file, &output, format),
    }
}

fn cmd_show(file: &PathBuf, limit: Option<usize>) -> sheetmerge_core::Result<()> {
    let mut session = Session::new();
    let report = session.load(std::slice::from_ref(file))?;

    print_table(session.table(), limit);
    print_counts(&report.counts);
    Ok(())
}

fn cmd_merge(
    files: &[PathBuf],
    output: &std::path::Path,
    format: Option<FileFormat>,
) -> sheetmerge_core::Result<()> {
    let mut session = Session::new();
    let report = session.load(files)?;

    print_skipped(&report.skipped);
    session.export(output, output_format(output, format)?)?;

    println!(
        "Merged {} file(s) into {} ({} rows)",
        report.loaded.len(),
        output.display(),
        report.counts.remaining
    );
    print_counts(&report.counts);
    Ok(())
}

fn cmd_stack(
    files: &[PathBuf],
    output: &std::path::Path,
    format: Option<FileFormat>,
) -> sheetmerge_core::Result<()> {
    let mut session = Session::new();
    let report = session.stack(files)?;

    print_skipped(&report.skipped);
    session.export(output, output_format(output, format)?)?;

    println!(
        "Stacked {} file(s) into {} ({} rows)",
        report.loaded.len(),
        output.display(),
        report.counts.remaining
    );
    print_counts(&report.counts);
    Ok(())
}

fn cmd_filter(
    file: &PathBuf,
    keyword: &str,
    mode: &str,
    preview: bool,
    output: Option<&std::path::Path>,
    format: Option<FileFormat>,
) -> sheetmerge_core::Result<()> {
    let mode = match mode.to_lowercase().as_str() {
        "delete" => FilterMode::Delete,
        "keep" => FilterMode::Keep,
        other => {
            eprintln!("Unknown mode: {}. Supported modes: delete, keep", other);
            std::process::exit(1);
        }
    };

    let mut session = Session::new();
    session.load(std::slice::from_ref(file))?;

    if preview {
        let affected = session.preview(keyword, mode);
        println!("{} row(s) would be removed", affected);
        return Ok(());
    }

    let Some(output) = output else {
        eprintln!("--output is required unless --preview is given");
        std::process::exit(1);
    };

    let report = match mode {
        FilterMode::Delete => session.delete_matching(keyword)?,
        FilterMode::Keep => session.keep_matching(keyword)?,
    };

    if report.removed == 0 {
        println!("No matching rows found; table unchanged.");
    } else {
        println!("Removed {} row(s)", report.removed);
    }
    print_counts(&report.counts);

    session.export(output, output_format(output, format)?)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn cmd_new(
    cols: usize,
    rows: usize,
    output: &std::path::Path,
    format: Option<FileFormat>,
) -> sheetmerge_core::Result<()> {
    let mut session = Session::new();
    let counts = session.new_blank(cols, rows);

    session.export(output, output_format(output, format)?)?;
    println!(
        "Created blank table ({} columns, {} rows) at {}",
        session.table().column_count(),
        counts.remaining,
        output.display()
    );
    print_counts(&counts);
    Ok(())
}

fn cmd_convert(
    file: &PathBuf,
    output: &std::path::Path,
    format: Option<FileFormat>,
) -> sheetmerge_core::Result<()> {
    let mut session = Session::new();
    let report = session.load(std::slice::from_ref(file))?;

    session.export(output, output_format(output, format)?)?;
    println!(
        "Converted {} to {} ({} rows)",
        file.display(),
        output.display(),
        report.counts.remaining
    );
    Ok(())
}

/// Resolve the export format from an explicit flag or the output extension
fn output_format(
    output: &std::path::Path,
    format: Option<FileFormat>,
) -> sheetmerge_core::Result<FileFormat> {
    format
        .or_else(|| FileFormat::from_path(output))
        .ok_or_else(|| sheetmerge_core::Error::UnsupportedFormat {
            path: output.to_path_buf(),
        })
}

fn print_table(table: &sheetmerge_core::Table, limit: Option<usize>) {
    println!("{}", table.header.join("\t"));
    println!("{}", "-".repeat(table.header.len() * 12));

    let row_limit = limit.unwrap_or(table.row_count());
    for row in table.rows.iter().take(row_limit) {
        println!("{}", row.cells.join("\t"));
    }

    if table.row_count() > row_limit {
        println!("... ({} more rows)", table.row_count() - row_limit);
    }
}

fn print_counts(counts: &RowCounts) {
    println!(
        "remaining: {}  original: {}  added: {}  deleted: {}",
        counts.remaining, counts.original, counts.added, counts.deleted
    );
}

fn print_skipped(skipped: &[PathBuf]) {
    if !skipped.is_empty() {
        eprintln!("Skipped {} unsupported file(s):", skipped.len());
        for path in skipped {
            eprintln!("  {}", path.display());
        }
    }
}
