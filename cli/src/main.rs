//! pdf-outline CLI - PDF title and heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::batch::{discover_inputs, run_batch_with_progress};
use pdf_outline::render::to_json;
use pdf_outline::{
    read_file_with_options, BatchOptions, BatchReport, JsonFormat, Outliner, PageSelection,
    ReadOptions,
};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(version)]
#[command(about = "Extract PDF titles and heading outlines to JSON", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Directory containing PDF files
    #[arg(value_name = "INPUT_DIR", env = "PDF_OUTLINE_INPUT", default_value = "input")]
    input: PathBuf,

    /// Directory receiving JSON records
    #[arg(value_name = "OUTPUT_DIR", env = "PDF_OUTLINE_OUTPUT", default_value = "output")]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every PDF in a directory to one JSON file each
    Batch {
        /// Directory containing PDF files
        #[arg(short, long, value_name = "DIR", env = "PDF_OUTLINE_INPUT", default_value = "input")]
        input: PathBuf,

        /// Directory receiving JSON records
        #[arg(short, long, value_name = "DIR", env = "PDF_OUTLINE_OUTPUT", default_value = "output")]
        output: PathBuf,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,

        /// Process one document at a time
        #[arg(long)]
        sequential: bool,

        /// Fail a document on its first unreadable page
        #[arg(long)]
        strict: bool,
    },

    /// Extract the title and outline of one PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Dump the page/block/line/span layout read from a PDF
    Layout {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            compact,
            sequential,
            strict,
        }) => cmd_batch(&input, &output, compact, sequential, strict),
        Some(Commands::Extract {
            input,
            output,
            compact,
            pages,
        }) => cmd_extract(&input, output.as_deref(), compact, pages.as_deref()),
        Some(Commands::Layout { input, pages }) => cmd_layout(&input, pages.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(&cli.input, &cli.output, false, false, false),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn page_selection(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    Ok(match pages {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    })
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    compact: bool,
    sequential: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let read_options = if strict {
        ReadOptions::new()
    } else {
        ReadOptions::new().lenient()
    };
    let options = BatchOptions::new(input, output)
        .with_read_options(read_options)
        .with_format(json_format(compact))
        .with_parallel(!sequential);

    let total = discover_inputs(input)?.len();
    if total == 0 {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            input.display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Extracting outlines...");

    let report = run_batch_with_progress(&options, |outcome| {
        if let Some(name) = outcome.input.file_name() {
            pb.set_message(name.to_string_lossy().to_string());
        }
        pb.inc(1);
    })?;

    pb.finish_with_message("Done!");
    print_summary(&report, output);

    if report.failed() > 0 {
        return Err(format!("{} document(s) failed", report.failed()).into());
    }
    Ok(())
}

fn print_summary(report: &BatchReport, output: &Path) {
    println!();
    println!(
        "{} {} written to {}",
        report.succeeded().to_string().green().bold(),
        "record(s)".green(),
        output.display()
    );

    for outcome in report.failures() {
        if let Some(err) = &outcome.error {
            println!(
                "  {} {}: {}",
                "✗".red(),
                outcome.input.display(),
                err.to_string().dimmed()
            );
        }
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = Outliner::new()
        .lenient()
        .with_pages(page_selection(pages)?)
        .extract(input)?;

    let json = outline.to_json(json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_layout(input: &Path, pages: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let options = ReadOptions::new()
        .lenient()
        .with_pages(page_selection(pages)?);
    let layout = read_file_with_options(input, options)?;

    println!("{}", to_json(&layout, JsonFormat::Pretty)?);

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdf-outline".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("PDF title and heading outline extractor");
    println!();
    println!("License: MIT");
}
