//! JFZ CLI - Command-line tool for JSON Folder Zip
//!
//! This binary provides command-line interfaces for:
//! - pack: convert a JSON document → .zip folder tree
//! - ls: list entries of a produced archive
//! - stats: report statistics for a JSON document without packing it

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use jfz_archive::{analyze, convert, sanitize, Codec, ConvertOptions, Limits};
use serde_json::Value;
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "jfz")]
#[command(about = "JSON Folder Zip CLI tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON document into a .zip folder tree
    Pack {
        /// Input file (JSON)
        input: PathBuf,
        /// Output file (.zip)
        #[arg(short, long)]
        output: PathBuf,
        /// Root folder name (defaults to the input file stem)
        #[arg(long)]
        root_name: Option<String>,
        /// Skip the generated _metadata.json entry
        #[arg(long)]
        no_metadata: bool,
        /// Skip the generated README.md entry
        #[arg(long)]
        no_readme: bool,
        /// Suffix generated file names with the conversion timestamp
        #[arg(long)]
        timestamp_files: bool,
        /// Extension for non-string scalar values
        #[arg(long, default_value = ".json")]
        default_extension: String,
        /// Deflate compression level (0-9)
        #[arg(long, default_value = "6")]
        level: u32,
        /// Store entries without compression
        #[arg(long, conflicts_with = "level")]
        store: bool,
        /// Maximum nesting depth before the conversion fails
        #[arg(long)]
        max_depth: Option<usize>,
        /// Show progress spinner while packing
        #[arg(long)]
        progress: bool,
    },
    /// List entries of a .zip archive
    ///
    /// Examples:
    ///   jfz ls out.zip
    ///   jfz ls out.zip --verbose --format json
    Ls {
        /// Input file (.zip)
        input: PathBuf,
        /// Output format (table, json)
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Verbose output with entry sizes
        #[arg(long, short = 'v')]
        verbose: bool,
    },
    /// Report statistics for a JSON document
    ///
    /// Examples:
    ///   jfz stats data.json
    ///   jfz stats data.json --format json
    Stats {
        /// Input file (JSON)
        input: PathBuf,
        /// Output format (table, json)
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pack {
            input,
            output,
            root_name,
            no_metadata,
            no_readme,
            timestamp_files,
            default_extension,
            level,
            store,
            max_depth,
            progress,
        } => {
            handle_pack(
                input,
                output,
                root_name,
                !no_metadata,
                !no_readme,
                timestamp_files,
                default_extension,
                level,
                store,
                max_depth,
                progress,
            )?;
        }
        Commands::Ls {
            input,
            format,
            verbose,
        } => {
            handle_ls(input, format, verbose)?;
        }
        Commands::Stats { input, format } => {
            handle_stats(input, format)?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_pack(
    input: PathBuf,
    output: PathBuf,
    root_name: Option<String>,
    include_metadata: bool,
    create_readme: bool,
    timestamp_files: bool,
    default_extension: String,
    level: u32,
    store: bool,
    max_depth: Option<usize>,
    show_progress: bool,
) -> Result<(), Box<dyn Error>> {
    if !store && level > 9 {
        return Err(format!("deflate level {level} out of range (0-9)").into());
    }

    let start = Instant::now();
    let value = parse_input(&input)?;
    let root_name = root_name.unwrap_or_else(|| default_root_name(&input));

    let mut limits = Limits::default();
    if let Some(max_depth) = max_depth {
        limits.max_depth = max_depth;
    }
    let options = ConvertOptions {
        include_metadata,
        create_readme,
        timestamp_files,
        default_extension,
        codec: if store { Codec::Stored } else { Codec::Deflated(level) },
        limits,
        cancel: None,
    };

    let mut progress_bar = show_progress.then(|| create_spinner("Packing JSON value"));
    let statistics = analyze(&value);
    let bytes = convert(&value, &root_name, &options)?;
    std::fs::write(&output, &bytes)?;
    let elapsed = start.elapsed();

    if let Some(pb) = progress_bar.take() {
        pb.finish_with_message(format!(
            "Packed {} files in {:.2?}",
            statistics.file_count, elapsed
        ));
    }

    let mut stderr = std::io::stderr().lock();
    writeln!(
        &mut stderr,
        "Packed to {} (files: {}, objects: {}, arrays: {}, max depth: {}, bytes written: {}, elapsed: {:.2?})",
        output.display(),
        statistics.file_count,
        statistics.object_count,
        statistics.array_count,
        statistics.max_depth,
        bytes.len(),
        elapsed
    )?;
    Ok(())
}

fn handle_ls(
    input: PathBuf,
    format: OutputFormat,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let file = File::open(&input)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        entries.push((
            entry.name().to_string(),
            entry.size(),
            entry.compressed_size(),
        ));
    }

    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Table => {
            for (name, size, compressed) in &entries {
                if verbose {
                    writeln!(&mut stdout, "{name}\t{size}\t{compressed}")?;
                } else {
                    writeln!(&mut stdout, "{name}")?;
                }
            }
            writeln!(&mut stdout, "{} entries", entries.len())?;
        }
        OutputFormat::Json => {
            let entries: Vec<Value> = entries
                .iter()
                .map(|(name, size, compressed)| {
                    if verbose {
                        serde_json::json!({
                            "name": name,
                            "size": size,
                            "compressed_size": compressed,
                        })
                    } else {
                        serde_json::json!({ "name": name })
                    }
                })
                .collect();
            let listing = serde_json::json!({
                "archive": input.display().to_string(),
                "count": entries.len(),
                "entries": entries,
            });
            writeln!(&mut stdout, "{}", serde_json::to_string_pretty(&listing)?)?;
        }
    }
    Ok(())
}

fn handle_stats(input: PathBuf, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    let value = parse_input(&input)?;
    let statistics = analyze(&value);

    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Table => {
            writeln!(&mut stdout, "objects\t{}", statistics.object_count)?;
            writeln!(&mut stdout, "arrays\t{}", statistics.array_count)?;
            writeln!(&mut stdout, "files\t{}", statistics.file_count)?;
            writeln!(&mut stdout, "max depth\t{}", statistics.max_depth)?;
        }
        OutputFormat::Json => {
            writeln!(
                &mut stdout,
                "{}",
                serde_json::to_string_pretty(&statistics)?
            )?;
        }
    }
    Ok(())
}

/// Parse the input document, surfacing serde_json's syntax message on failure
fn parse_input(path: &Path) -> Result<Value, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("reading {} failed: {e}", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|e| format!("invalid JSON in {}: {e}", path.display()).into())
}

fn default_root_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("root");
    let safe = sanitize(stem);
    if safe.is_empty() {
        "root".to_string()
    } else {
        safe
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
