//! aremdump CLI
//!
//! Command-line interface for turning tokenised assembler source images
//! back into plain assembly text
//!
//! Copyright (c) 2025 Michael A Wright

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arem_core::{ContainerHeader, Decoder};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[allow(dead_code)]
mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nhost: ",
    env!("AREMDUMP_BUILD_HOST"),
    "\ncommit: ",
    env!("AREMDUMP_BUILD_COMMIT"),
    "\nbuilt: ",
    env!("AREMDUMP_BUILD_TIME"),
);

#[derive(Parser)]
#[command(name = "aremdump")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Decode tokenised Z80 assembler source images to text", long_about = None)]
struct Cli {
    /// Log decoding details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Tab-separated assembly text
    Text,
    /// JSON document
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one image to assembly text
    Decode {
        /// Input image
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Show the container header of an image
    Info {
        /// Input image
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Decode every .mzf image under a directory
    Batch {
        /// Input directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for .asm files
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for decoded output
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    info!("aremdump {}", built_info::PKG_VERSION);

    match cli.command {
        Commands::Decode {
            input,
            output,
            format,
        } => {
            let data = read_image(&input)?;
            let result = match (format, output) {
                (Format::Text, Some(path)) => create_output(&path)
                    .and_then(|out| write_text(&data, out)),
                (Format::Text, None) => write_text(&data, io::stdout().lock()),
                // JSON is all or nothing: the file only appears once decoding succeeded
                (Format::Json, Some(path)) => listing_json(&data).and_then(|json| {
                    let mut out = create_output(&path)?;
                    out.write_all(json.as_bytes())?;
                    out.flush()?;
                    Ok(())
                }),
                (Format::Json, None) => listing_json(&data).map(|json| print!("{}", json)),
            };
            result.with_context(|| format!("Failed to decode {}", input.display()))
        }
        Commands::Info { input, format } => {
            let data = read_image(&input)?;
            let header = ContainerHeader::parse(&data)
                .with_context(|| format!("Failed to read header of {}", input.display()))?;
            print_header(&header, format)
        }
        Commands::Batch { input, output } => batch(&input, &output),
    }
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    info!("Reading {}", path.display());
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn create_output(path: &Path) -> Result<BufWriter<fs::File>> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Write decoded lines as they are produced; text already written stays on failure
fn write_text<W: Write>(data: &[u8], mut out: W) -> Result<()> {
    let mut count = 0usize;
    for line in Decoder::new(data)? {
        let line = line?;
        writeln!(out, "{}", line.text)?;
        count += 1;
    }
    info!("Decoded {} line(s)", count);

    out.flush()?;
    Ok(())
}

/// Whole listing as pretty JSON, newline-terminated
fn listing_json(data: &[u8]) -> Result<String> {
    let listing = Decoder::new(data)?.into_listing()?;
    info!("Decoded {} line(s)", listing.lines.len());
    let mut json = serde_json::to_string_pretty(&listing)?;
    json.push('\n');
    Ok(json)
}

fn print_header(header: &ContainerHeader, format: Format) -> Result<()> {
    match format {
        Format::Text => {
            println!("type:    {:02X}H", header.file_type);
            println!("name:    {}", header.name);
            println!("size:    {}", header.size);
            println!("load:    {:04X}H", header.load_address);
            println!("exec:    {:04X}H", header.exec_address);
            println!("comment: {}", header.comment);
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(header)?);
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mzf"))
        .unwrap_or(false)
}

fn batch(input: &Path, output: &Path) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let mut decoded = 0usize;
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", input.display()))?;
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }

        let source = entry.path();
        let target = output
            .join(source.file_stem().unwrap_or_default())
            .with_extension("asm");

        let data = read_image(source)?;
        write_text(&data, create_output(&target)?)
            .with_context(|| format!("Failed to decode {}", source.display()))?;

        println!("{} -> {}", source.display(), target.display());
        decoded += 1;
    }

    info!("Batch decoded {} image(s)", decoded);
    Ok(())
}
