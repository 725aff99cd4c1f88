//! seqcat - concatenate FASTA files.
//!
//! ## Usage
//!
//! ```bash
//! seqcat gene1.fasta gene2.fasta -o combined.fasta
//! seqcat gene*.fasta --sort -o combined.fasta --config partitions.txt
//! seqcat reads1.fasta reads2.fasta --separate -o merged.fasta
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use seqcat::fasta::write_fasta_file;
use seqcat::merge::{merge_files, partition_table, MergeMode};
use seqcat::paths::{non_colliding, sorted_by_numeric_infix};

/// Concatenate FASTA files into a single combined file.
///
/// By default inputs are treated as alignments: each file contributes one
/// block of columns, identifiers missing from a file are filled with '-'
/// over that block, and --config can record which file occupies which
/// column range. With --separate, sequences are concatenated per
/// identifier with no alignment semantics.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input FASTA files to concatenate
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output FASTA file
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Treat inputs as separate sequences instead of aligned blocks
    #[arg(long)]
    separate: bool,

    /// Reorder inputs by the numeric part of their file names (useful when
    /// shell globbing yields gene10 before gene2)
    #[arg(long)]
    sort: bool,

    /// Write a partition table recording each input's column range
    /// (aligned mode only)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prefix for each partition line, e.g. the RAxML model assignment
    #[arg(long, default_value = "DNA, ")]
    prefix: String,

    /// Overwrite the output file if it already exists, instead of picking
    /// a non-colliding name
    #[arg(long)]
    overwrite: bool,

    /// Suppress the echoed command line and the timing report
    #[arg(long)]
    quiet: bool,
}

/// Echoes the effective command line: with --sort, inputs are shown in
/// their sorted order at the end.
fn echo_command_line(inputs: &[PathBuf], sorted: bool) {
    let argv: Vec<String> = std::env::args().collect();
    if sorted {
        let input_args: HashSet<String> = inputs
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let rest: Vec<&str> = argv
            .iter()
            .map(String::as_str)
            .filter(|a| !input_args.contains(*a))
            .collect();
        let ordered: Vec<String> = inputs
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        println!("{} {}\n", rest.join(" "), ordered.join(" "));
    } else {
        println!("{}\n", argv.join(" "));
    }
}

fn main() -> Result<()> {
    let started = Instant::now();
    let args = Args::parse();

    let inputs = if args.sort {
        sorted_by_numeric_infix(&args.inputs)
    } else {
        args.inputs.clone()
    };

    if !args.quiet {
        echo_command_line(&inputs, args.sort);
    }

    let mode = if args.separate {
        MergeMode::Separate
    } else {
        MergeMode::Aligned
    };

    let result = merge_files(&inputs, mode)?;

    for path in &result.skipped {
        eprintln!(
            "Warning: no bases found in {}, skipping this file!",
            path.display()
        );
    }

    if let Some(config_path) = &args.config {
        if mode == MergeMode::Aligned {
            std::fs::write(config_path, partition_table(&args.prefix, &result.partitions))
                .with_context(|| {
                    format!("failed to write partition table to {}", config_path.display())
                })?;
        } else {
            eprintln!("Warning: --config is ignored in --separate mode");
        }
    }

    let out_path = if args.overwrite {
        args.output.clone()
    } else {
        non_colliding(&args.output)
    };

    let wrap_width = result.matrix.wrap_width;
    let records = result.matrix.into_records();
    write_fasta_file(&out_path, &records, wrap_width)?;

    if !args.quiet {
        println!(
            "Wrote {} sequences to {}",
            records.len(),
            out_path.display()
        );
        println!("Cost: {:.3}s", started.elapsed().as_secs_f64());
    }

    Ok(())
}
