//! Merging of FASTA files into a combined matrix.
//!
//! Inputs are processed in two explicit passes. The first pass reads and
//! validates every file and discovers the complete identifier set; the
//! second accumulates sequences per identifier, gap-filling identifiers a
//! block does not cover. Discovering identifiers up front means a file that
//! introduces a brand-new identifier still receives gap runs for every
//! earlier block.
//!
//! In aligned mode each input file must be internally consistent (all
//! records the same length); any violation aborts the whole merge before
//! anything is written. Files contributing no bases at all are skipped and
//! reported back to the caller, not treated as errors.

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::fasta::{read_fasta_file, FastaError};
use crate::model::{CombinedMatrix, FastaFile, PartitionEntry};
use crate::paths::partition_label;

/// Errors that can occur during a merge.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error(transparent)]
    Fasta(#[from] FastaError),

    #[error(
        "unequal sequence length between '{first_id}' ({expected}) and \
         '{mismatched_id}' ({found}) in {file}"
    )]
    UnequalLengths {
        file: String,
        first_id: String,
        expected: usize,
        mismatched_id: String,
        found: usize,
    },

    #[error("nothing to merge: no input file contained any bases")]
    NothingToMerge,
}

/// How input files are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Column-wise concatenation of alignments, gap-filling missing
    /// identifiers per block
    Aligned,
    /// Plain per-identifier concatenation of unaligned sequences
    Separate,
}

/// The outcome of a successful merge.
#[derive(Debug)]
pub struct MergeResult {
    /// The combined matrix, identifiers in first-seen order
    pub matrix: CombinedMatrix,
    /// One entry per merged file in input order (aligned mode; empty in
    /// separate mode)
    pub partitions: Vec<PartitionEntry>,
    /// Input files skipped because they contained no bases
    pub skipped: Vec<PathBuf>,
}

/// An input that survived loading and validation.
struct LoadedFile {
    label: String,
    fasta: FastaFile,
    /// Length of the file's first record (the block length in aligned mode)
    block_length: usize,
}

/// Merges the given FASTA files into a combined matrix.
///
/// Files are read in the given order; the output wrap width is taken from
/// the first file that actually contributes bases.
pub fn merge_files(paths: &[PathBuf], mode: MergeMode) -> Result<MergeResult, MergeError> {
    // Pass 1: load, validate per-file consistency, discover all identifiers.
    let mut loaded = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();

    for path in paths {
        let fasta = read_fasta_file(path)?;
        if fasta.has_no_bases() {
            skipped.push(path.clone());
            continue;
        }

        let first = &fasta.sequences[0];
        let block_length = first.len();
        if mode == MergeMode::Aligned {
            if let Some(mismatch) = fasta.sequences[1..]
                .iter()
                .find(|seq| seq.len() != block_length)
            {
                return Err(MergeError::UnequalLengths {
                    file: path.display().to_string(),
                    first_id: first.id.clone(),
                    expected: block_length,
                    mismatched_id: mismatch.id.clone(),
                    found: mismatch.len(),
                });
            }
        }

        loaded.push(LoadedFile {
            label: partition_label(path),
            fasta,
            block_length,
        });
    }

    if loaded.is_empty() {
        return Err(MergeError::NothingToMerge);
    }

    let mut matrix = CombinedMatrix::new();
    matrix.wrap_width = loaded[0].fasta.wrap_width;
    for file in &loaded {
        for seq in &file.fasta.sequences {
            matrix.register(&seq.id);
        }
    }
    let all_ids: Vec<String> = matrix.identifiers().to_vec();

    // Pass 2: accumulate per block, gap-filling identifiers the block
    // does not cover.
    let mut partitions = Vec::new();
    let mut running = 0;
    for file in &loaded {
        let mut updated: HashSet<&str> = HashSet::with_capacity(file.fasta.record_count());
        for seq in &file.fasta.sequences {
            matrix.append(&seq.id, &seq.data);
            updated.insert(seq.id.as_str());
        }

        if mode == MergeMode::Aligned {
            for id in &all_ids {
                if !updated.contains(id.as_str()) {
                    matrix.append_gaps(id, file.block_length);
                }
            }
            partitions.push(PartitionEntry {
                label: file.label.clone(),
                start: running + 1,
                end: running + file.block_length,
            });
            running += file.block_length;
        }
    }

    Ok(MergeResult {
        matrix,
        partitions,
        skipped,
    })
}

/// Formats a partition table, one `<prefix><label> = <start>-<end>` line
/// per entry.
pub fn partition_table(prefix: &str, partitions: &[PartitionEntry]) -> String {
    partitions
        .iter()
        .map(|entry| format!("{}{}\n", prefix, entry))
        .collect()
}
