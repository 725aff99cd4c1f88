//! FASTA reading and writing.
//!
//! The reader parses a whole file into ordered records and detects the
//! line-wrapping width of the original file; the writer re-emits records
//! either unwrapped or re-wrapped at a given width, so a read/write pair
//! round-trips the input.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{FastaFile, Sequence};

/// Errors that can occur during FASTA IO.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses FASTA content from a string.
///
/// A line starting with `>` opens a new record; its identifier is the rest
/// of the line, trimmed. All following lines up to the next header are
/// concatenated into the record's sequence with every whitespace character
/// removed. Content before the first `>` is ignored. Records whose
/// accumulated sequence is empty are kept, so callers can still run
/// consistency checks over them.
///
/// The wrap width is the length of the second sequence line of the first
/// record, 0 when that record has at most one line.
pub fn parse_fasta_str(content: &str) -> FastaFile {
    let mut sequences: Vec<Sequence> = Vec::new();
    let mut current: Option<Sequence> = None;
    let mut body_lines = 0;
    let mut wrap_width = 0;

    for line in content.lines() {
        if let Some(header) = line.strip_prefix('>') {
            if let Some(seq) = current.take() {
                sequences.push(seq);
            }
            current = Some(Sequence::new(header.trim(), String::new()));
            body_lines = 0;
        } else if let Some(seq) = current.as_mut() {
            let cleaned: String = line.chars().filter(|c| !c.is_whitespace()).collect();
            if sequences.is_empty() && body_lines == 1 {
                wrap_width = cleaned.len();
            }
            seq.data.push_str(&cleaned);
            body_lines += 1;
        }
    }

    if let Some(seq) = current.take() {
        sequences.push(seq);
    }

    FastaFile {
        sequences,
        wrap_width,
    }
}

/// Reads and parses a FASTA file.
pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<FastaFile> {
    let path = path.as_ref();
    let read = || -> io::Result<String> {
        let file = File::open(path)?;
        let size = file.metadata().map(|m| m.len() as usize).unwrap_or(0);
        let mut reader = BufReader::with_capacity(1024 * 1024, file);
        let mut content = String::with_capacity(size);
        reader.read_to_string(&mut content)?;
        Ok(content)
    };
    let content = read().map_err(|source| FastaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_fasta_str(&content))
}

/// Formats records as FASTA text.
///
/// With `wrap_width == 0` each sequence goes on a single line. Otherwise the
/// sequence is split into chunks of exactly `wrap_width` characters, and the
/// remainder is always emitted as one final line, even when it is empty
/// because the length is an exact multiple of the width.
pub fn format_fasta(records: &[Sequence], wrap_width: usize) -> String {
    let total: usize = records.iter().map(|s| s.id.len() + s.len() + 3).sum();
    let mut out = String::with_capacity(total);

    for seq in records {
        out.push('>');
        out.push_str(&seq.id);
        out.push('\n');

        if wrap_width == 0 {
            out.push_str(&seq.data);
            out.push('\n');
        } else {
            let full_chunks = seq.len() / wrap_width;
            for i in 0..full_chunks {
                out.push_str(&seq.data[i * wrap_width..(i + 1) * wrap_width]);
                out.push('\n');
            }
            out.push_str(&seq.data[full_chunks * wrap_width..]);
            out.push('\n');
        }
    }

    out
}

/// Writes records to a FASTA file, re-wrapped at `wrap_width`.
///
/// The destination's parent directory must already exist; collision handling
/// is the caller's responsibility (see [`crate::paths::non_colliding`]).
pub fn write_fasta_file<P: AsRef<Path>>(
    path: P,
    records: &[Sequence],
    wrap_width: usize,
) -> FastaResult<()> {
    let path = path.as_ref();
    let write = || -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(format_fasta(records, wrap_width).as_bytes())
    };
    write().map_err(|source| FastaError::Write {
        path: path.to_path_buf(),
        source,
    })
}
