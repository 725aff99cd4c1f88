//! Data model for FASTA concatenation.
//!
//! This module contains the data structures shared by the reader, writer,
//! and merger:
//! - Single sequences and whole parsed files
//! - The combined matrix accumulated during a merge
//! - Partition table entries for the aligned mode

use std::collections::HashMap;

/// Gap character inserted for identifiers missing from an aligned block.
pub const GAP: char = '-';

/// Represents a single sequence with its identifier and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (from the FASTA header, without '>')
    pub id: String,
    /// The sequence data (nucleotides or amino acids)
    pub data: String,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A parsed FASTA file: its records in file order plus the line-wrapping
/// width detected from the first record.
#[derive(Debug, Clone, Default)]
pub struct FastaFile {
    /// All records, in the order they appear in the file
    pub sequences: Vec<Sequence>,
    /// Length of the second sequence line of the first record
    /// (0 if that record fits on a single line, or the file is empty)
    pub wrap_width: usize,
}

impl FastaFile {
    /// Returns the number of records.
    pub fn record_count(&self) -> usize {
        self.sequences.len()
    }

    /// Returns true if the file contributes no bases at all: either it has
    /// no records, or every record's sequence is empty.
    pub fn has_no_bases(&self) -> bool {
        self.sequences.iter().all(|s| s.is_empty())
    }
}

/// One partition table entry: the 1-based column range a single input file
/// occupies in the merged alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionEntry {
    /// Input filename with a trailing `.fasta` stripped
    pub label: String,
    /// First column of the block (1-based, inclusive)
    pub start: usize,
    /// Last column of the block (inclusive)
    pub end: usize,
}

impl std::fmt::Display for PartitionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}-{}", self.label, self.start, self.end)
    }
}

/// The matrix accumulated while merging input files.
///
/// Identifiers keep their first-seen order across all inputs; each maps to
/// the sequence accumulated so far. Finalize with [`into_records`] exactly
/// once, before writing.
///
/// [`into_records`]: CombinedMatrix::into_records
#[derive(Debug, Clone, Default)]
pub struct CombinedMatrix {
    order: Vec<String>,
    by_id: HashMap<String, String>,
    /// Wrap width copied from the first successfully merged input file
    pub wrap_width: usize,
}

impl CombinedMatrix {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an identifier, appending it to the order the first time it
    /// is seen. Later registrations are no-ops.
    pub fn register(&mut self, id: &str) {
        if !self.by_id.contains_key(id) {
            self.order.push(id.to_string());
            self.by_id.insert(id.to_string(), String::new());
        }
    }

    /// Appends sequence data to an identifier's accumulator.
    pub fn append(&mut self, id: &str, data: &str) {
        self.register(id);
        if let Some(acc) = self.by_id.get_mut(id) {
            acc.push_str(data);
        }
    }

    /// Appends a run of `len` gap characters to an identifier's accumulator.
    pub fn append_gaps(&mut self, id: &str, len: usize) {
        self.register(id);
        if let Some(acc) = self.by_id.get_mut(id) {
            acc.extend(std::iter::repeat(GAP).take(len));
        }
    }

    /// Returns the identifiers in first-seen order.
    pub fn identifiers(&self) -> &[String] {
        &self.order
    }

    /// Returns the accumulated sequence for an identifier.
    pub fn sequence(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Returns the number of identifiers.
    pub fn identifier_count(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no identifier has been registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Finalizes the matrix into an ordered record list for writing.
    pub fn into_records(mut self) -> Vec<Sequence> {
        self.order
            .drain(..)
            .map(|id| {
                let data = self.by_id.remove(&id).unwrap_or_default();
                Sequence { id, data }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_creation() {
        let seq = Sequence::new("seq1", "ACGT");
        assert_eq!(seq.id, "seq1");
        assert_eq!(seq.data, "ACGT");
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn test_matrix_keeps_first_seen_order() {
        let mut matrix = CombinedMatrix::new();
        matrix.append("b", "AC");
        matrix.append("a", "GT");
        matrix.append("b", "GG");
        assert_eq!(matrix.identifiers(), ["b", "a"]);
        assert_eq!(matrix.sequence("b"), Some("ACGG"));
        assert_eq!(matrix.sequence("a"), Some("GT"));
    }

    #[test]
    fn test_matrix_gap_fill() {
        let mut matrix = CombinedMatrix::new();
        matrix.append("s1", "ACGT");
        matrix.append_gaps("s2", 4);
        assert_eq!(matrix.sequence("s2"), Some("----"));
    }

    #[test]
    fn test_matrix_into_records() {
        let mut matrix = CombinedMatrix::new();
        matrix.append("s1", "AC");
        matrix.append("s2", "GT");
        let records = matrix.into_records();
        assert_eq!(
            records,
            vec![Sequence::new("s1", "AC"), Sequence::new("s2", "GT")]
        );
    }

    #[test]
    fn test_has_no_bases() {
        let empty = FastaFile::default();
        assert!(empty.has_no_bases());

        let ids_only = FastaFile {
            sequences: vec![Sequence::new("s1", ""), Sequence::new("s2", "")],
            wrap_width: 0,
        };
        assert!(ids_only.has_no_bases());

        let with_bases = FastaFile {
            sequences: vec![Sequence::new("s1", ""), Sequence::new("s2", "AC")],
            wrap_width: 0,
        };
        assert!(!with_bases.has_no_bases());
    }

    #[test]
    fn test_partition_entry_display() {
        let entry = PartitionEntry {
            label: "gene1".to_string(),
            start: 1,
            end: 120,
        };
        assert_eq!(entry.to_string(), "gene1 = 1-120");
    }
}
