//! # seqcat - FASTA concatenation
//!
//! Merges multiple FASTA files into one combined file, either as a
//! column-aligned supermatrix (gap-filling identifiers missing from a
//! block, with an optional partition table for downstream phylogenetic
//! tools) or as plain per-identifier concatenation of unaligned sequences.
//!
//! ## Architecture
//!
//! - `model`: sequences, parsed files, the combined matrix, partitions
//! - `fasta`: FASTA parsing and writing with wrap-width round-tripping
//! - `merge`: the two-pass merge with consistency checks and gap filling
//! - `paths`: pure filename helpers (sorting, labels, collision renaming)

pub mod fasta;
pub mod merge;
pub mod model;
pub mod paths;
