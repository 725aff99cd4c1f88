//! Pure filename helpers.
//!
//! Everything here is string manipulation with no IO side effects (except
//! the existence probe in [`non_colliding`]): partition labels, the
//! collision-avoiding output rename, and the numeric ordering used by
//! `--sort`.

use std::path::{Path, PathBuf};

/// Derives a partition label from an input path: the file name with a
/// trailing `.fasta` extension stripped. Other extensions are kept as-is.
pub fn partition_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(".fasta") {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

/// Inserts an underscore before the extension (`out.fasta` becomes
/// `out_.fasta`); names without an extension get a trailing underscore.
pub fn with_underscore(path: &Path) -> PathBuf {
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => path.with_file_name(format!(
            "{}_.{}",
            stem.to_string_lossy(),
            ext.to_string_lossy()
        )),
        _ => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            path.with_file_name(format!("{}_", name))
        }
    }
}

/// Returns a destination path that does not collide with an existing file,
/// by repeatedly applying [`with_underscore`] until the name is free.
pub fn non_colliding(path: &Path) -> PathBuf {
    let mut candidate = path.to_path_buf();
    while candidate.exists() {
        candidate = with_underscore(&candidate);
    }
    candidate
}

/// Returns the inputs reordered by the numeric value of the part of each
/// file name that varies across all of them.
///
/// The longest common prefix and suffix over all names are stripped and the
/// remaining middle is parsed as an integer sort key. When any middle fails
/// to parse, the whole list falls back to a plain lexicographic sort. The
/// input list is never mutated.
pub fn sorted_by_numeric_infix(paths: &[PathBuf]) -> Vec<PathBuf> {
    if paths.len() <= 1 {
        return paths.to_vec();
    }

    let names: Vec<String> = paths
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    let prefix = common_prefix_len(&names);
    let suffix = common_suffix_len(&names);

    let keys: Option<Vec<i64>> = names
        .iter()
        .map(|name| infix(name, prefix, suffix).parse::<i64>().ok())
        .collect();

    let mut order: Vec<usize> = (0..paths.len()).collect();
    match keys {
        Some(keys) => order.sort_by_key(|&i| keys[i]),
        None => order.sort_by(|&a, &b| names[a].cmp(&names[b])),
    }
    order.into_iter().map(|i| paths[i].clone()).collect()
}

/// Length of the longest prefix shared by all names, in bytes.
fn common_prefix_len(names: &[String]) -> usize {
    let first = names[0].as_bytes();
    let mut len = names.iter().map(|n| n.len()).min().unwrap_or(0);
    for name in &names[1..] {
        let bytes = name.as_bytes();
        let mut i = 0;
        while i < len && bytes[i] == first[i] {
            i += 1;
        }
        len = i;
    }
    len
}

/// Length of the longest suffix shared by all names, in bytes.
fn common_suffix_len(names: &[String]) -> usize {
    let first = names[0].as_bytes();
    let mut len = names.iter().map(|n| n.len()).min().unwrap_or(0);
    for name in &names[1..] {
        let bytes = name.as_bytes();
        let mut i = 0;
        while i < len && bytes[bytes.len() - 1 - i] == first[first.len() - 1 - i] {
            i += 1;
        }
        len = i;
    }
    len
}

/// The varying middle of a name once the shared prefix and suffix are
/// stripped. Empty when prefix and suffix overlap.
fn infix(name: &str, prefix: usize, suffix: usize) -> &str {
    let len = name.len();
    let start = prefix.min(len);
    let end = len.saturating_sub(suffix).max(start);
    name.get(start..end).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_partition_label_strips_fasta() {
        assert_eq!(partition_label(Path::new("data/gene1.fasta")), "gene1");
        assert_eq!(partition_label(Path::new("gene1.fa")), "gene1.fa");
        assert_eq!(partition_label(Path::new("x.fasta.fasta")), "x.fasta");
    }

    #[test]
    fn test_with_underscore() {
        assert_eq!(
            with_underscore(Path::new("out.fasta")),
            PathBuf::from("out_.fasta")
        );
        assert_eq!(
            with_underscore(Path::new("dir/out_.fasta")),
            PathBuf::from("dir/out__.fasta")
        );
        assert_eq!(with_underscore(Path::new("out")), PathBuf::from("out_"));
    }

    #[test]
    fn test_non_colliding_skips_existing_names() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.fasta");
        std::fs::write(&target, "").unwrap();
        std::fs::write(dir.path().join("out_.fasta"), "").unwrap();
        assert_eq!(non_colliding(&target), dir.path().join("out__.fasta"));
    }

    #[test]
    fn test_non_colliding_keeps_free_name() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.fasta");
        assert_eq!(non_colliding(&target), target);
    }

    #[test]
    fn test_sort_numeric_not_lexicographic() {
        let sorted = sorted_by_numeric_infix(&paths(&["a10.fasta", "a2.fasta", "a1.fasta"]));
        assert_eq!(sorted, paths(&["a1.fasta", "a2.fasta", "a10.fasta"]));
    }

    #[test]
    fn test_sort_with_directory_prefix() {
        let sorted = sorted_by_numeric_infix(&paths(&["data/gene10.fasta", "data/gene2.fasta"]));
        assert_eq!(sorted, paths(&["data/gene2.fasta", "data/gene10.fasta"]));
    }

    #[test]
    fn test_sort_falls_back_to_lexicographic() {
        let sorted = sorted_by_numeric_infix(&paths(&["ab.fasta", "aa.fasta", "ac.fasta"]));
        assert_eq!(sorted, paths(&["aa.fasta", "ab.fasta", "ac.fasta"]));
    }

    #[test]
    fn test_sort_single_input_unchanged() {
        let sorted = sorted_by_numeric_infix(&paths(&["only.fasta"]));
        assert_eq!(sorted, paths(&["only.fasta"]));
    }
}
