//! FASTA loading for the CLI

use crate::error::{CliError, CliResult};
use mitoscan_core::SequenceRecord;
use std::path::Path;

const FASTA_EXTENSIONS: [&str; 3] = [".fa", ".fasta", ".fna"];

/// Whether `path` carries an accepted FASTA extension
pub fn has_fasta_extension(path: &Path) -> bool {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_ascii_lowercase(),
        None => return false,
    };
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    FASTA_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Split a header line into id (first word) and description (the rest)
pub fn split_header(header: &str) -> (String, String) {
    let header = header.trim();
    match header.split_once(char::is_whitespace) {
        Some((id, description)) => (id.to_string(), description.trim().to_string()),
        None => (header.to_string(), String::new()),
    }
}

/// Read every record of a FASTA file
pub fn load_records(path: &Path) -> CliResult<Vec<SequenceRecord>> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }
    if !has_fasta_extension(path) {
        return Err(CliError::invalid_format(format!(
            "{} is not a FASTA file",
            path.display()
        )));
    }

    let mut reader = needletail::parse_fastx_file(path).map_err(|e| {
        CliError::invalid_format(format!("failed to open {}: {}", path.display(), e))
    })?;

    let mut records = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| {
            CliError::invalid_format(format!("failed to parse {}: {}", path.display(), e))
        })?;
        let header = String::from_utf8_lossy(record.id());
        let (id, description) = split_header(&header);
        records.push(SequenceRecord::new(id, description, record.seq().into_owned()));
    }

    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_fasta(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut f = Builder::new().suffix(suffix).tempfile().expect("create temp fasta");
        write!(f, "{}", contents).expect("write fasta");
        f
    }

    #[test]
    fn test_extension_check() {
        assert!(has_fasta_extension(Path::new("genomes.fasta")));
        assert!(has_fasta_extension(Path::new("dir/genomes.FA")));
        assert!(has_fasta_extension(Path::new("genomes.fna.gz")));
        assert!(!has_fasta_extension(Path::new("genomes.txt")));
        assert!(!has_fasta_extension(Path::new("genomes.gz")));
    }

    #[test]
    fn test_split_header() {
        assert_eq!(
            split_header("NC_012920.1 Homo sapiens mitochondrion"),
            ("NC_012920.1".to_string(), "Homo sapiens mitochondrion".to_string())
        );
        assert_eq!(split_header("seq1"), ("seq1".to_string(), String::new()));
    }

    #[test]
    fn test_load_multiline_records() {
        let f = write_fasta(">s1 first genome\nGATC\nGATC\n>s2\nAAAA\n", ".fasta");
        let records = load_records(f.path()).expect("load");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "s1");
        assert_eq!(records[0].description, "first genome");
        assert_eq!(records[0].sequence, b"GATCGATC".to_vec());
        assert_eq!(records[1].id, "s2");
        assert_eq!(records[1].sequence, b"AAAA".to_vec());
    }

    #[test]
    fn test_wrong_extension_rejected() {
        let f = write_fasta(">s1\nACGT\n", ".txt");
        assert!(matches!(load_records(f.path()), Err(CliError::InvalidFormat { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = load_records(Path::new("/nonexistent/genomes.fasta"));
        assert!(matches!(result, Err(CliError::FileNotFound { .. })));
    }
}
