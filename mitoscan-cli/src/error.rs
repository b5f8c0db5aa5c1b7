//! Error handling for MitoScan CLI

use mitoscan_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// User-facing error type for MitoScan CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Unknown sequence id: {id}")]
    UnknownSequence { id: String, available: Vec<String> },

    #[error("Alignment of {id1} vs {id2} needs {cells} matrix cells (limit {limit})")]
    MatrixTooLarge {
        id1: String,
        id2: String,
        cells: u64,
        limit: u64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CliError {
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat { message: message.into() }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::InvalidFormat { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Provide a FASTA file with a .fa, .fasta or .fna extension (optionally .gz)\n\
                 • Ensure every record starts with a '>' header line",
            );
        }

        CliError::UnknownSequence { available, .. } => {
            if available.is_empty() {
                message.push_str("\n\nThe FASTA file contains no records.");
            } else {
                message.push_str(&format!(
                    "\n\nAvailable ids: {}\n\
                     • Use 'mitoscan list --fasta <file>' to inspect the loaded records",
                    available.join(", ")
                ));
            }
        }

        CliError::MatrixTooLarge { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Raise [align] max_cells in mitoscan.toml if enough memory is available\n\
                 • Align shorter subsequences instead of whole genomes",
            );
        }

        CliError::Core(_) => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_suggestions() {
        let err = CliError::file_not_found(PathBuf::from("genomes.fasta"));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("genomes.fasta"));
    }

    #[test]
    fn test_unknown_sequence_lists_ids() {
        let err = CliError::UnknownSequence {
            id: "NC_99".to_string(),
            available: vec!["NC_01".to_string(), "NC_02".to_string()],
        };
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.starts_with("Unknown sequence id: NC_99"));
        assert!(formatted.contains("NC_01, NC_02"));
    }

    #[test]
    fn test_core_error_conversion() {
        let err: CliError = CoreError::invalid_input("motif must not be empty").into();
        assert_eq!(err.to_string(), "Invalid input: motif must not be empty");
    }
}
