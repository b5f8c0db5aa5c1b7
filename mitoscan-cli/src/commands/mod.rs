//! Command implementations for MitoScan CLI

pub mod align;
pub mod list;
pub mod motif;
pub mod reference;

use anyhow::{Context, Result};
use mitoscan_core::{SequenceRecord, Session};
use std::path::Path;

use crate::error::{CliError, CliResult};
use crate::fasta;

/// Load a FASTA file and index every record
pub(crate) fn load_session(path: &Path) -> Result<Session> {
    let records = fasta::load_records(path)?;
    let session = Session::new(records)
        .with_context(|| format!("Failed to index records from {}", path.display()))?;
    log::info!("Indexed {} records", session.len());
    Ok(session)
}

/// Look up a record, listing the available ids on failure
pub(crate) fn require_record<'a>(session: &'a Session, id: &str) -> CliResult<&'a SequenceRecord> {
    session.record(id).ok_or_else(|| CliError::UnknownSequence {
        id: id.to_string(),
        available: session.records().map(|r| r.id.clone()).collect(),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write a small three-record FASTA file
    pub fn sample_fasta() -> NamedTempFile {
        let mut f = tempfile::Builder::new()
            .suffix(".fasta")
            .tempfile()
            .expect("create temp fasta");
        let records = [
            ">ref human reference\nGATCACAGGTCTATCACCC\n",
            ">s1 sample one\nGATCACAGGTCTATCACCC\n",
            ">s2 sample two\nGATCACTGGTCTATGATC\n",
        ];
        write!(f, "{}", records.concat()).expect("write fasta");
        f
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::sample_fasta;
    use super::*;

    #[test]
    fn test_load_session() {
        let f = sample_fasta();
        let session = load_session(f.path()).unwrap();
        assert_eq!(session.len(), 3);
        assert!(require_record(&session, "s1").is_ok());
    }

    #[test]
    fn test_unknown_record_lists_available() {
        let f = sample_fasta();
        let session = load_session(f.path()).unwrap();
        match require_record(&session, "missing") {
            Err(CliError::UnknownSequence { available, .. }) => {
                assert_eq!(available, vec!["ref", "s1", "s2"]);
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.id.clone())),
        }
    }
}
