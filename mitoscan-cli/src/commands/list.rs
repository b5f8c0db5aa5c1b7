//! List command - summarise the records in a FASTA file

use anyhow::Result;
use mitoscan_core::SequenceRecord;
use std::fmt::Write as _;
use std::path::Path;

use crate::fasta;

pub fn execute(fasta_path: &Path) -> Result<()> {
    let records = fasta::load_records(fasta_path)?;
    print!("{}", render_text(&records)?);
    Ok(())
}

pub(crate) fn render_text(records: &[SequenceRecord]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "id\tlength\tgc%\tdescription")?;
    for record in records {
        writeln!(
            out,
            "{}\t{}\t{:.2}\t{}",
            record.id,
            record.len(),
            record.gc_content(),
            record.description
        )?;
    }
    Ok(out)
}
