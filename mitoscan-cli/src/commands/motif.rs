//! Motif command - locate a motif in every loaded record

use anyhow::Result;
use mitoscan_core::RecordMotifHits;
use std::fmt::Write as _;
use std::path::Path;

use super::load_session;

/// Positions listed per record before the text report truncates
const MAX_LISTED_POSITIONS: usize = 20;

pub fn execute(fasta: &Path, motif: &str, json: bool) -> Result<()> {
    log::info!("Searching for motif '{}'", motif);

    let session = load_session(fasta)?;
    let hits = session.find_motif(motif.as_bytes())?;
    let total: usize = hits.iter().map(|h| h.result.count()).sum();

    log::info!("Found {} occurrences across {} records", total, hits.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        print!("{}", render_text(&hits)?);
    }

    Ok(())
}

pub(crate) fn render_text(hits: &[RecordMotifHits]) -> Result<String> {
    let mut out = String::new();
    for hit in hits {
        let positions = hit.result.positions();
        write!(out, "{}\t{}", hit.id, hit.result.count())?;
        if !positions.is_empty() {
            let listed: Vec<String> = positions
                .iter()
                .take(MAX_LISTED_POSITIONS)
                .map(|p| p.to_string())
                .collect();
            write!(out, "\t{}", listed.join(","))?;
            if positions.len() > MAX_LISTED_POSITIONS {
                write!(out, ",...")?;
            }
        }
        writeln!(out)?;
    }
    Ok(out)
}
