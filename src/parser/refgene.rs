//! RefGene table parser with gzip support.
//!
//! Reads UCSC `refGene.txt` (16 columns, leading `bin`) or genePredExt
//! (15 columns, no `bin`). Unlike BED input, a malformed line is fatal:
//! a partially read table would silently mis-annotate everything after it.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::error::AnnotationError;
use crate::index::GenomeIndex;
use crate::types::RefGeneRow;

/// Parse a RefGene file into rows.
///
/// Supports both plain text and gzip-compressed tables.
pub fn parse_refgene(path: &Path) -> Result<Vec<RefGeneRow>> {
    let file = File::open(path).context("Failed to open RefGene file")?;

    let reader: Box<dyn BufRead> = if path.to_string_lossy().ends_with(".gz") {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    parse_refgene_reader(reader)
}

/// Read a RefGene table and build the genome index from it.
pub fn build_index(path: &Path) -> Result<GenomeIndex> {
    let rows = parse_refgene(path)?;
    let index = GenomeIndex::from_rows(&rows)
        .with_context(|| format!("Failed to build index from {}", path.display()))?;
    info!(
        "Indexed {} transcripts on {} chromosomes",
        index.len(),
        index.chromosomes().len()
    );
    Ok(index)
}

/// Parse RefGene rows from a reader.
pub fn parse_refgene_reader<R: BufRead>(reader: R) -> Result<Vec<RefGeneRow>> {
    let mut rows = Vec::new();

    for (line_no, line_result) in reader.lines().enumerate() {
        let line = line_result.context("Failed to read RefGene line")?;

        // Skip empty lines and Table Browser headers
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let row = parse_refgene_line(&line)
            .with_context(|| format!("Malformed RefGene line {}", line_no + 1))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Decode one tab-separated RefGene line.
pub fn parse_refgene_line(line: &str) -> Result<RefGeneRow, AnnotationError> {
    let fields: Vec<&str> = line.trim_end_matches(&['\r', '\n'][..]).split('\t').collect();

    let (bin, f) = match fields.len() {
        16 => (Some(parse_field(fields[0], "bin")?), &fields[1..]),
        15 => (None, &fields[..]),
        found => return Err(AnnotationError::MissingColumns { found }),
    };

    Ok(RefGeneRow {
        bin,
        name: f[0].to_string(),
        chrom: f[1].to_string(),
        strand: f[2].to_string(),
        tx_start: parse_field(f[3], "txStart")?,
        tx_end: parse_field(f[4], "txEnd")?,
        cds_start: parse_field(f[5], "cdsStart")?,
        cds_end: parse_field(f[6], "cdsEnd")?,
        exon_count: parse_field(f[7], "exonCount")?,
        exon_starts: f[8].to_string(),
        exon_ends: f[9].to_string(),
        score: parse_field(f[10], "score")?,
        name2: f[11].to_string(),
        cds_start_stat: f[12].to_string(),
        cds_end_stat: f[13].to_string(),
        exon_frames: f[14].to_string(),
    })
}

fn parse_field<T: FromStr>(value: &str, field: &'static str) -> Result<T, AnnotationError> {
    value.trim().parse().map_err(|_| AnnotationError::FieldParse {
        field,
        value: value.to_string(),
    })
}
