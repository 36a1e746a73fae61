//! TSV output of annotated regions.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::matcher::Annotation;
use crate::parser::bed::metadata_headers;
use crate::types::Region;

/// Write annotated regions to a file.
pub fn write_results(
    path: &Path,
    results: &[(&Region, Annotation)],
    num_meta_columns: usize,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_results_to(&mut writer, results, num_meta_columns)?;
    writer.flush().context("Failed to flush output")?;
    Ok(())
}

/// Write the header and one line per region.
///
/// Genes and region types are joined with `,`, transcript labels with `;`.
/// Intergenic regions get `.` in the last column.
pub fn write_results_to<W: Write>(
    writer: &mut W,
    results: &[(&Region, Annotation)],
    num_meta_columns: usize,
) -> Result<()> {
    let mut header = vec!["Chrom", "Start", "End"];
    header.extend(metadata_headers(num_meta_columns));
    header.extend(["Genes", "RegionTypes", "Transcripts"]);
    writeln!(writer, "{}", header.join("\t"))?;

    for (region, annotation) in results {
        let mut fields = vec![
            region.chrom.clone(),
            region.start.to_string(),
            region.end.to_string(),
        ];
        for i in 0..num_meta_columns {
            fields.push(region.metadata.get(i).cloned().unwrap_or_default());
        }
        fields.push(annotation.genes.join(","));
        fields.push(
            annotation
                .region_types
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(","),
        );
        if annotation.is_intergenic() {
            fields.push(".".to_string());
        } else {
            fields.push(annotation.labels.join(";"));
        }
        writeln!(writer, "{}", fields.join("\t"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RegionType;
    use std::collections::BTreeSet;

    #[test]
    fn test_write_results_to() {
        let region = Region::new("chr1".to_string(), 100, 200, vec!["peak1".to_string()]);
        let intergenic = Region::new("chr2".to_string(), 5, 6, vec![]);
        let results = vec![
            (
                &region,
                Annotation {
                    genes: vec!["G1".to_string(), "G2".to_string()],
                    region_types: BTreeSet::from([RegionType::Exonic, RegionType::Utr]),
                    labels: vec!["G1:NM_1(UTR)".to_string(), "G2:NM_2(exon 03)".to_string()],
                },
            ),
            (
                &intergenic,
                Annotation {
                    genes: vec!["Intergenic".to_string()],
                    region_types: BTreeSet::from([RegionType::Intergenic]),
                    labels: vec![],
                },
            ),
        ];

        let mut out = Vec::new();
        write_results_to(&mut out, &results, 1).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Chrom\tStart\tEnd\tname\tGenes\tRegionTypes\tTranscripts");
        assert_eq!(
            lines[1],
            "chr1\t100\t200\tpeak1\tG1,G2\tEXONIC,UTR\tG1:NM_1(UTR);G2:NM_2(exon 03)"
        );
        assert_eq!(lines[2], "chr2\t5\t6\t\tIntergenic\tIntergenic\t.");
    }
}
