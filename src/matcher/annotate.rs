//! Aggregated annotation of query regions.
//!
//! Combines gene names, region types and per-transcript labels for one range,
//! and annotates BED regions in parallel against a shared index.

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::config::Config;
use crate::error::AnnotationError;
use crate::index::GenomeIndex;
use crate::matcher::query::{annotation_label, gene_names, region_types, resolve_range};
use crate::transcript::Transcript;
use crate::types::{Region, RegionType};

/// Everything reported for one `(chrom, start, stop)` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Sorted gene symbols, `["Intergenic"]` when nothing overlaps.
    pub genes: Vec<String>,
    pub region_types: BTreeSet<RegionType>,
    /// Sorted, deduplicated transcript labels.
    pub labels: Vec<String>,
}

impl Annotation {
    pub fn is_intergenic(&self) -> bool {
        self.region_types.contains(&RegionType::Intergenic)
    }
}

/// Aggregate the transcripts overlapping `[start, stop)`.
pub fn annotate_transcripts(
    transcripts: &[&Transcript],
    start: u32,
    stop: u32,
    report_utr: bool,
) -> Annotation {
    let labels: BTreeSet<String> = transcripts
        .iter()
        .filter_map(|tx| annotation_label(tx, start, stop, report_utr))
        .collect();

    Annotation {
        genes: gene_names(transcripts),
        region_types: region_types(transcripts, start, stop, report_utr),
        labels: labels.into_iter().collect(),
    }
}

impl GenomeIndex {
    /// Annotate `[start, stop)` on `chrom`; `stop` defaults to `start + 1`.
    pub fn annotate(
        &self,
        chrom: &str,
        start: u32,
        stop: Option<u32>,
        report_utr: bool,
    ) -> Result<Annotation, AnnotationError> {
        let (start, stop) = resolve_range(start, stop)?;
        let transcripts = self.get(chrom, start, Some(stop))?;
        Ok(annotate_transcripts(&transcripts, start, stop, report_utr))
    }
}

/// Annotate every region against `index`, preserving input order.
///
/// Runs on the current rayon pool; the index is only read.
pub fn annotate_regions(
    index: &GenomeIndex,
    regions: &[Region],
    config: &Config,
) -> Result<Vec<Annotation>, AnnotationError> {
    regions
        .par_iter()
        .map(|region| {
            index.annotate(
                &region.chrom,
                region.start,
                Some(region.end),
                config.report_utr,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RefGeneRow;

    fn row(name: &str, gene: &str, tx: (u32, u32), cds: (u32, u32)) -> RefGeneRow {
        RefGeneRow {
            bin: None,
            name: name.to_string(),
            chrom: "chr3".to_string(),
            strand: "-".to_string(),
            tx_start: tx.0,
            tx_end: tx.1,
            cds_start: cds.0,
            cds_end: cds.1,
            exon_count: 1,
            exon_starts: format!("{},", tx.0),
            exon_ends: format!("{},", tx.1),
            score: 0,
            name2: gene.to_string(),
            cds_start_stat: "cmpl".to_string(),
            cds_end_stat: "cmpl".to_string(),
            exon_frames: "0,".to_string(),
        }
    }

    fn index() -> GenomeIndex {
        GenomeIndex::from_rows(&[
            row("NM_20", "BRCA", (1000, 2000), (1100, 1900)),
            row("NM_10", "BRCA", (1000, 2000), (1100, 1900)),
            row("NM_30", "ATM", (1500, 2500), (1500, 2500)),
        ])
        .unwrap()
    }

    #[test]
    fn test_overlapping_genes() {
        let annotation = index().annotate("chr3", 1600, None, true).unwrap();
        assert_eq!(annotation.genes, vec!["ATM", "BRCA"]);
        assert_eq!(
            annotation.region_types,
            BTreeSet::from([RegionType::Exonic])
        );
        assert_eq!(
            annotation.labels,
            vec!["ATM:NM_30(exon 01)", "BRCA:NM_10(exon 01)", "BRCA:NM_20(exon 01)"]
        );
    }

    #[test]
    fn test_minus_strand_utr() {
        let annotation = index().annotate("3", 1950, None, true).unwrap();
        assert_eq!(
            annotation.region_types,
            BTreeSet::from([RegionType::Exonic, RegionType::Utr])
        );
        assert!(annotation.labels.contains(&"BRCA:NM_10(UTR)".to_string()));
    }

    #[test]
    fn test_intergenic() {
        let annotation = index().annotate("chr3", 5000, Some(5100), true).unwrap();
        assert!(annotation.is_intergenic());
        assert_eq!(annotation.genes, vec!["Intergenic"]);
        assert!(annotation.labels.is_empty());

        let missing = index().annotate("chrUn", 10, None, true).unwrap();
        assert!(missing.is_intergenic());
    }

    #[test]
    fn test_annotate_regions_keeps_order() {
        let regions = vec![
            Region::new("chr3".to_string(), 2400, 2410, vec![]),
            Region::new("chr3".to_string(), 10, 20, vec![]),
            Region::new("chr3".to_string(), 1200, 1210, vec![]),
        ];
        let results = annotate_regions(&index(), &regions, &Config::default()).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].genes, vec!["ATM"]);
        assert!(results[1].is_intergenic());
        assert_eq!(results[2].genes, vec!["BRCA"]);
    }

    #[test]
    fn test_annotate_regions_rejects_empty_region() {
        let regions = vec![Region::new("chr3".to_string(), 1200, 1200, vec![])];
        assert!(annotate_regions(&index(), &regions, &Config::default()).is_err());
    }
}
