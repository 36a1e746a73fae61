//! BED file parser with gzip support.
//!
//! Parses BED (Browser Extensible Data) files containing query regions.
//! BED intervals are 0-based and half-open, the same convention the index
//! queries use, so coordinates pass through unchanged.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::types::Region;

/// Optional BED columns after `chrom`, `start` and `end`, in file order.
const BED_METADATA_COLUMNS: [&str; 9] = [
    "name",
    "score",
    "strand",
    "thickStart",
    "thickEnd",
    "itemRgb",
    "blockCount",
    "blockSizes",
    "blockStarts",
];

/// Query regions read from a BED file.
pub struct BedData {
    /// Regions in file order.
    pub regions: Vec<Region>,
    /// Region count per chromosome, in order of first appearance.
    pub chrom_counts: IndexMap<String, usize>,
    /// Widest metadata row seen.
    pub num_meta_columns: usize,
}

impl BedData {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Parse a BED file, plain or gzipped.
pub fn parse_bed(path: &Path) -> Result<BedData> {
    let file = File::open(path).context("Failed to open BED file")?;

    let reader: Box<dyn BufRead> = if path.to_string_lossy().ends_with(".gz") {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    parse_bed_reader(reader)
}

fn parse_bed_reader<R: BufRead>(reader: R) -> Result<BedData> {
    let mut regions = Vec::new();
    let mut chrom_counts: IndexMap<String, usize> = IndexMap::new();
    let mut num_meta_columns = 0;

    for line_result in reader.lines() {
        let line = line_result.context("Failed to read BED line")?;

        if line.is_empty() || line.starts_with("track") || line.starts_with("browser") {
            continue;
        }

        let mut fields = line.split('\t');
        let (Some(chrom), Some(start), Some(end)) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };

        // Column-name headers fail to parse and are skipped.
        let (Ok(start), Ok(end)) = (start.parse::<u32>(), end.parse::<u32>()) else {
            continue;
        };

        let metadata: Vec<String> = fields
            .take(BED_METADATA_COLUMNS.len())
            .map(str::to_string)
            .collect();
        num_meta_columns = num_meta_columns.max(metadata.len());

        *chrom_counts.entry(chrom.to_string()).or_default() += 1;
        regions.push(Region::new(chrom.to_string(), start, end, metadata));
    }

    Ok(BedData {
        regions,
        chrom_counts,
        num_meta_columns,
    })
}

/// Header names for the first `num_columns` metadata columns.
pub fn metadata_headers(num_columns: usize) -> &'static [&'static str] {
    &BED_METADATA_COLUMNS[..num_columns.min(BED_METADATA_COLUMNS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> BedData {
        parse_bed_reader(BufReader::new(content.as_bytes())).unwrap()
    }

    #[test]
    fn test_regions_keep_file_order() {
        let bed = parse("chr2\t1\t2\ta\nchr1\t1\t2\tb\nchr2\t5\t6\tc\n");

        let names: Vec<&str> = bed.regions.iter().map(|r| r.metadata[0].as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let chroms: Vec<(&str, usize)> = bed
            .chrom_counts
            .iter()
            .map(|(c, n)| (c.as_str(), *n))
            .collect();
        assert_eq!(chroms, vec![("chr2", 2), ("chr1", 1)]);
        assert_eq!(bed.len(), 3);
    }

    #[test]
    fn test_skips_track_browser_and_header_lines() {
        let bed = parse(
            "browser position chr1:1-1000\ntrack name=peaks\nchrom\tstart\tend\n\nchr1\t100\t200\n",
        );

        assert_eq!(bed.len(), 1);
        assert_eq!(bed.regions[0].start, 100);
        assert_eq!(bed.regions[0].end, 200);
        assert!(!bed.chrom_counts.contains_key("chrom"));
    }

    #[test]
    fn test_metadata_width_is_widest_row() {
        let bed = parse("chr1\t1\t2\tp1\nchr1\t3\t4\tp2\t7\t-\n");

        assert_eq!(bed.num_meta_columns, 3);
        assert_eq!(metadata_headers(bed.num_meta_columns), ["name", "score", "strand"]);
        assert_eq!(metadata_headers(20).len(), 9);
        assert!(parse("").is_empty());
    }
}
