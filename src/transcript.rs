//! Transcript model built from one RefGene row.
//!
//! UCSC writes 0-based starts and exclusive ends. Everything stored here is
//! 0-based and inclusive: each end coordinate is shifted down by one during
//! construction.

use std::cmp::Ordering;
use std::fmt;

use crate::error::AnnotationError;
use crate::types::{compare_segments, normalize_chrom, RefGeneRow, Segment, Strand, UtrEnd};

/// One RefSeq transcript with its UTR/exon/intron segments.
///
/// Immutable after construction. Equality and ordering use the
/// `"<gene>:<id>"` form only.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub gene: String,
    pub id: String,
    pub chrom: String,
    pub strand: Strand,
    pub tx_start: u32,
    pub tx_end: u32,
    /// Inclusive coding range, `None` for non-coding transcripts.
    pub cds: Option<(u32, u32)>,
    pub exon_starts: Vec<u32>,
    pub exon_ends: Vec<u32>,
    pub exon_frames: Vec<i32>,
    segments: Vec<Segment>,
}

impl Transcript {
    /// Build a transcript from a decoded RefGene row.
    ///
    /// Fails on an unknown strand, exon lists that disagree with the exon
    /// count, or coordinates that cannot describe a transcript.
    pub fn from_row(row: &RefGeneRow) -> Result<Self, AnnotationError> {
        let strand = Strand::from_str(&row.strand).ok_or_else(|| AnnotationError::InvalidStrand {
            transcript: row.name.clone(),
            strand: row.strand.clone(),
        })?;

        let exon_starts: Vec<u32> = parse_list(&row.exon_starts, "exonStarts")?;
        let exon_ends: Vec<u32> = parse_list(&row.exon_ends, "exonEnds")?;
        let exon_frames: Vec<i32> = parse_list(&row.exon_frames, "exonFrames")?;

        if exon_starts.len() != row.exon_count
            || exon_ends.len() != row.exon_count
            || exon_frames.len() != row.exon_count
        {
            return Err(AnnotationError::ExonCountMismatch {
                transcript: row.name.clone(),
                expected: row.exon_count,
                starts: exon_starts.len(),
                ends: exon_ends.len(),
                frames: exon_frames.len(),
            });
        }

        validate_coordinates(row, &exon_starts, &exon_ends)?;

        let tx_start = row.tx_start;
        let tx_end = row.tx_end - 1;
        // Signed so an empty CDS (cdsStart == cdsEnd) can sit one base before cd_start.
        let cd_start = i64::from(row.cds_start);
        let cd_end = i64::from(row.cds_end) - 1;
        let exon_ends: Vec<u32> = exon_ends.iter().map(|e| e - 1).collect();

        let cds = (cd_start <= cd_end).then(|| (row.cds_start, row.cds_end - 1));

        let (left_utr, right_utr) = match strand {
            Strand::Positive => (UtrEnd::Five, UtrEnd::Three),
            Strand::Negative => (UtrEnd::Three, UtrEnd::Five),
        };

        let mut segments = Vec::with_capacity(2 * row.exon_count + 1);

        if i64::from(tx_start) < cd_start {
            let stop = (cd_start - 1).min(i64::from(tx_end)) as u32;
            segments.push(Segment::Utr {
                side: left_utr,
                start: tx_start,
                stop,
            });
        }
        if i64::from(tx_end) > cd_end {
            let start = (cd_end + 1).max(i64::from(tx_start)) as u32;
            if start <= tx_end {
                segments.push(Segment::Utr {
                    side: right_utr,
                    start,
                    stop: tx_end,
                });
            }
        }

        let exon_count = row.exon_count as u32;
        for (i, ((&start, &stop), &frame)) in exon_starts
            .iter()
            .zip(exon_ends.iter())
            .zip(exon_frames.iter())
            .enumerate()
        {
            let number = match strand {
                Strand::Positive => i as u32 + 1,
                Strand::Negative => exon_count - i as u32,
            };
            let lo = i64::from(start).max(cd_start);
            let hi = i64::from(stop).min(cd_end);
            let coding = (lo <= hi).then(|| (lo as u32, hi as u32));
            segments.push(Segment::Exon {
                number,
                frame,
                start,
                stop,
                coding,
            });
        }

        for i in 1..exon_starts.len() {
            let gap_start = exon_ends[i - 1] + 1;
            let next_start = exon_starts[i];
            // Adjacent exons have no intron between them.
            if next_start <= gap_start {
                continue;
            }
            let number = match strand {
                Strand::Positive => i as u32,
                Strand::Negative => exon_count - i as u32,
            };
            segments.push(Segment::Intron {
                number,
                start: gap_start,
                stop: next_start - 1,
            });
        }

        segments.sort_by(compare_segments);

        Ok(Transcript {
            gene: row.name2.clone(),
            id: row.name.clone(),
            chrom: normalize_chrom(&row.chrom).to_string(),
            strand,
            tx_start,
            tx_end,
            cds,
            exon_starts,
            exon_ends,
            exon_frames,
            segments,
        })
    }

    /// Segments in 5' to 3' order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn exon_count(&self) -> usize {
        self.exon_starts.len()
    }

    /// Transcript length in bases.
    pub fn length(&self) -> u32 {
        self.tx_end - self.tx_start + 1
    }

    /// True if `[start, stop)` touches the transcript span.
    #[inline]
    pub fn overlaps(&self, start: u32, stop: u32) -> bool {
        self.tx_start < stop && self.tx_end >= start
    }

    /// True if the segment lies entirely outside the coding range.
    ///
    /// Every segment of a non-coding transcript is UTR-bound.
    pub fn within_utr(&self, segment: &Segment) -> bool {
        match self.cds {
            Some((cd_start, cd_end)) => segment.end() < cd_start || segment.start() > cd_end,
            None => true,
        }
    }

    /// `"<gene>:<id>"`
    pub fn key(&self) -> String {
        format!("{}:{}", self.gene, self.id)
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.gene, self.id)
    }
}

impl Transcript {
    /// Bytes of `key()` without building the string.
    fn key_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.gene
            .bytes()
            .chain(std::iter::once(b':'))
            .chain(self.id.bytes())
    }
}

impl PartialEq for Transcript {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Transcript {}

impl Ord for Transcript {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_bytes().cmp(other.key_bytes())
    }
}

impl PartialOrd for Transcript {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Parse a comma-terminated UCSC list column such as `"100,250,"`.
fn parse_list<T: std::str::FromStr>(
    raw: &str,
    field: &'static str,
) -> Result<Vec<T>, AnnotationError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|_| AnnotationError::FieldParse {
                field,
                value: s.to_string(),
            })
        })
        .collect()
}

fn validate_coordinates(
    row: &RefGeneRow,
    exon_starts: &[u32],
    exon_ends: &[u32],
) -> Result<(), AnnotationError> {
    let invalid = |reason: String| AnnotationError::InvalidCoordinates {
        transcript: row.name.clone(),
        reason,
    };

    if row.tx_end <= row.tx_start {
        return Err(invalid(format!(
            "txEnd {} is not after txStart {}",
            row.tx_end, row.tx_start
        )));
    }
    if row.cds_start > row.cds_end || row.cds_start < row.tx_start || row.cds_end > row.tx_end {
        return Err(invalid(format!(
            "CDS [{}, {}) does not fit in transcript [{}, {})",
            row.cds_start, row.cds_end, row.tx_start, row.tx_end
        )));
    }
    if exon_starts.is_empty() {
        return Err(invalid("no exons".to_string()));
    }
    for (i, (&start, &end)) in exon_starts.iter().zip(exon_ends).enumerate() {
        if end <= start {
            return Err(invalid(format!("exon {} is empty: [{}, {})", i + 1, start, end)));
        }
        if i > 0 && start < exon_ends[i - 1] {
            return Err(invalid(format!(
                "exon {} starts at {} before the previous exon ends at {}",
                i + 1,
                start,
                exon_ends[i - 1]
            )));
        }
    }
    if exon_starts[0] != row.tx_start || exon_ends[exon_ends.len() - 1] != row.tx_end {
        return Err(invalid(format!(
            "exons [{}, {}) do not span transcript [{}, {})",
            exon_starts[0],
            exon_ends[exon_ends.len() - 1],
            row.tx_start,
            row.tx_end
        )));
    }
    Ok(())
}
