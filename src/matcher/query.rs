//! Region-type, gene-name and label queries.
//!
//! All ranges are half-open `[start, stop)`. Segment coordinates are
//! inclusive, so a segment `[s, e]` is hit when `s < stop && e >= start`.

use std::collections::BTreeSet;

use crate::error::AnnotationError;
use crate::transcript::Transcript;
use crate::types::{RegionType, Segment};

/// Label used when nothing overlaps the queried range.
pub const INTERGENIC: &str = "Intergenic";

/// Apply the `stop` default (`start + 1`) and reject empty ranges.
pub fn resolve_range(start: u32, stop: Option<u32>) -> Result<(u32, u32), AnnotationError> {
    let stop = stop.unwrap_or_else(|| start.saturating_add(1));
    if stop <= start {
        return Err(AnnotationError::InvalidRange { start, stop });
    }
    Ok((start, stop))
}

/// Segments of `transcript` hit by `[start, stop)`, in 5' to 3' order.
///
/// With `report_utr` off, UTR segments are ignored entirely. With it on,
/// introns lying wholly in the UTR extent and exons whose coding part is not
/// hit are dropped, leaving the UTR segment to describe the position.
pub fn visible_segments(
    transcript: &Transcript,
    start: u32,
    stop: u32,
    report_utr: bool,
) -> Vec<&Segment> {
    transcript
        .segments()
        .iter()
        .filter(|segment| segment.overlaps(start, stop))
        .filter(|segment| match segment {
            Segment::Utr { .. } => report_utr,
            Segment::Intron { .. } => !(report_utr && transcript.within_utr(segment)),
            Segment::Exon { .. } => !report_utr || segment.is_coding(start, stop),
        })
        .collect()
}

/// Segment kinds hit by `[start, stop)` across all `transcripts`.
///
/// Returns `{Intergenic}` when no segment remains.
pub fn region_types(
    transcripts: &[&Transcript],
    start: u32,
    stop: u32,
    report_utr: bool,
) -> BTreeSet<RegionType> {
    let mut types: BTreeSet<RegionType> = transcripts
        .iter()
        .flat_map(|tx| visible_segments(tx, start, stop, report_utr))
        .map(Segment::kind)
        .collect();
    if types.is_empty() {
        types.insert(RegionType::Intergenic);
    }
    types
}

/// Sorted, deduplicated gene symbols; `["Intergenic"]` if there are none.
pub fn gene_names(transcripts: &[&Transcript]) -> Vec<String> {
    let genes: BTreeSet<&str> = transcripts.iter().map(|tx| tx.gene.as_str()).collect();
    if genes.is_empty() {
        return vec![INTERGENIC.to_string()];
    }
    genes.into_iter().map(str::to_string).collect()
}

/// Human-readable description of where `[start, stop)` falls in a transcript.
///
/// `"<gene>:<id>(<segment>)"` for a single segment,
/// `"<gene>:<id>:(<first> - <last>)"` for several, `None` for none.
pub fn annotation_label(
    transcript: &Transcript,
    start: u32,
    stop: u32,
    report_utr: bool,
) -> Option<String> {
    let segments = visible_segments(transcript, start, stop, report_utr);
    match segments.as_slice() {
        [] => None,
        [only] => Some(format!("{}({})", transcript, only)),
        [first, .., last] => Some(format!("{}:({} - {})", transcript, first, last)),
    }
}
