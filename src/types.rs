//! Core data structures for refannot.
//!
//! This module contains the strand, region-type and segment types shared by
//! the transcript model, the genome index and the query layer.

use std::cmp::Ordering;
use std::fmt;

/// Strand orientation for genomic features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Positive,
    Negative,
}

impl Strand {
    /// Parse strand from a string ('+' or '-').
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Strand::Positive),
            "-" => Some(Strand::Negative),
            _ => None,
        }
    }

    /// Convert strand to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Positive => "+",
            Strand::Negative => "-",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Region kinds reported for a queried range.
///
/// Declaration order matches the lexical order of the rendered strings, so a
/// `BTreeSet<RegionType>` iterates the same way a sorted set of labels would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionType {
    Exonic,
    Intronic,
    Intergenic,
    Utr,
}

impl RegionType {
    /// Convert region type to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionType::Exonic => "EXONIC",
            RegionType::Intronic => "INTRONIC",
            RegionType::Intergenic => "Intergenic",
            RegionType::Utr => "UTR",
        }
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which end of the transcript a UTR sits on, in transcription direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UtrEnd {
    Five,
    Three,
}

impl UtrEnd {
    /// 5 or 3.
    pub fn number(&self) -> u32 {
        match self {
            UtrEnd::Five => 5,
            UtrEnd::Three => 3,
        }
    }
}

/// One piece of a transcript model.
///
/// All coordinates are 0-based and inclusive. Exon and intron numbers count
/// from the 5' end of the transcript, so on the minus strand they decrease
/// with genomic position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Utr {
        side: UtrEnd,
        start: u32,
        stop: u32,
    },
    Exon {
        number: u32,
        frame: i32,
        start: u32,
        stop: u32,
        /// Part of the exon inside the CDS, if any.
        coding: Option<(u32, u32)>,
    },
    Intron {
        number: u32,
        start: u32,
        stop: u32,
    },
}

impl Segment {
    pub fn start(&self) -> u32 {
        match self {
            Segment::Utr { start, .. }
            | Segment::Exon { start, .. }
            | Segment::Intron { start, .. } => *start,
        }
    }

    /// Last base covered by the segment (inclusive).
    pub fn end(&self) -> u32 {
        match self {
            Segment::Utr { stop, .. } | Segment::Exon { stop, .. } | Segment::Intron { stop, .. } => {
                *stop
            }
        }
    }

    /// Number of bases covered.
    pub fn length(&self) -> u32 {
        self.end() - self.start() + 1
    }

    /// 5/3 for UTRs, the 1-based exon or intron number otherwise.
    pub fn number(&self) -> u32 {
        match self {
            Segment::Utr { side, .. } => side.number(),
            Segment::Exon { number, .. } | Segment::Intron { number, .. } => *number,
        }
    }

    pub fn kind(&self) -> RegionType {
        match self {
            Segment::Utr { .. } => RegionType::Utr,
            Segment::Exon { .. } => RegionType::Exonic,
            Segment::Intron { .. } => RegionType::Intronic,
        }
    }

    /// True if the segment shares at least one base with `[start, stop)`.
    #[inline]
    pub fn overlaps(&self, start: u32, stop: u32) -> bool {
        self.start() < stop && self.end() >= start
    }

    /// True if `[start, stop)` touches the coding part of an exon.
    ///
    /// UTRs, introns and exons lying wholly in a UTR are never coding.
    pub fn is_coding(&self, start: u32, stop: u32) -> bool {
        match self {
            Segment::Exon {
                coding: Some((cd_start, cd_end)),
                ..
            } => *cd_start < stop && *cd_end >= start,
            _ => false,
        }
    }

    /// Position in the 5' to 3' order of a single transcript.
    fn order_key(&self) -> (u8, u32) {
        match self {
            Segment::Utr {
                side: UtrEnd::Five, ..
            } => (0, 0),
            Segment::Exon { number, .. } => (1, 2 * number),
            Segment::Intron { number, .. } => (1, 2 * number + 1),
            Segment::Utr {
                side: UtrEnd::Three,
                ..
            } => (2, 0),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Utr { .. } => write!(f, "UTR"),
            Segment::Exon { number, .. } => write!(f, "exon {:02}", number),
            Segment::Intron { number, .. } => write!(f, "intron {:02}", number),
        }
    }
}

/// Order two segments of the same transcript:
/// 5'UTR < exon 1 < intron 1 < exon 2 < ... < 3'UTR.
///
/// Segments from different transcripts have no meaningful order.
pub fn compare_segments(a: &Segment, b: &Segment) -> Ordering {
    a.order_key().cmp(&b.order_key())
}

/// Strip a leading "chr" so "chr7" and "7" name the same chromosome.
pub fn normalize_chrom(chrom: &str) -> &str {
    chrom.strip_prefix("chr").unwrap_or(chrom)
}

/// One decoded record of a UCSC RefGene table.
///
/// Coordinates are kept exactly as UCSC writes them (0-based start,
/// exclusive end); list columns are the raw comma-terminated strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefGeneRow {
    pub bin: Option<u32>,
    pub name: String,
    pub chrom: String,
    pub strand: String,
    pub tx_start: u32,
    pub tx_end: u32,
    pub cds_start: u32,
    pub cds_end: u32,
    pub exon_count: usize,
    pub exon_starts: String,
    pub exon_ends: String,
    pub score: i64,
    pub name2: String,
    pub cds_start_stat: String,
    pub cds_end_stat: String,
    pub exon_frames: String,
}

/// A genomic query range from a BED file.
///
/// `start`/`end` follow BED: 0-based, half-open.
#[derive(Debug, Clone)]
pub struct Region {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
    pub metadata: Vec<String>,
}

impl Region {
    /// Create a new region.
    pub fn new(chrom: String, start: u32, end: u32, metadata: Vec<String>) -> Self {
        Region {
            chrom,
            start,
            end,
            metadata,
        }
    }
}
