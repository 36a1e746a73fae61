//! Per-chromosome interval index over transcripts.
//!
//! Each chromosome gets one `Lapper` whose intervals are half-open
//! `[tx_start, tx_end + 1)` and whose values index into the owned transcript
//! list. The index is read-only once built and can be shared across threads.

use ahash::AHashMap;
use rust_lapper::{Interval, Lapper};
use tracing::debug;

use crate::error::AnnotationError;
use crate::matcher::query::resolve_range;
use crate::transcript::Transcript;
use crate::types::{normalize_chrom, RefGeneRow};

type TranscriptTree = Lapper<u32, usize>;

/// Chromosome -> interval tree of transcripts.
#[derive(Debug, Clone, Default)]
pub struct GenomeIndex {
    transcripts: Vec<Transcript>,
    trees: AHashMap<String, TranscriptTree>,
}

impl GenomeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a transcript from `row` and insert it into an already built index.
    ///
    /// Each call rebuilds that chromosome's tree. Load whole tables through
    /// [`IndexBuilder`] or `from_rows`, which build every tree once.
    pub fn add(&mut self, row: &RefGeneRow) -> Result<(), AnnotationError> {
        let transcript = Transcript::from_row(row)?;
        let interval = span_interval(&transcript, self.transcripts.len());
        let tree = self
            .trees
            .entry(transcript.chrom.clone())
            .or_insert_with(|| Lapper::new(Vec::new()));
        // Rebuild so the tree's sorted starts/stops stay consistent.
        let mut intervals = std::mem::take(&mut tree.intervals);
        intervals.push(interval);
        *tree = Lapper::new(intervals);
        self.transcripts.push(transcript);
        Ok(())
    }

    /// Build the whole index from a table of rows.
    ///
    /// Any bad row aborts the build; a partial index is never returned.
    pub fn from_rows<'a, I>(rows: I) -> Result<Self, AnnotationError>
    where
        I: IntoIterator<Item = &'a RefGeneRow>,
    {
        let mut builder = IndexBuilder::new();
        for row in rows {
            builder.add(row)?;
        }
        Ok(builder.finish())
    }

    /// Index already constructed transcripts.
    pub fn from_transcripts(transcripts: Vec<Transcript>) -> Self {
        let mut intervals: AHashMap<String, Vec<Interval<u32, usize>>> = AHashMap::new();
        for (idx, transcript) in transcripts.iter().enumerate() {
            intervals
                .entry(transcript.chrom.clone())
                .or_default()
                .push(span_interval(transcript, idx));
        }

        let trees: AHashMap<String, TranscriptTree> = intervals
            .into_iter()
            .map(|(chrom, ivs)| {
                debug!("Indexed {} transcripts on chromosome {}", ivs.len(), chrom);
                (chrom, Lapper::new(ivs))
            })
            .collect();

        GenomeIndex { transcripts, trees }
    }

    /// Number of stored transcripts across all chromosomes.
    pub fn len(&self) -> usize {
        self.trees.values().map(|tree| tree.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Indexed chromosome labels, sorted, without the "chr" prefix.
    pub fn chromosomes(&self) -> Vec<&str> {
        let mut chroms: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        chroms.sort_unstable();
        chroms
    }

    pub fn contains_chrom(&self, chrom: &str) -> bool {
        self.trees.contains_key(normalize_chrom(chrom))
    }

    /// All transcripts on a chromosome, sorted by `"<gene>:<id>"`.
    pub fn transcripts_on(&self, chrom: &str) -> Vec<&Transcript> {
        let mut found: Vec<&Transcript> = match self.trees.get(normalize_chrom(chrom)) {
            Some(tree) => tree
                .intervals
                .iter()
                .map(|iv| &self.transcripts[iv.val])
                .collect(),
            None => Vec::new(),
        };
        found.sort();
        found
    }

    /// Transcripts overlapping `[start, stop)` on `chrom`, sorted by
    /// `"<gene>:<id>"`.
    ///
    /// `stop` defaults to `start + 1`. An unknown chromosome yields an empty
    /// list; `stop <= start` is an error.
    pub fn get(
        &self,
        chrom: &str,
        start: u32,
        stop: Option<u32>,
    ) -> Result<Vec<&Transcript>, AnnotationError> {
        let (start, stop) = resolve_range(start, stop)?;
        let mut found: Vec<&Transcript> = match self.trees.get(normalize_chrom(chrom)) {
            Some(tree) => tree
                .find(start, stop)
                .map(|iv| &self.transcripts[iv.val])
                .collect(),
            None => Vec::new(),
        };
        found.sort();
        Ok(found)
    }
}

/// Collects transcripts and builds every chromosome tree once in `finish`.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    transcripts: Vec<Transcript>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `row` and queue its transcript; the tree is not touched yet.
    pub fn add(&mut self, row: &RefGeneRow) -> Result<(), AnnotationError> {
        self.transcripts.push(Transcript::from_row(row)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }

    pub fn finish(self) -> GenomeIndex {
        GenomeIndex::from_transcripts(self.transcripts)
    }
}

/// Half-open tree interval for a transcript; the +1 keeps the last base.
fn span_interval(transcript: &Transcript, idx: usize) -> Interval<u32, usize> {
    Interval {
        start: transcript.tx_start,
        stop: transcript.tx_end + 1,
        val: idx,
    }
}
