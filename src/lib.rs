//! refannot - RefGene coordinate annotation library.
//!
//! Builds a per-chromosome interval index from a UCSC RefGene table and
//! answers which gene, transcript, exon, intron or UTR a genomic position
//! or range falls in.
//!
//! # Features
//!
//! - Parse RefGene tables and BED files (with gzip support)
//! - Model each transcript as an ordered list of UTR/exon/intron segments,
//!   numbered from the 5' end on either strand
//! - Query overlapping transcripts per chromosome in O(log n + k)
//! - Aggregate gene lists, region types and transcript labels for reports
//!
//! # Example
//!
//! ```ignore
//! use refannot::parser::build_index;
//! use std::path::Path;
//!
//! let index = build_index(Path::new("refGene.txt.gz"))?;
//! let annotation = index.annotate("chr17", 43_045_000, None, true)?;
//! println!("{}", annotation.genes.join(","));
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod matcher;
pub mod output;
pub mod parser;
pub mod transcript;
pub mod types;

pub use config::Config;
pub use error::AnnotationError;
pub use index::{GenomeIndex, IndexBuilder};
pub use matcher::{annotation_label, gene_names, region_types, Annotation};
pub use transcript::Transcript;
pub use types::{compare_segments, RefGeneRow, Region, RegionType, Segment, Strand, UtrEnd};
