//! Query and aggregation over transcripts overlapping a genomic range.

pub mod annotate;
pub mod query;

pub use annotate::{annotate_regions, annotate_transcripts, Annotation};
pub use query::{annotation_label, gene_names, region_types, resolve_range, visible_segments};
