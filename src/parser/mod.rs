//! Parsers for genomic file formats.

pub mod bed;
pub mod refgene;

pub use bed::{parse_bed, BedData};
pub use refgene::{build_index, parse_refgene, parse_refgene_line};
