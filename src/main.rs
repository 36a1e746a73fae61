//! refannot - annotate genomic regions with RefGene transcript structure.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use refannot::config::Config;
use refannot::matcher::annotate_regions;
use refannot::output::write_results;
use refannot::parser::{build_index, parse_bed};

/// Annotate BED regions with the genes, exons, introns and UTRs they overlap.
#[derive(Parser, Debug)]
#[command(name = "refannot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RefGene table (refGene.txt, optionally gzipped)
    #[arg(short = 'g', long = "refgene")]
    refgene: PathBuf,

    /// Region BED file (required)
    #[arg(short = 'b', long = "bed")]
    bed: PathBuf,

    /// Output file (required)
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Ignore UTR segments instead of reporting them
    #[arg(long = "no-utr")]
    no_utr: bool,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(short = 't', long = "threads")]
    threads: Option<usize>,

    /// Log filter, e.g. "info" or "refannot=debug"
    #[arg(long = "log-level", default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", level, e))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    // Validate inputs
    if !args.refgene.exists() {
        bail!("RefGene file not found: {}", args.refgene.display());
    }
    if !args.bed.exists() {
        bail!("BED file not found: {}", args.bed.display());
    }

    let mut config = Config::new();
    config.report_utr = !args.no_utr;
    if let Some(threads) = args.threads {
        if threads == 0 {
            bail!("The number of threads must be at least 1.");
        }
        config.threads = threads;
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build_global()
        .context("Failed to start thread pool")?;

    info!("Building index from {}", args.refgene.display());
    let index = build_index(&args.refgene)?;

    info!("Parsing BED file: {}", args.bed.display());
    let bed_data = parse_bed(&args.bed)?;

    info!(
        "Annotating {} regions on {} threads",
        bed_data.len(),
        config.threads
    );
    for (chrom, count) in &bed_data.chrom_counts {
        if !index.contains_chrom(chrom) {
            warn!(
                "{} not found in RefGene table; its {} regions are reported as Intergenic",
                chrom, count
            );
        }
    }

    let annotations = annotate_regions(&index, &bed_data.regions, &config)
        .context("Failed to annotate regions")?;
    let intergenic = annotations.iter().filter(|a| a.is_intergenic()).count();
    info!(
        "{} of {} regions are intergenic",
        intergenic,
        annotations.len()
    );
    let all_results: Vec<_> = bed_data.regions.iter().zip(annotations).collect();

    info!("Writing output to: {}", args.output.display());
    write_results(&args.output, &all_results, bed_data.num_meta_columns)?;

    info!("Done!");
    Ok(())
}
