//! Run configuration.

/// Settings shared by the annotation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Report UTR segments; when off, UTRs are ignored entirely.
    pub report_utr: bool,
    /// Worker threads for batch annotation.
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            report_utr: true,
            threads: num_cpus::get(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }
}
