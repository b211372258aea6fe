use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fidelity",
    about = "Fidelity: request-level correspondence between live pages and their web-archive captures",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare every eligible page pair in an identity index and write a report
    Compare {
        /// Identity index CSV pairing current and archived captures
        #[arg(long)]
        index: String,

        /// Directory holding current capture-record sets
        #[arg(long)]
        curr_requests: String,

        /// Directory holding archived capture-record sets
        #[arg(long)]
        arch_requests: String,

        /// Report CSV to create (truncated if present)
        #[arg(long)]
        out: String,

        /// Engine config TOML (defaults apply when omitted)
        #[arg(long)]
        config: Option<String>,

        /// Output the run summary as JSON
        #[arg(long)]
        json: bool,

        /// Log every status mismatch and missing request (overridden by RUST_LOG)
        #[arg(long, short)]
        verbose: bool,
    },

    /// Join current and archive extraction-status indexes into an identity index
    PairIndex {
        /// Current-side extraction-status index CSV
        #[arg(long)]
        curr_index: String,

        /// Archive-side extraction-status index CSV
        #[arg(long)]
        arch_index: String,

        /// Identity index CSV to write
        #[arg(long)]
        out: String,

        /// Engine config TOML (only the success literal is used)
        #[arg(long)]
        config: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Keep one randomly chosen archived snapshot per seed
    SelectArchive {
        /// Archive listing CSV (archive_id,url_id,date,archive_url)
        listing: String,

        /// Selected listing CSV to write
        #[arg(long)]
        out: String,

        /// RNG seed for a reproducible selection
        #[arg(long)]
        seed: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bucket seeds of an extraction-status index by site liveness
    StatusSummary {
        /// Extraction-status index CSV
        index: String,

        /// Write one CSV per bucket into this directory
        #[arg(long)]
        out_dir: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
