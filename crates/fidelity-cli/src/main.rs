//! Fidelity CLI: the `fidelity` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            index,
            curr_requests,
            arch_requests,
            out,
            config,
            json,
            verbose,
        } => commands::compare::run(commands::compare::Args {
            index,
            curr_requests,
            arch_requests,
            out,
            config,
            json,
            verbose,
        }),

        Commands::PairIndex {
            curr_index,
            arch_index,
            out,
            config,
            json,
        } => commands::pair_index::run(curr_index, arch_index, out, config, json),

        Commands::SelectArchive {
            listing,
            out,
            seed,
            json,
        } => commands::select_archive::run(listing, out, seed, json),

        Commands::StatusSummary {
            index,
            out_dir,
            json,
        } => commands::status_summary::run(index, out_dir, json),
    }
}
