// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the issue-rank command-line interface.
//!
//! Two subcommands over a JSON array of records: `search` runs the full hybrid
//! ranking and prints the visible results, `similar` asks the embedding index
//! alone for its nearest records.

pub mod display;

use clap::{Parser, Subcommand};
use issue_rank::{RankingConfig, Record, RecordSet, Result};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "issue-rank",
    about = "Hybrid relevance ranking for issue-tracker records",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank records against a query and print the visible ones
    Search {
        /// JSON file holding an array of records
        records: PathBuf,

        /// Search query (empty string lists every record)
        query: String,

        /// Maximum number of results to print
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Print every visible result, ignoring --limit
        #[arg(long)]
        all: bool,

        /// JSON ranking config; missing keys keep their defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit results as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Skip building embeddings; the vector signal scores 0
        #[arg(long)]
        no_embeddings: bool,
    },

    /// List the records whose embeddings are closest to the query
    Similar {
        /// JSON file holding an array of records
        records: PathBuf,

        /// Query text
        query: String,

        /// How many neighbours to return
        #[arg(short, default_value = "5")]
        k: usize,

        /// JSON ranking config; missing keys keep their defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Read a JSON array of records.
pub fn load_records(path: &Path) -> Result<RecordSet> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<Record> = serde_json::from_str(&content)?;
    Ok(RecordSet::new(records))
}

/// The config at `path`, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<RankingConfig> {
    match path {
        Some(path) => RankingConfig::from_path(path),
        None => Ok(RankingConfig::default()),
    }
}
