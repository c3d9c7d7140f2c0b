use clap::Parser;
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;

use issue_rank::{
    index_inputs, MatchEvidence, RankingConfig, RecordSet, RecordStore, RelevanceEngine, Result,
};

mod cli;
use cli::display::{header, result_line, score_value, themed, CYAN, GRAY};
use cli::{load_config, load_records, Cli, Commands};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

/// Log filter variable; `ISSUE_RANK_LOG=debug` shows per-chunk indexing.
const LOG_ENV: &str = "ISSUE_RANK_LOG";

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Search {
            records,
            query,
            limit,
            all,
            config,
            json,
            no_embeddings,
        } => run_search(SearchArgs {
            records: &records,
            query: &query,
            limit: if all { usize::MAX } else { limit },
            config: config.as_deref(),
            json,
            embeddings: !no_embeddings,
        }),
        Commands::Similar {
            records,
            query,
            k,
            config,
        } => run_similar(&records, &query, k, config.as_deref()),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// =============================================================================
// SEARCH
// =============================================================================

struct SearchArgs<'a> {
    records: &'a Path,
    query: &'a str,
    limit: usize,
    config: Option<&'a Path>,
    json: bool,
    embeddings: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonHit<'a> {
    id: u64,
    number: u64,
    title: &'a str,
    score: f64,
    evidence: &'a MatchEvidence,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    query: &'a str,
    visible: usize,
    total: usize,
    results: Vec<JsonHit<'a>>,
}

fn run_search(args: SearchArgs<'_>) -> Result<()> {
    let config = load_config(args.config)?;
    let store = load_records(args.records)?;
    let engine = RelevanceEngine::with_hash_encoder(config)?;
    let ids = store.ids();

    if args.embeddings {
        build_embeddings(&engine, &store, !args.json)?;
    }

    let results = engine.search(args.query, &store, &ids);
    let ranked: Vec<_> = results.ranked().into_iter().take(args.limit).collect();

    if args.json {
        let hits = ranked
            .iter()
            .filter_map(|(id, result)| {
                store.get(*id).map(|record| JsonHit {
                    id: id.get(),
                    number: record.number,
                    title: &record.title,
                    score: result.score,
                    evidence: &result.evidence,
                })
            })
            .collect();
        let output = JsonOutput {
            query: args.query,
            visible: results.visible_count(),
            total: results.len(),
            results: hits,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", header(args.query, results.visible_count(), results.len()));
    if ranked.is_empty() {
        println!("{}", themed(GRAY, &[], "no matching records"));
        return Ok(());
    }
    for (rank, (id, result)) in ranked.iter().enumerate() {
        if let Some(record) = store.get(*id) {
            println!("{}", result_line(rank + 1, record, result));
        }
    }
    Ok(())
}

/// Embed every record, with a progress bar on terminals.
fn build_embeddings(engine: &RelevanceEngine, store: &RecordSet, show_progress: bool) -> Result<()> {
    let inputs = index_inputs(store, &store.ids());
    let index = engine.index();
    let cancel = AtomicBool::new(false);

    #[cfg(feature = "parallel")]
    {
        let pb = if show_progress && cli::display::use_colors() {
            ProgressBar::new(inputs.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
        ) {
            pb.set_style(style.progress_chars("━━╸"));
        }
        pb.set_prefix("Embedding");
        index.index_batch_with(&inputs, index.chunk_size(), &cancel, |done, _| {
            pb.set_position(done as u64)
        })?;
        pb.finish_and_clear();
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = show_progress;
        index.index_batch_with(&inputs, index.chunk_size(), &cancel, |_, _| {})?;
    }

    Ok(())
}

// =============================================================================
// SIMILAR
// =============================================================================

fn run_similar(records: &Path, query: &str, k: usize, config: Option<&Path>) -> Result<()> {
    let config: RankingConfig = load_config(config)?;
    let store = load_records(records)?;
    let engine = RelevanceEngine::with_hash_encoder(config)?;
    build_embeddings(&engine, &store, true)?;

    let neighbours = engine.index().top_k(query, k)?;
    if neighbours.is_empty() {
        println!("{}", themed(GRAY, &[], "no neighbours"));
        return Ok(());
    }
    for (rank, hit) in neighbours.iter().enumerate() {
        let (number, title) = store
            .get(hit.id)
            .map_or((0, ""), |r| (r.number, r.title.as_str()));
        println!(
            "{:>3}. {}  {} {}",
            rank + 1,
            score_value(hit.score),
            themed(CYAN, &[], &format!("#{}", number)),
            title
        );
    }
    Ok(())
}
