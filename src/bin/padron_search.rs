

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use padron::db::{MemoryStore, Record};
use padron::toolkit::search::query_processor::STANDARD_VOCABULARY;
use padron::{QueryExecutor, SearchConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut dataset_path: Option<PathBuf> = None;
    let mut as_json = false;
    let mut terms: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--dataset" | "-d" => {
                if i + 1 < args.len() {
                    dataset_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--json" => as_json = true,
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => terms.push(other.to_string()),
        }
        i += 1;
    }

    let config = SearchConfig::load(config_path.as_deref()).context("loading configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let Some(dataset) = dataset_path.or_else(|| config.dataset_path.clone()) else {
        bail!("no dataset given: pass --dataset PATH or set PADRON_DATASET_PATH");
    };

    let query = terms.join(" ");
    if query.trim().is_empty() {
        print_help();
        return Ok(());
    }

    let store = MemoryStore::from_json_file(&dataset)
        .with_context(|| format!("loading dataset {}", dataset.display()))?;
    let executor = QueryExecutor::new(
        Arc::new(store),
        STANDARD_VOCABULARY.clone(),
        config.limits()?,
    );

    let response = executor.search(&query).await;
    info!(
        "{} result(s), {} diagnostic(s)",
        response.len(),
        response.diagnostics.len()
    );

    if as_json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.is_empty() {
        println!("Sin resultados para \"{}\"", query.trim());
        return Ok(());
    }

    for record in &response.records {
        println!("{}", summary_line(record));
    }

    Ok(())
}

fn summary_line(record: &Record) -> String {
    match record {
        Record::Establishment(e) => format!(
            "[establecimiento] CUE {} | {} | {} | {}",
            e.cue,
            e.name,
            e.level.as_deref().unwrap_or("-"),
            e.district
        ),
        Record::Organism(o) => format!(
            "[organismo] {} | {} | {} | {}",
            o.code,
            record.display_name(),
            o.org_type,
            o.district
        ),
    }
}

fn print_help() {
    println!("padron-search - search establishments and decentralized organisms");
    println!();
    println!("USAGE:");
    println!("    padron-search [OPTIONS] QUERY...");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config PATH     Config file (TOML/JSON), layered under PADRON_* env vars");
    println!("    -d, --dataset PATH    JSON dataset with establishments and organisms");
    println!("        --json            Print the full response as JSON");
    println!("    -h, --help            Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    padron-search -d padron.json 06012345");
    println!("    padron-search -d padron.json secundaria 8");
    println!("    padron-search -d padron.json jr01");
}
