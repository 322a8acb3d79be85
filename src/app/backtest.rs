use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{ Context, Result };
use chrono::Local;
use tracing::{ info, warn };

use crate::arbitrage::engine::{ Engine, EngineParams };
use crate::arbitrage::graph::CurrencyGraph;
use crate::arbitrage::path_store::{ load_paths, save_paths };
use crate::arbitrage::pathfinder::find_triangular_paths;
use crate::config::Config;
use crate::models::normalize_pair;
use crate::models::path::ArbPath;
use crate::models::trade::TradeRecord;
use crate::utils::console::{ print_app_starting, print_config, print_summary };
use super::ticks::read_ticks;

/// Replay the configured tick file through the arbitrage engine.
pub fn run_backtest(config: Config) -> Result<()> {
    print_app_starting();
    print_config(&config);

    let (graph, paths) = prepare_paths(&config)?;

    let engine = Engine::new(&graph, paths, EngineParams {
        base_currency: config.base_currency.clone(),
        fee: config.fee,
        notional: config.trade_amount,
        threshold: config.threshold,
        max_positions: config.max_positions,
        cooldown_secs: config.cooldown_secs,
        starting_cash: config.starting_cash,
    }).context("Arbitrage engine setup failed")?;

    let ticks = read_ticks(&config.ticks_file)?;
    info!("Replaying {} ticks from {}", ticks.len(), config.ticks_file.display());

    let (summary, records) = engine.run(ticks);

    if records.is_empty() {
        info!("Run finished without any arbitrage execution");
    } else {
        let exported = export_trades(&config, &records)?;
        info!("Exported {} trade records to {}", records.len(), exported.display());
    }

    print_summary(&summary);
    Ok(())
}

/// Discover (or just reload) the path set and persist it, without replaying.
pub fn run_find_paths(config: Config) -> Result<()> {
    print_app_starting();
    print_config(&config);

    let pairs = normalized_pairs(&config);
    let graph = CurrencyGraph::build(&pairs);
    info!("Graph built: {} currencies, {} edges", graph.node_count(), graph.edge_count());

    let started = Instant::now();
    let paths = find_triangular_paths(&graph, &config.base_currency);
    anyhow::ensure!(!paths.is_empty(), "No triangular paths found for {}", config.base_currency);

    let file = save_paths(&config.paths_dir, &paths, &config.base_currency, Some(started.elapsed()))?;
    info!("Path set written to {}", file.display());

    for (i, path) in paths.iter().take(3).enumerate() {
        info!("Sample path {}: {}", i + 1, path);
    }
    Ok(())
}

fn normalized_pairs(config: &Config) -> Vec<String> {
    config.pairs.iter().map(|p| normalize_pair(p)).collect()
}

/// Resolve the path set: a loadable persisted file wins, otherwise discover
/// from the pair universe (optionally persisting the result).
fn prepare_paths(config: &Config) -> Result<(CurrencyGraph, Vec<ArbPath>)> {
    let pairs = normalized_pairs(config);
    let graph = CurrencyGraph::build(&pairs);
    info!("Graph built: {} currencies, {} edges", graph.node_count(), graph.edge_count());

    if let Some(paths_file) = &config.paths_file {
        let loaded = load_paths(paths_file);
        if loaded.is_empty() {
            warn!(
                "Path file {} yielded nothing; falling back to discovery",
                paths_file.display()
            );
        } else {
            return Ok((graph, loaded));
        }
    }

    let started = Instant::now();
    let paths = find_triangular_paths(&graph, &config.base_currency);

    if config.save_paths && !paths.is_empty() {
        match save_paths(&config.paths_dir, &paths, &config.base_currency, Some(started.elapsed())) {
            Ok(file) => info!("Discovered path set saved to {}", file.display()),
            Err(e) => warn!("Could not persist discovered paths: {:#}", e),
        }
    }

    Ok((graph, paths))
}

/// One JSON line per trade, timestamped filename carrying base currency
/// and threshold so runs stay distinguishable side by side.
fn export_trades(config: &Config, records: &[TradeRecord]) -> Result<PathBuf> {
    fs::create_dir_all(&config.trades_dir).with_context(||
        format!("Failed to create trades directory {}", config.trades_dir.display())
    )?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!(
        "arb_trades_{}_thresh{:.2}_{}.jsonl",
        config.base_currency,
        config.threshold * 100.0,
        timestamp
    );
    let path = config.trades_dir.join(filename);

    let mut file = fs::File
        ::create(&path)
        .with_context(|| format!("Failed to create trade export {}", path.display()))?;
    for record in records {
        writeln!(file, "{}", serde_json::to_string(record)?)?;
    }

    Ok(path)
}
