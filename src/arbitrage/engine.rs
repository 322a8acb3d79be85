use std::time::Instant;

use ahash::AHashSet;
use tracing::{ debug, info };

use crate::models::path::{ ArbPath, PathId };
use crate::models::tick::Tick;
use crate::models::trade::TradeRecord;
use super::cooldown::CooldownScheduler;
use super::executor::ExecutionSimulator;
use super::graph::CurrencyGraph;
use super::ledger::{ RunSummary, TradeLedger };
use super::selector::{ select_trades, SelectorParams };

/// Conditions that prevent a run from starting at all. Per-tick failures
/// never surface here; they degrade to "this path contributes nothing".
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("need at least 3 usable pairs to form a triangle, got {0}")]
    TooFewPairs(usize),
    #[error("base currency {0} does not appear in any usable pair")]
    UnknownBaseCurrency(String),
    #[error("no triangular paths available for base currency {0}")]
    NoPaths(String),
}

/// Knobs the engine consumes, resolved once before the run.
#[derive(Debug, Clone)]
pub struct EngineParams {
    pub base_currency: String,
    pub fee: f64,
    pub notional: f64,
    pub threshold: f64,
    pub max_positions: usize,
    pub cooldown_secs: i64,
    pub starting_cash: f64,
}

/// The replay engine: owns the event loop and all run-long state.
///
/// Strictly single-threaded. Per tick: cooldown gate, then a full
/// evaluation/selection pass over the frozen snapshot, then sequential
/// simulated execution, then the cooldown is armed if anything traded.
#[derive(Debug)]
pub struct Engine {
    params: EngineParams,
    paths: Vec<ArbPath>,
    simulator: ExecutionSimulator,
    cooldown: CooldownScheduler,
    active: AHashSet<PathId>,
    ledger: TradeLedger,
}

impl Engine {
    /// Validate the setup and build the run state. The path set may come
    /// from discovery or from a persisted file; either way it must be
    /// non-empty and the graph must actually support triangles.
    pub fn new(
        graph: &CurrencyGraph,
        paths: Vec<ArbPath>,
        params: EngineParams
    ) -> Result<Self, EngineError> {
        let usable_pairs = graph.edge_count() / 2;
        if usable_pairs < 3 {
            return Err(EngineError::TooFewPairs(usable_pairs));
        }
        if !graph.contains(&params.base_currency) {
            return Err(EngineError::UnknownBaseCurrency(params.base_currency.clone()));
        }
        if paths.is_empty() {
            return Err(EngineError::NoPaths(params.base_currency.clone()));
        }

        info!(
            "Engine ready: {} paths, {} usable pairs, notional {} {}, threshold {:.4}%",
            paths.len(),
            usable_pairs,
            params.notional,
            params.base_currency,
            params.threshold * 100.0
        );

        Ok(Self {
            simulator: ExecutionSimulator::new(
                params.base_currency.clone(),
                params.fee,
                params.starting_cash
            ),
            cooldown: CooldownScheduler::new(params.cooldown_secs),
            active: AHashSet::new(),
            ledger: TradeLedger::new(),
            params,
            paths,
        })
    }

    /// Process one tick. Returns how many paths were executed.
    pub fn on_tick(&mut self, tick: &Tick) -> usize {
        if self.cooldown.is_suppressed(tick.timestamp) {
            debug!("Tick {} suppressed by cooldown", tick.timestamp);
            return 0;
        }

        let started = Instant::now();

        let selected = select_trades(
            &self.paths,
            tick,
            SelectorParams {
                base: &self.params.base_currency,
                notional: self.params.notional,
                fee: self.params.fee,
                threshold: self.params.threshold,
                available_cash: self.simulator.cash,
                max_positions: self.params.max_positions,
            },
            &mut self.active
        );

        let executed = self.simulator.execute_batch(
            &selected,
            tick,
            self.params.notional,
            &mut self.active,
            &mut self.ledger
        );

        if executed > 0 {
            self.cooldown.arm(tick.timestamp);
        }

        self.ledger.record_latency(started.elapsed().as_secs_f64() * 1000.0);
        executed
    }

    /// Consume an ascending-timestamp tick sequence and finish the run.
    pub fn run(mut self, ticks: impl IntoIterator<Item = Tick>) -> (RunSummary, Vec<TradeRecord>) {
        let mut tick_count: usize = 0;
        for tick in ticks {
            self.on_tick(&tick);
            tick_count += 1;
        }
        info!("Replay finished after {} ticks", tick_count);
        self.finish()
    }

    /// Final summary plus the full trade ledger.
    pub fn finish(self) -> (RunSummary, Vec<TradeRecord>) {
        let summary = self.ledger.summary(self.simulator.cash);
        info!(
            "Run complete: {} paths checked per tick, {} trades, total profit {:.4}, final cash {:.4}",
            self.paths.len(),
            summary.num_trades,
            summary.total_profit,
            summary.final_cash
        );
        info!(
            "Timing: avg tick evaluation {:.2}ms, max {:.2}ms",
            summary.avg_eval_ms,
            summary.max_eval_ms
        );
        (summary, self.ledger.into_records())
    }

    #[inline]
    pub fn cash(&self) -> f64 {
        self.simulator.cash
    }

    #[inline]
    pub fn num_trades(&self) -> usize {
        self.ledger.num_trades()
    }
}
