use serde::Serialize;

use crate::models::trade::TradeRecord;

/// Append-only store of executed trades plus run-level counters.
#[derive(Debug, Default)]
pub struct TradeLedger {
    records: Vec<TradeRecord>,
    total_profit: f64,
    /// Per-tick evaluation latency samples in milliseconds.
    eval_latencies_ms: Vec<f64>,
}

/// Figures handed to the reporting side at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub num_trades: usize,
    pub total_profit: f64,
    pub final_cash: f64,
    pub avg_eval_ms: f64,
    pub max_eval_ms: f64,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, trade: TradeRecord) {
        self.total_profit += trade.final_amount - trade.amount;
        self.records.push(trade);
    }

    pub fn record_latency(&mut self, millis: f64) {
        self.eval_latencies_ms.push(millis);
    }

    #[inline]
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    #[inline]
    pub fn into_records(self) -> Vec<TradeRecord> {
        self.records
    }

    #[inline]
    pub fn num_trades(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn total_profit(&self) -> f64 {
        self.total_profit
    }

    pub fn summary(&self, final_cash: f64) -> RunSummary {
        let (avg, max) = if self.eval_latencies_ms.is_empty() {
            (0.0, 0.0)
        } else {
            let sum: f64 = self.eval_latencies_ms.iter().sum();
            let max = self.eval_latencies_ms
                .iter()
                .copied()
                .fold(f64::MIN, f64::max);
            (sum / (self.eval_latencies_ms.len() as f64), max)
        };

        RunSummary {
            num_trades: self.records.len(),
            total_profit: self.total_profit,
            final_cash,
            avg_eval_ms: avg,
            max_eval_ms: max,
        }
    }
}
