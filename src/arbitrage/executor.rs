use ahash::AHashSet;
use colored::Colorize;
use tracing::{ info, warn };

use crate::models::direction::Direction;
use crate::models::path::{ ArbPath, PathId };
use crate::models::tick::Tick;
use crate::models::trade::TradeRecord;
use super::evaluator::convert_legs;
use super::ledger::TradeLedger;

/// Simulated execution against a single cash balance.
///
/// The whole run is virtual bookkeeping: no per-currency inventory is
/// tracked, each path settles purely arithmetically against the tick's
/// quoted prices and only its net cash effect is applied.
#[derive(Debug)]
pub struct ExecutionSimulator {
    base: String,
    fee: f64,
    pub cash: f64,
}

impl ExecutionSimulator {
    pub fn new(base: impl Into<String>, fee: f64, starting_cash: f64) -> Self {
        Self {
            base: base.into(),
            fee,
            cash: starting_cash,
        }
    }

    /// Execute one batch of selected paths, leg by leg, against the tick's
    /// frozen snapshot. Every path leaves the active set afterwards whether
    /// it settled or aborted; an aborted path changes nothing else.
    pub fn execute_batch(
        &mut self,
        selected: &[(f64, &ArbPath)],
        tick: &Tick,
        notional: f64,
        active: &mut AHashSet<PathId>,
        ledger: &mut TradeLedger
    ) -> usize {
        let mut executed = 0;

        for (_, path) in selected {
            if self.execute_one(path, tick, notional, ledger) {
                executed += 1;
            }
            // In-flight membership is scoped to the batch, not to a
            // holding period.
            active.remove(&path.id());
        }

        executed
    }

    fn execute_one(
        &mut self,
        path: &ArbPath,
        tick: &Tick,
        notional: f64,
        ledger: &mut TradeLedger
    ) -> bool {
        let Some(settled) = convert_legs(path, tick, notional, self.fee, &self.base) else {
            warn!("Aborting {}: missing price or currency mismatch at execution time", path);
            return false;
        };

        self.cash = self.cash - notional + settled;
        let profit_rate = (settled - notional) / notional;

        ledger.record(TradeRecord {
            timestamp: tick.timestamp,
            path: path.describe(),
            profit_rate,
            amount: notional,
            final_amount: settled,
        });

        info!(
            "Executed arbitrage: {}; rates: {}; profit: {}%; cash: {:.4}",
            self.route_description(path),
            self.rate_description(path, tick),
            format!("{:.4}", profit_rate * 100.0).bright_green().bold(),
            self.cash
        );

        true
    }

    /// Route shown in held-currency order, e.g. `USDT_BTC → BTC_ETH → ETH_USDT`.
    fn route_description(&self, path: &ArbPath) -> String {
        path.legs
            .iter()
            .map(|leg| {
                match (leg.split_symbol(), leg.direction) {
                    (Some((base, quote)), Direction::Reverse) => format!("{}_{}", quote, base),
                    _ => leg.symbol.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" → ")
    }

    fn rate_description(&self, path: &ArbPath, tick: &Tick) -> String {
        path.legs
            .iter()
            .map(|leg| {
                match (tick.price(&leg.symbol), leg.direction) {
                    (Some(p), Direction::Forward) => format!("{:.8}", p),
                    (Some(p), Direction::Reverse) => format!("1/{:.8}", p),
                    (None, _) => "NA".to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::path::Leg;
    use chrono::Utc;

    fn sample_path() -> ArbPath {
        ArbPath::new([
            Leg::new("BTC_USDT", Direction::Reverse),
            Leg::new("ETH_BTC", Direction::Reverse),
            Leg::new("ETH_USDT", Direction::Forward),
        ])
    }

    fn sample_tick() -> Tick {
        Tick::new(Utc::now())
            .with_price("BTC_USDT", 50000.0)
            .with_price("ETH_BTC", 0.05)
            .with_price("ETH_USDT", 2600.0)
    }

    #[test]
    fn settles_into_cash_and_ledger() {
        let path = sample_path();
        let mut simulator = ExecutionSimulator::new("USDT", 0.0005, 1000.0);
        let mut ledger = TradeLedger::new();
        let mut active = AHashSet::new();
        active.insert(path.id());

        let executed = simulator.execute_batch(
            &[(0.038, &path)],
            &sample_tick(),
            100.0,
            &mut active,
            &mut ledger
        );

        assert_eq!(executed, 1);
        // 100 → 103.844… so cash moves from 1000 by the same margin.
        assert!((simulator.cash - 1003.844).abs() < 0.01);
        assert_eq!(ledger.records().len(), 1);
        assert!((ledger.total_profit() - 3.844).abs() < 0.01);
        assert!(active.is_empty());

        let record = &ledger.records()[0];
        assert_eq!(record.amount, 100.0);
        assert!((record.final_amount - 103.844).abs() < 0.01);
        assert_eq!(record.path, "BTC_USDT(-) → ETH_BTC(-) → ETH_USDT(+)");
    }

    #[test]
    fn aborted_path_changes_nothing_but_the_active_set() {
        let path = sample_path();
        let mut tick = sample_tick();
        tick.prices.remove("ETH_USDT");

        let mut simulator = ExecutionSimulator::new("USDT", 0.0005, 1000.0);
        let mut ledger = TradeLedger::new();
        let mut active = AHashSet::new();
        active.insert(path.id());

        let executed = simulator.execute_batch(
            &[(0.038, &path)],
            &tick,
            100.0,
            &mut active,
            &mut ledger
        );

        assert_eq!(executed, 0);
        assert_eq!(simulator.cash, 1000.0);
        assert!(ledger.records().is_empty());
        assert!(active.is_empty());
    }

    #[test]
    fn one_failure_does_not_poison_the_batch() {
        let good = sample_path();
        let bad = ArbPath::new([
            Leg::new("BTC_USDT", Direction::Reverse),
            Leg::new("XRP_BTC", Direction::Reverse),
            Leg::new("XRP_USDT", Direction::Forward),
        ]);
        let tick = sample_tick(); // no XRP prices

        let mut simulator = ExecutionSimulator::new("USDT", 0.0005, 1000.0);
        let mut ledger = TradeLedger::new();
        let mut active = AHashSet::new();
        active.insert(good.id());
        active.insert(bad.id());

        let executed = simulator.execute_batch(
            &[
                (0.1, &bad),
                (0.038, &good),
            ],
            &tick,
            100.0,
            &mut active,
            &mut ledger
        );

        assert_eq!(executed, 1);
        assert_eq!(ledger.records().len(), 1);
        assert!(active.is_empty());
    }
}
