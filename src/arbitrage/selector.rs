use ahash::AHashSet;
use tracing::debug;

use crate::models::path::{ ArbPath, PathId };
use crate::models::tick::Tick;
use super::evaluator::evaluate_path;

/// Per-tick trade selection parameters.
#[derive(Debug, Clone, Copy)]
pub struct SelectorParams<'a> {
    pub base: &'a str,
    pub notional: f64,
    pub fee: f64,
    /// Minimum profit ratio; only strictly greater paths are kept.
    pub threshold: f64,
    pub available_cash: f64,
    pub max_positions: usize,
}

/// Pick the paths to execute this tick.
///
/// Evaluates every path whose identity is not already in flight, keeps
/// those strictly above the profit threshold, orders them by profit
/// descending (stable, so ties keep discovery order) and caps the batch by
/// both the position limit and the cash budget. Each chosen path's identity
/// is inserted into `active` so it cannot be picked twice within the batch.
pub fn select_trades<'a>(
    paths: &'a [ArbPath],
    tick: &Tick,
    params: SelectorParams<'_>,
    active: &mut AHashSet<PathId>
) -> Vec<(f64, &'a ArbPath)> {
    let budget_cap = if params.notional > 0.0 {
        (params.available_cash / params.notional).floor() as isize
    } else {
        0
    };
    let cap = params.max_positions.min(budget_cap.max(0) as usize);
    if cap == 0 {
        return Vec::new();
    }

    let mut profitable: Vec<(f64, &ArbPath)> = paths
        .iter()
        .filter(|path| !active.contains(&path.id()))
        .filter_map(|path| {
            evaluate_path(path, tick, params.notional, params.fee, params.base).and_then(
                |profit| {
                    (profit > params.threshold).then_some((profit, path))
                }
            )
        })
        .collect();

    if profitable.is_empty() {
        return profitable;
    }

    // Stable sort: equal profits keep path discovery order.
    profitable.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    profitable.truncate(cap);

    for (profit, path) in &profitable {
        active.insert(path.id());
        debug!("Selected {} at profit {:.6}%", path, profit * 100.0);
    }

    profitable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::direction::Direction;
    use crate::models::path::Leg;
    use chrono::Utc;

    fn params(cash: f64, max_positions: usize) -> SelectorParams<'static> {
        SelectorParams {
            base: "USDT",
            notional: 100.0,
            fee: 0.0,
            threshold: 0.001,
            available_cash: cash,
            max_positions,
        }
    }

    /// Two triangles over disjoint mid currencies whose profitability is
    /// controlled through the closing pair's price.
    fn two_paths() -> Vec<ArbPath> {
        vec![
            ArbPath::new([
                Leg::new("BTC_USDT", Direction::Reverse),
                Leg::new("ETH_BTC", Direction::Reverse),
                Leg::new("ETH_USDT", Direction::Forward),
            ]),
            ArbPath::new([
                Leg::new("BTC_USDT", Direction::Reverse),
                Leg::new("XRP_BTC", Direction::Reverse),
                Leg::new("XRP_USDT", Direction::Forward),
            ])
        ]
    }

    fn tick(eth_usdt: f64, xrp_usdt: f64) -> Tick {
        Tick::new(Utc::now())
            .with_price("BTC_USDT", 50000.0)
            .with_price("ETH_BTC", 0.05)
            .with_price("ETH_USDT", eth_usdt)
            .with_price("XRP_BTC", 0.00001)
            .with_price("XRP_USDT", xrp_usdt)
    }

    #[test]
    fn sorted_by_profit_descending() {
        let paths = two_paths();
        let mut active = AHashSet::new();
        // XRP cross rate (0.55 vs fair 0.50) beats the ETH one (2600 vs 2500).
        let picked = select_trades(&paths, &tick(2600.0, 0.55), params(1000.0, 5), &mut active);

        assert_eq!(picked.len(), 2);
        assert!(picked[0].0 > picked[1].0);
        assert_eq!(picked[0].1.legs[1].symbol.as_ref(), "XRP_BTC");
    }

    #[test]
    fn capped_by_max_positions_and_cash() {
        let paths = two_paths();
        let snapshot = tick(2600.0, 0.55);

        let mut active = AHashSet::new();
        let picked = select_trades(&paths, &snapshot, params(1000.0, 1), &mut active);
        assert_eq!(picked.len(), 1);

        // 150 of cash at notional 100 only funds one trade.
        let mut active = AHashSet::new();
        let picked = select_trades(&paths, &snapshot, params(150.0, 5), &mut active);
        assert_eq!(picked.len(), 1);

        // No funding at all: empty, and nothing enters the active set.
        let mut active = AHashSet::new();
        let picked = select_trades(&paths, &snapshot, params(50.0, 5), &mut active);
        assert!(picked.is_empty());
        assert!(active.is_empty());
    }

    #[test]
    fn in_flight_paths_are_skipped() {
        let paths = two_paths();
        let mut active = AHashSet::new();
        active.insert(paths[1].id());

        let picked = select_trades(&paths, &tick(2600.0, 0.55), params(1000.0, 5), &mut active);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].1.id(), paths[0].id());
    }

    #[test]
    fn chosen_paths_enter_the_active_set() {
        let paths = two_paths();
        let mut active = AHashSet::new();
        let picked = select_trades(&paths, &tick(2600.0, 0.55), params(1000.0, 5), &mut active);

        assert_eq!(active.len(), picked.len());
        for (_, path) in &picked {
            assert!(active.contains(&path.id()));
        }
    }

    #[test]
    fn unprofitable_paths_are_dropped() {
        let paths = two_paths();
        let mut active = AHashSet::new();
        // Both cross rates at fair value: nothing clears the threshold.
        let picked = select_trades(&paths, &tick(2500.0, 0.5), params(1000.0, 5), &mut active);
        assert!(picked.is_empty());
    }
}
