use chrono::{ DateTime, Utc };
use serde::Serialize;

/// Immutable record of one simulated arbitrage execution.
#[derive(Debug, Clone, Serialize)]
pub struct TradeRecord {
    pub timestamp: DateTime<Utc>,
    /// Human-readable route, legs annotated with their direction sign.
    pub path: String,
    /// Realized (settled − notional) / notional.
    pub profit_rate: f64,
    /// Base-currency amount committed to the trade.
    pub amount: f64,
    /// Base-currency amount returned after the third leg.
    pub final_amount: f64,
}
