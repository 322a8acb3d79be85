use ahash::AHashMap;
use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

/// One timestamped snapshot of close prices across the pair universe.
///
/// Prices are frozen for the whole tick; a pair missing from `prices`
/// simply has no data at this timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tick {
    pub timestamp: DateTime<Utc>,
    pub prices: AHashMap<String, f64>,
}

impl Tick {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            prices: AHashMap::new(),
        }
    }

    #[inline]
    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }

    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }
}
