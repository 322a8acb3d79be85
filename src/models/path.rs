use std::fmt;
use std::hash::{ Hash, Hasher };
use std::sync::Arc;

use super::direction::Direction;

/// One conversion step of an arbitrage path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leg {
    pub symbol: Arc<str>,
    pub direction: Direction,
}

impl Leg {
    #[inline]
    pub fn new(symbol: impl Into<Arc<str>>, direction: Direction) -> Self {
        Self { symbol: symbol.into(), direction }
    }

    /// Split the leg's pair symbol into (base, quote).
    ///
    /// Symbols reaching a leg came through the graph builder, which already
    /// rejected anything that does not split cleanly.
    pub fn split_symbol(&self) -> Option<(&str, &str)> {
        crate::models::split_pair(&self.symbol)
    }
}

/// Canonical identity of a path, stable for the whole run.
///
/// Computed once at discovery time as a content hash over the ordered legs,
/// so in-flight tracking and deduplication never re-serialize the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathId(u64);

/// A triangular arbitrage path: exactly three legs that start and end at
/// the base currency.
#[derive(Debug, Clone)]
pub struct ArbPath {
    pub legs: [Leg; 3],
    id: PathId,
}

impl ArbPath {
    pub fn new(legs: [Leg; 3]) -> Self {
        let mut hasher = ahash::AHasher::default();
        for leg in &legs {
            leg.symbol.hash(&mut hasher);
            leg.direction.sign().hash(&mut hasher);
        }
        let id = PathId(hasher.finish());
        Self { legs, id }
    }

    #[inline]
    pub fn id(&self) -> PathId {
        self.id
    }

    /// Human-readable route, e.g. `BTC_USDT(-) → ETH_BTC(-) → ETH_USDT(+)`.
    pub fn describe(&self) -> String {
        self.legs
            .iter()
            .map(|leg| format!("{}({})", leg.symbol, leg.direction))
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

impl fmt::Display for ArbPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_path() -> ArbPath {
        ArbPath::new([
            Leg::new("BTC_USDT", Direction::Reverse),
            Leg::new("ETH_BTC", Direction::Reverse),
            Leg::new("ETH_USDT", Direction::Forward),
        ])
    }

    #[test]
    fn identity_is_stable_and_order_sensitive() {
        let a = sample_path();
        let b = sample_path();
        assert_eq!(a.id(), b.id());

        let reordered = ArbPath::new([
            Leg::new("ETH_BTC", Direction::Reverse),
            Leg::new("BTC_USDT", Direction::Reverse),
            Leg::new("ETH_USDT", Direction::Forward),
        ]);
        assert_ne!(a.id(), reordered.id());

        let flipped = ArbPath::new([
            Leg::new("BTC_USDT", Direction::Forward),
            Leg::new("ETH_BTC", Direction::Reverse),
            Leg::new("ETH_USDT", Direction::Forward),
        ]);
        assert_ne!(a.id(), flipped.id());
    }

    #[test]
    fn describe_annotates_directions() {
        assert_eq!(sample_path().describe(), "BTC_USDT(-) → ETH_BTC(-) → ETH_USDT(+)");
    }

    #[test]
    fn split_symbol_rejects_malformed() {
        assert_eq!(Leg::new("BTC_USDT", Direction::Forward).split_symbol(), Some(("BTC", "USDT")));
        assert_eq!(Leg::new("BTCUSDT", Direction::Forward).split_symbol(), None);
        assert_eq!(Leg::new("_USDT", Direction::Forward).split_symbol(), None);
    }
}
