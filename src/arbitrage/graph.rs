use std::sync::Arc;

use ahash::AHashMap;
use tracing::warn;

use crate::models::direction::Direction;
use crate::models::split_pair;

/// Directed edge of the currency graph, tagged with the pair symbol it
/// came from and the trade direction that symbol implies for this hop.
#[derive(Debug, Clone)]
pub struct PairEdge {
    pub to: Arc<str>,
    pub symbol: Arc<str>,
    pub direction: Direction,
}

/// Adjacency map over currency codes.
///
/// Each well-formed `"BASE_QUOTE"` symbol contributes two edges: a
/// `Forward` edge BASE→QUOTE (sell base) and a `Reverse` edge QUOTE→BASE
/// (buy base). Built once per run and read-only afterwards; only 2-hop
/// neighbor queries are ever needed, so a plain adjacency map beats a
/// general graph structure.
#[derive(Debug, Default)]
pub struct CurrencyGraph {
    adjacency: AHashMap<Arc<str>, Vec<PairEdge>>,
    edge_count: usize,
}

impl CurrencyGraph {
    /// Build the graph from a pair universe. Malformed symbols are skipped
    /// with a warning; duplicate symbols each add their own edges.
    pub fn build(pairs: &[String]) -> Self {
        let mut graph = CurrencyGraph::default();

        for pair in pairs {
            let Some((base, quote)) = split_pair(pair) else {
                warn!("Skipping malformed pair symbol: {:?}", pair);
                continue;
            };

            let symbol: Arc<str> = Arc::from(pair.as_str());
            let base: Arc<str> = Arc::from(base);
            let quote: Arc<str> = Arc::from(quote);

            graph.add_edge(base.clone(), PairEdge {
                to: quote.clone(),
                symbol: symbol.clone(),
                direction: Direction::Forward,
            });
            graph.add_edge(quote, PairEdge {
                to: base,
                symbol,
                direction: Direction::Reverse,
            });
        }

        graph
    }

    fn add_edge(&mut self, from: Arc<str>, edge: PairEdge) {
        self.adjacency
            .entry(from)
            .or_insert_with(|| Vec::with_capacity(8))
            .push(edge);
        self.edge_count += 1;
    }

    /// Edges leaving `currency`, empty if the currency is unknown.
    #[inline]
    pub fn edges_from(&self, currency: &str) -> &[PairEdge] {
        self.adjacency
            .get(currency)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    #[inline]
    pub fn contains(&self, currency: &str) -> bool {
        self.adjacency.contains_key(currency)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
