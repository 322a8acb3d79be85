use tracing::{ info, warn };

use crate::models::path::{ ArbPath, Leg };
use super::graph::CurrencyGraph;

/// Enumerate every 3-leg cycle through `base`.
///
/// For each successor `mid` of base and each successor `end` of `mid`
/// (with `end` distinct from both), a closing edge `end→base` completes a
/// triangle. Cycles that do not touch the base currency are intentionally
/// not discovered: all simulated capital is denominated in it.
///
/// A base currency with no outgoing edges yields an empty set, reported as
/// "no paths found" rather than an error.
pub fn find_triangular_paths(graph: &CurrencyGraph, base: &str) -> Vec<ArbPath> {
    let mut paths = Vec::new();

    if !graph.contains(base) {
        warn!("Base currency {} is not present in the trading graph", base);
        return paths;
    }

    let first_edges = graph.edges_from(base);
    if first_edges.is_empty() {
        warn!("No pairs lead out of {}; cannot build any arbitrage path", base);
        return paths;
    }
    info!("Found {} candidate intermediate currencies for {}", first_edges.len(), base);

    for first in first_edges {
        let mid = first.to.as_ref();

        for second in graph.edges_from(mid) {
            let end = second.to.as_ref();
            if end == base || end == mid {
                continue;
            }

            // First edge closing the cycle wins when duplicates exist.
            let Some(third) = graph
                .edges_from(end)
                .iter()
                .find(|e| e.to.as_ref() == base) else {
                continue;
            };

            paths.push(
                ArbPath::new([
                    Leg::new(first.symbol.clone(), first.direction),
                    Leg::new(second.symbol.clone(), second.direction),
                    Leg::new(third.symbol.clone(), third.direction),
                ])
            );
        }
    }

    info!("Found {} triangular paths starting and ending at {}", paths.len(), base);
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::direction::Direction;

    fn triangle_graph() -> CurrencyGraph {
        CurrencyGraph::build(
            &["BTC_USDT".to_string(), "ETH_BTC".to_string(), "ETH_USDT".to_string()]
        )
    }

    #[test]
    fn every_path_is_a_closed_triangle() {
        let graph = triangle_graph();
        let paths = find_triangular_paths(&graph, "USDT");

        assert!(!paths.is_empty());
        for path in &paths {
            assert_eq!(path.legs.len(), 3);

            // Walk the legs and confirm the chain closes at the base.
            let mut held = "USDT".to_string();
            for leg in &path.legs {
                let (base, quote) = leg.split_symbol().expect("leg symbol must split");
                match leg.direction {
                    Direction::Forward => {
                        assert_eq!(held, base);
                        held = quote.to_string();
                    }
                    Direction::Reverse => {
                        assert_eq!(held, quote);
                        held = base.to_string();
                    }
                }
                // Each leg corresponds to an edge actually present.
                assert!(
                    graph
                        .edges_from(&if leg.direction == Direction::Forward {
                            base.to_string()
                        } else {
                            quote.to_string()
                        })
                        .iter()
                        .any(|e| e.symbol == leg.symbol)
                );
            }
            assert_eq!(held, "USDT");
        }
    }

    #[test]
    fn finds_the_expected_route() {
        let paths = find_triangular_paths(&triangle_graph(), "USDT");
        assert!(
            paths
                .iter()
                .any(|p| p.describe() == "BTC_USDT(-) → ETH_BTC(-) → ETH_USDT(+)")
        );
    }

    #[test]
    fn absent_base_yields_empty_set() {
        let graph = triangle_graph();
        assert!(find_triangular_paths(&graph, "EUR").is_empty());
    }

    #[test]
    fn no_triangle_without_closing_edge() {
        let graph = CurrencyGraph::build(&["BTC_USDT".to_string(), "ETH_BTC".to_string()]);
        assert!(find_triangular_paths(&graph, "USDT").is_empty());
    }
}
