pub mod cooldown;
pub mod engine;
pub mod evaluator;
pub mod executor;
pub mod graph;
pub mod ledger;
pub mod path_store;
pub mod pathfinder;
pub mod selector;
