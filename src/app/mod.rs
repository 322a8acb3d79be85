pub mod backtest;
pub mod ticks;
