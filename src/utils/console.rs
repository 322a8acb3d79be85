use crate::config::Config;
use crate::arbitrage::ledger::RunSummary;
use tracing::info;
use colored::*;
use figlet_rs::FIGfont;

pub fn print_config(config: &Config) {
    let json = serde_json::to_string_pretty(config).unwrap_or_default();

    info!("\n{}: \n{}", String::from("[CONFIG]").blue().underline(), json.magenta());
}

pub fn print_app_starting() {
    let standard_font = FIGfont::standard().unwrap();
    let figure = standard_font.convert("TAB replay...");
    info!("\n{}", figure.unwrap());
}

pub fn print_summary(summary: &RunSummary) {
    println!("\n{}", "=== BACKTEST SUMMARY ===".bright_purple().bold());
    println!("Trades executed : {}", summary.num_trades.to_string().cyan());
    println!(
        "Total profit    : {}",
        format!("{:.4}", summary.total_profit).bright_green().bold()
    );
    println!("Final cash      : {:.4}", summary.final_cash);
    println!(
        "Tick evaluation : avg {:.2} ms, max {:.2} ms",
        summary.avg_eval_ms,
        summary.max_eval_ms
    );
    println!("{}\n", "========================".bright_purple().bold());
}
