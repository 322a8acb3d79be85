use anyhow::{ Context, Result };
use dotenv::dotenv;
use serde::{ Deserialize, Serialize };
use std::env;
use std::path::PathBuf;
use tracing::Level;
use crate::utils::serde_helpers::{ serialize_level, deserialize_level };

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub debug: bool,

    /// Currency all cycles start and end in, and that cash is denominated in.
    pub base_currency: String,
    /// Proportional fee charged on every leg.
    pub fee: f64,
    /// Fixed notional committed per trade, in base currency.
    pub trade_amount: f64,
    /// Fractional profit threshold, e.g. 0.001 = 0.1%.
    pub threshold: f64,
    pub max_positions: usize,
    /// Quiet period after any execution, in seconds.
    pub cooldown_secs: i64,
    pub starting_cash: f64,

    /// Pair universe, slash or underscore form.
    pub pairs: Vec<String>,
    /// Newline-delimited JSON tick file to replay.
    pub ticks_file: PathBuf,

    /// Optional persisted path set; bypasses discovery when it loads.
    pub paths_file: Option<PathBuf>,
    pub save_paths: bool,
    pub paths_dir: PathBuf,
    pub trades_dir: PathBuf,

    #[serde(serialize_with = "serialize_level", deserialize_with = "deserialize_level")]
    pub log_level: Level,
    pub log_config: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub directory: PathBuf,
    pub filename_prefix: String,
    pub rotation: LogRotation,
    pub max_files: Option<usize>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load environment variables from .env file; absence is fine.
        if let Err(e) = dotenv() {
            eprintln!("Warning: could not load .env file: {}", e);
        }

        let debug = env
            ::var("TAB_DEBUG")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .context("Failed to parse TAB_DEBUG environment variable")?;

        let base_currency = env::var("TAB_BASE_CURRENCY").unwrap_or_else(|_| "USDT".to_string());

        let fee = env
            ::var("TAB_FEE")
            .unwrap_or_else(|_| "0.0005".to_string())
            .parse::<f64>()
            .context("Failed to parse TAB_FEE environment variable")?;

        if !(0.0..1.0).contains(&fee) {
            anyhow::bail!("TAB_FEE must satisfy 0 <= fee < 1, got {}", fee);
        }

        let trade_amount = env
            ::var("TAB_TRADE_AMOUNT")
            .unwrap_or_else(|_| "100.0".to_string())
            .parse::<f64>()
            .context("Failed to parse TAB_TRADE_AMOUNT environment variable")?;

        let threshold = env
            ::var("TAB_THRESHOLD")
            .unwrap_or_else(|_| "0.001".to_string())
            .parse::<f64>()
            .context("Failed to parse TAB_THRESHOLD environment variable")?;

        let max_positions = env
            ::var("TAB_MAX_POSITIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<usize>()
            .context("Failed to parse TAB_MAX_POSITIONS environment variable")?;

        let cooldown_secs = env
            ::var("TAB_COOLDOWN_SECS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<i64>()
            .context("Failed to parse TAB_COOLDOWN_SECS environment variable")?;

        let starting_cash = env
            ::var("TAB_STARTING_CASH")
            .unwrap_or_else(|_| "10000.0".to_string())
            .parse::<f64>()
            .context("Failed to parse TAB_STARTING_CASH environment variable")?;

        let pairs: Vec<String> = env
            ::var("TAB_PAIRS")
            .context("TAB_PAIRS environment variable not set")?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let ticks_file = PathBuf::from(
            env::var("TAB_TICKS_FILE").context("TAB_TICKS_FILE environment variable not set")?
        );

        let paths_file = env::var("TAB_PATHS_FILE").ok().map(PathBuf::from);

        let save_paths = env
            ::var("TAB_SAVE_PATHS")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .context("Failed to parse TAB_SAVE_PATHS environment variable")?;

        let paths_dir = PathBuf::from(
            env::var("TAB_PATHS_DIR").unwrap_or_else(|_| "arb_paths".to_string())
        );

        let trades_dir = PathBuf::from(
            env::var("TAB_TRADES_DIR").unwrap_or_else(|_| "trades".to_string())
        );

        let log_level_str = env::var("TAB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_level = match log_level_str.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let log_dir = env::var("TAB_LOG_DIRECTORY").unwrap_or_else(|_| "logs".to_string());

        let log_prefix = env
            ::var("TAB_LOG_FILENAME_PREFIX")
            .unwrap_or_else(|_| "tri_arb_backtest".to_string());

        let log_rotation_str = env::var("TAB_LOG_ROTATION").unwrap_or_else(|_| "daily".to_string());
        let log_rotation = match log_rotation_str.to_lowercase().as_str() {
            "hourly" => LogRotation::Hourly,
            "never" => LogRotation::Never,
            _ => LogRotation::Daily,
        };

        let max_files = env
            ::var("TAB_LOG_MAX_FILES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok());

        let log_config = LogConfig {
            directory: PathBuf::from(log_dir),
            filename_prefix: log_prefix,
            rotation: log_rotation,
            max_files,
        };

        Ok(Config {
            debug,
            base_currency,
            fee,
            trade_amount,
            threshold,
            max_positions,
            cooldown_secs,
            starting_cash,
            pairs,
            ticks_file,
            paths_file,
            save_paths,
            paths_dir,
            trades_dir,
            log_level,
            log_config,
        })
    }
}
