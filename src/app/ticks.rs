use std::fs::File;
use std::io::{ BufRead, BufReader };
use std::path::Path;

use anyhow::{ Context, Result };
use tracing::warn;

use crate::models::tick::Tick;

/// Read a replay file: one JSON tick per line,
/// `{"timestamp": "...", "prices": {"BTC_USDT": 50000.0, ...}}`.
///
/// The producer owns the ordering contract (strictly ascending
/// timestamps); out-of-order ticks are dropped here rather than replayed
/// backwards. Blank lines and `#` comments are ignored.
pub fn read_ticks(path: &Path) -> Result<Vec<Tick>> {
    let file = File::open(path).with_context(||
        format!("Failed to open ticks file {}", path.display())
    )?;

    let mut ticks: Vec<Tick> = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(||
            format!("Failed to read {} at line {}", path.display(), line_no + 1)
        )?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tick: Tick = serde_json
            ::from_str(trimmed)
            .with_context(|| {
                format!("Malformed tick at {}:{}", path.display(), line_no + 1)
            })?;

        if let Some(last) = ticks.last() {
            if tick.timestamp < last.timestamp {
                warn!(
                    "Dropping out-of-order tick at {}:{} ({} < {})",
                    path.display(),
                    line_no + 1,
                    tick.timestamp,
                    last.timestamp
                );
                continue;
            }
        }
        ticks.push(tick);
    }

    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_lines_and_skips_comments() {
        let dir = std::env::temp_dir().join("tab_ticks_parse");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ticks.jsonl");

        let mut f = File::create(&path).unwrap();
        writeln!(f, "# replay fixture").unwrap();
        writeln!(
            f,
            r#"{{"timestamp":"2024-01-01T00:00:00Z","prices":{{"BTC_USDT":50000.0}}}}"#
        ).unwrap();
        writeln!(f).unwrap();
        writeln!(
            f,
            r#"{{"timestamp":"2024-01-01T00:00:01Z","prices":{{"BTC_USDT":50010.0,"ETH_BTC":0.05}}}}"#
        ).unwrap();

        let ticks = read_ticks(&path).unwrap();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].price("BTC_USDT"), Some(50000.0));
        assert_eq!(ticks[1].price("ETH_BTC"), Some(0.05));
        assert!(ticks[0].timestamp < ticks[1].timestamp);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn out_of_order_ticks_are_dropped() {
        let dir = std::env::temp_dir().join("tab_ticks_order");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ticks.jsonl");

        let mut f = File::create(&path).unwrap();
        writeln!(f, r#"{{"timestamp":"2024-01-01T00:00:05Z","prices":{{}}}}"#).unwrap();
        writeln!(f, r#"{{"timestamp":"2024-01-01T00:00:01Z","prices":{{}}}}"#).unwrap();
        writeln!(f, r#"{{"timestamp":"2024-01-01T00:00:06Z","prices":{{}}}}"#).unwrap();

        let ticks = read_ticks(&path).unwrap();
        assert_eq!(ticks.len(), 2);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
