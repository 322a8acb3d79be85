use std::fs;
use std::io::Write;
use std::path::{ Path, PathBuf };
use std::time::Duration;

use anyhow::{ Context, Result };
use chrono::Local;
use serde::Deserialize;
use tracing::{ error, info };

use crate::models::direction::Direction;
use crate::models::path::{ ArbPath, Leg };

/// On-disk leg shape: `["PAIR_SYMBOL", ±1]`.
type RawPath = Vec<(String, i8)>;

/// Persist a discovered path set.
///
/// The file is human-readable first (header, one annotated line per path,
/// the distinct pairs the set touches) and ends with a machine-parsable
/// JSON token that [`load_paths`] picks back up.
pub fn save_paths(
    dir: &Path,
    paths: &[ArbPath],
    base: &str,
    calculation_time: Option<Duration>
) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(||
        format!("Failed to create path directory {}", dir.display())
    )?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let file_path = dir.join(format!("arb_paths_{}_{}.txt", base, timestamp));
    let mut file = fs::File
        ::create(&file_path)
        .with_context(|| format!("Failed to create path file {}", file_path.display()))?;

    writeln!(file, "# Triangular arbitrage paths - base currency: {}", base)?;
    writeln!(file, "# Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file, "# Path count: {}", paths.len())?;
    if let Some(elapsed) = calculation_time {
        writeln!(file, "# Calculation time: {:.2}ms", elapsed.as_secs_f64() * 1000.0)?;
    }
    writeln!(file)?;

    for (i, path) in paths.iter().enumerate() {
        writeln!(file, "Path {}: {}", i + 1, path.describe())?;
    }

    writeln!(file, "\n# Required pairs")?;
    let quoted: Vec<String> = required_pairs(paths)
        .iter()
        .map(|p| format!("{:?}", p))
        .collect();
    writeln!(file, "{}", quoted.join(", "))?;

    writeln!(file, "\n# JSON path data (machine readable)")?;
    let raw: Vec<RawPath> = paths
        .iter()
        .map(|path| {
            path.legs
                .iter()
                .map(|leg| (leg.symbol.to_string(), leg.direction.sign()))
                .collect()
        })
        .collect();
    writeln!(file, "{}", serde_json::to_string(&raw)?)?;

    info!("Saved {} paths to {}", paths.len(), file_path.display());
    Ok(file_path)
}

/// Load a persisted path set.
///
/// Locates the nested-list JSON token inside the file and rebuilds the
/// paths from it. Any failure (missing token, parse error, wrong leg count,
/// unknown direction sign) degrades to an empty set so the caller can fall
/// back to on-the-fly discovery.
pub fn load_paths(file_path: &Path) -> Vec<ArbPath> {
    let content = match fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read path file {}: {}", file_path.display(), e);
            return Vec::new();
        }
    };

    let Some(json_start) = content.find("[[[") else {
        error!("No path data token found in {}", file_path.display());
        return Vec::new();
    };

    // Parse one JSON value and ignore anything trailing it.
    let mut deserializer = serde_json::Deserializer::from_str(&content[json_start..]);
    let raw: Vec<RawPath> = match Vec::deserialize(&mut deserializer) {
        Ok(raw) => raw,
        Err(e) => {
            error!("Failed to parse path data in {}: {}", file_path.display(), e);
            return Vec::new();
        }
    };

    let mut paths = Vec::with_capacity(raw.len());
    for raw_path in raw {
        let Some(path) = rebuild_path(&raw_path) else {
            error!("Malformed path entry in {}; discarding the whole set", file_path.display());
            return Vec::new();
        };
        paths.push(path);
    }

    info!("Loaded {} paths from {}", paths.len(), file_path.display());
    paths
}

fn rebuild_path(raw: &RawPath) -> Option<ArbPath> {
    let [first, second, third] = raw.as_slice() else {
        return None;
    };
    let leg = |(symbol, sign): &(String, i8)| -> Option<Leg> {
        Some(Leg::new(symbol.as_str(), Direction::from_sign(*sign)?))
    };
    Some(ArbPath::new([leg(first)?, leg(second)?, leg(third)?]))
}

/// Distinct pair symbols a path set touches, in first-seen order.
pub fn required_pairs(paths: &[ArbPath]) -> Vec<String> {
    let mut seen = ahash::AHashSet::new();
    let mut pairs = Vec::new();
    for path in paths {
        for leg in &path.legs {
            if seen.insert(leg.symbol.clone()) {
                pairs.push(leg.symbol.to_string());
            }
        }
    }
    pairs
}
