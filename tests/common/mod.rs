#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const HEADER: &str = "timestamp,timestamp_ms,interval_seconds,open,high,low,close,volume";

/// Directory of the checked-in recorder exports.
pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/market_history")
}

/// Scratch data directory that lives as long as the value.
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file with the given raw content.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    /// Writes a recorder export with one row per `(timestamp, close)`.
    pub fn write_bars(&self, name: &str, rows: &[(&str, f64)]) -> PathBuf {
        let mut content = format!("{HEADER}\n");
        for (ts, close) in rows {
            content.push_str(&format!(
                "{ts},0,1,{close},{high},{low},{close},10\n",
                high = close + 0.5,
                low = close - 0.5,
            ));
        }
        self.write(name, &content)
    }
}

pub fn ts(s: &str) -> chrono::NaiveDateTime {
    marketsim_ohlcv::csv_processor::parse_timestamp(s).expect("valid timestamp")
}
