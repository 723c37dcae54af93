//! Ingestion and aggregation of MarketSim OHLCV exports.
//!
//! The recorder periodically writes `{symbol}_ohlcv*.csv` snapshot files.
//! [`FileCatalog`] discovers them, [`SeriesAggregator`] parses and merges
//! them into one time-ordered [`Series`] per symbol, and [`summarize`]
//! derives the [`SummaryRecord`] consumed by reporting tools.

pub mod aggregator;
pub mod bar;
pub mod catalog;
pub mod config;
pub mod csv_processor;
pub mod error;
pub mod series;
pub mod summary;
pub mod utils;
pub mod validation;

pub use aggregator::{MergedSeries, SeriesAggregator, SkippedFile};
pub use bar::Bar;
pub use catalog::{FileCatalog, FileDescriptor};
pub use config::{ReaderConfig, ValidationMode};
pub use error::{Error, ErrorKind, ParseError, Result};
pub use series::Series;
pub use summary::{summarize, SummaryRecord};
