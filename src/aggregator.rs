use rayon::prelude::*;

use crate::bar::Bar;
use crate::catalog::{FileCatalog, FileDescriptor};
use crate::config::ReaderConfig;
use crate::csv_processor;
use crate::error::{Error, Result};
use crate::series::Series;
use crate::summary::{self, SummaryRecord};

/// A candidate file left out of a merge because it failed to parse.
#[derive(Debug)]
pub struct SkippedFile {
    pub file: FileDescriptor,
    pub error: Error,
}

/// Result of [`SeriesAggregator::read_merged`].
#[derive(Debug)]
pub struct MergedSeries {
    pub series: Series,
    /// Files that parsed and contributed rows, in listing order.
    pub files_read: Vec<FileDescriptor>,
    /// Files excluded from the merge, in listing order.
    pub skipped: Vec<SkippedFile>,
    /// Rows dropped because a later row had the same timestamp.
    pub duplicates_replaced: usize,
}

impl MergedSeries {
    pub fn has_warnings(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Turns snapshot files into merged, validated series.
#[derive(Debug, Clone)]
pub struct SeriesAggregator {
    catalog: FileCatalog,
    config: ReaderConfig,
}

impl SeriesAggregator {
    pub fn new(config: ReaderConfig) -> Self {
        Self {
            catalog: FileCatalog::new(&config.root),
            config,
        }
    }

    pub fn catalog(&self) -> &FileCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Parses one file into bars in file order; see [`csv_processor::parse_file`].
    pub fn parse_file(&self, descriptor: &FileDescriptor) -> Result<Vec<Bar>> {
        csv_processor::parse_file(descriptor, self.config.validation)
    }

    /// Reads the most recent file of `symbol` into a series.
    ///
    /// Rows sharing a timestamp inside the file collapse to the last one.
    ///
    /// # Errors
    /// * [`Error::NotFound`] if the symbol has no file.
    /// * [`Error::Parse`] if the latest file is invalid; this path is fatal.
    pub fn read_latest(&self, symbol: &str) -> Result<Series> {
        let latest = self.catalog.latest(symbol)?;
        tracing::debug!(symbol, path = %latest.path.display(), "reading latest OHLCV file");
        let bars = self.parse_file(&latest)?;
        Ok(Series::from_bars(bars))
    }

    /// Reads and merges the files of `symbol`.
    ///
    /// See [`SeriesAggregator::read_merged_with`].
    pub fn read_merged(&self, symbol: &str, limit: Option<usize>) -> Result<MergedSeries> {
        self.read_merged_with(symbol, limit, &|_| {})
    }

    /// Reads and merges the files of `symbol`, calling `on_file` once each
    /// file has been parsed (successfully or not).
    ///
    /// `limit` keeps only the last `limit` files of the listing; `Some(0)`
    /// means no limit. Files that fail to parse are skipped with a warning.
    /// When a timestamp appears in several files the row from the file listed
    /// last wins, independent of the order in which parallel reads finish.
    ///
    /// # Errors
    /// * [`Error::NotFound`] if the symbol has no file.
    /// * [`Error::NoValidData`] if every candidate file failed to parse.
    pub fn read_merged_with(
        &self,
        symbol: &str,
        limit: Option<usize>,
        on_file: &(dyn Fn(&FileDescriptor) + Sync),
    ) -> Result<MergedSeries> {
        let mut files = self.catalog.list_files(Some(symbol))?;
        if let Some(limit) = limit.filter(|&n| n > 0) {
            let keep_from = files.len().saturating_sub(limit);
            files.drain(..keep_from);
        }
        if files.is_empty() {
            return Err(Error::NotFound {
                symbol: symbol.to_string(),
                root: self.catalog.root().to_path_buf(),
            });
        }

        let parse = |file: &FileDescriptor| {
            let parsed = self.parse_file(file);
            on_file(file);
            parsed
        };
        // Indexed collect keeps listing order whatever order the reads finish in.
        let parsed: Vec<Result<Vec<Bar>>> = if self.config.parallel {
            files.par_iter().map(parse).collect()
        } else {
            files.iter().map(parse).collect()
        };

        merge(symbol, files.into_iter().zip(parsed))
    }

    /// Computes summary statistics; see [`summary::summarize`].
    pub fn summarize(&self, series: &Series) -> Result<SummaryRecord> {
        summary::summarize(series)
    }
}

/// Merges per-file parse results given in listing order.
///
/// Failed files are recorded in [`MergedSeries::skipped`] and logged; the
/// rows of the remaining files are concatenated in order, so for a repeated
/// timestamp the row from the later file wins, then sorted by timestamp.
///
/// # Errors
/// * [`Error::NoValidData`] if no file parsed, including an empty input.
pub fn merge<I>(symbol: &str, parsed: I) -> Result<MergedSeries>
where
    I: IntoIterator<Item = (FileDescriptor, Result<Vec<Bar>>)>,
{
    let mut attempted = 0usize;
    let mut files_read = Vec::new();
    let mut skipped = Vec::new();
    let mut rows = Vec::new();

    for (file, result) in parsed {
        attempted += 1;
        match result {
            Ok(bars) => {
                rows.extend(bars);
                files_read.push(file);
            }
            Err(error) => {
                tracing::warn!(symbol, path = %file.path.display(), %error, "skipping OHLCV file that failed to parse");
                skipped.push(SkippedFile { file, error });
            }
        }
    }

    if files_read.is_empty() {
        return Err(Error::NoValidData {
            symbol: symbol.to_string(),
            attempted,
        });
    }

    let (series, duplicates_replaced) = Series::from_bars_counting(rows);
    if duplicates_replaced > 0 {
        tracing::warn!(symbol, duplicates_replaced, "replaced bars with duplicate timestamps");
    }
    tracing::info!(
        symbol,
        files = files_read.len(),
        skipped = skipped.len(),
        bars = series.len(),
        "merged OHLCV files"
    );

    Ok(MergedSeries {
        series,
        files_read,
        skipped,
        duplicates_replaced,
    })
}
