use crate::bar::Bar;
use crate::catalog::FileDescriptor;
use crate::config::ValidationMode;
use crate::error::{Error, ParseError, Result};
use crate::validation;

/// Columns every OHLCV export must carry. Their order in the header is free.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "timestamp",
    "interval_seconds",
    "open",
    "high",
    "low",
    "close",
    "volume",
];

/// Timestamp layouts accepted in the `timestamp` column.
///
/// The recorder writes `%Y-%m-%d %H:%M:%S.%3f`; the other layouts cover
/// hand-edited files and ISO exports.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Represents a single row of a snapshot file, borrowed from the CSV buffer.
///
/// Values stay textual here so that a bad cell can be reported with its
/// column name. Extra columns such as `timestamp_ms` are ignored.
#[derive(Debug, serde::Deserialize)]
struct CsvRecord<'a> {
    timestamp: &'a str,
    interval_seconds: &'a str,
    open: &'a str,
    high: &'a str,
    low: &'a str,
    close: &'a str,
    volume: &'a str,
}

/// Parses a `timestamp` cell into a naive local datetime.
///
/// # Arguments
/// * `value` - Cell content, e.g. `2025-02-17 14:23:00.000`.
///
/// # Returns
/// * `Some(NaiveDateTime)` for any layout in `TIMESTAMP_FORMATS`, `None` otherwise.
pub fn parse_timestamp(value: &str) -> Option<chrono::NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn invalid(line: u64, column: &'static str, value: &str, reason: impl ToString) -> ParseError {
    ParseError::InvalidValue {
        line,
        column,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_f64(line: u64, column: &'static str, value: &str) -> Result<f64, ParseError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(line, column, value, e))
}

/// Converts one CSV record into a [`Bar`].
fn record_to_bar(line: u64, record: &CsvRecord<'_>) -> Result<Bar, ParseError> {
    let timestamp = parse_timestamp(record.timestamp)
        .ok_or_else(|| invalid(line, "timestamp", record.timestamp, "unrecognized datetime"))?;
    let interval_seconds = record
        .interval_seconds
        .trim()
        .parse::<u64>()
        .map_err(|e| invalid(line, "interval_seconds", record.interval_seconds, e))?;

    Ok(Bar {
        timestamp,
        interval_seconds,
        open: parse_f64(line, "open", record.open)?,
        high: parse_f64(line, "high", record.high)?,
        low: parse_f64(line, "low", record.low)?,
        close: parse_f64(line, "close", record.close)?,
        volume: parse_f64(line, "volume", record.volume)?,
    })
}

/// Reads every bar from a CSV reader, in file order.
///
/// This function:
/// 1. Checks the header for all `REQUIRED_COLUMNS`.
/// 2. Deserializes each row and coerces its cells to typed values.
/// 3. In strict mode, rejects rows failing [`validation::check_bar`].
///
/// Rows are neither reordered nor deduplicated.
///
/// # Errors
/// * [`ParseError::MissingColumn`] for the first absent required column.
/// * [`ParseError::InvalidValue`] for the first cell that does not coerce.
/// * [`ParseError::InconsistentBar`] in strict mode.
/// * [`ParseError::Csv`] if the CSV itself is malformed.
pub fn process_csv_records<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    mode: ValidationMode,
) -> Result<Vec<Bar>, ParseError> {
    let headers = reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(ParseError::MissingColumn(*missing));
    }

    let mut bars = Vec::new();
    let mut raw = csv::StringRecord::new();
    while reader.read_record(&mut raw)? {
        let line = raw.position().map_or(0, |p| p.line());
        let record: CsvRecord = raw.deserialize(Some(&headers))?;
        let bar = record_to_bar(line, &record)?;

        if mode == ValidationMode::Strict {
            validation::check_bar(&bar)
                .map_err(|reason| ParseError::InconsistentBar { line, reason })?;
        }
        bars.push(bar);
    }

    Ok(bars)
}

/// Parses one snapshot file into bars in file order.
///
/// # Arguments
/// * `descriptor` - File discovered by the catalog.
/// * `mode` - Whether bars are checked for OHLC consistency.
///
/// # Errors
/// * [`Error::Parse`] carrying the file path and the [`ParseError`] cause,
///   including I/O failures while opening or reading the file.
pub fn parse_file(descriptor: &FileDescriptor, mode: ValidationMode) -> Result<Vec<Bar>> {
    parse_path(&descriptor.path, mode)
}

/// Same as [`parse_file`] for a bare path.
pub fn parse_path<P: AsRef<std::path::Path>>(
    path: P,
    mode: ValidationMode,
) -> Result<Vec<Bar>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| Error::parse(path, ParseError::Io(e)))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let bars = process_csv_records(&mut reader, mode).map_err(|e| Error::parse(path, e))?;
    tracing::debug!(path = %path.display(), bars = bars.len(), "parsed OHLCV file");
    Ok(bars)
}
