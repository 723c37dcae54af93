use crate::error::{Error, Result};
use crate::series::Series;
use crate::utils;

/// First and last bar timestamps of a series.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DateRange {
    pub start: chrono::NaiveDateTime,
    pub end: chrono::NaiveDateTime,
    #[serde(rename = "duration_seconds", serialize_with = "serialize_seconds")]
    pub duration: chrono::TimeDelta,
}

/// Price statistics.
///
/// `min`/`max` come from the `low`/`high` columns; `mean`/`std` from `close`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two bars.
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VolumeStats {
    pub total: f64,
    pub mean: f64,
    pub max: f64,
}

/// Read-only aggregate over a non-empty [`Series`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummaryRecord {
    pub total_bars: usize,
    pub date_range: DateRange,
    pub price: PriceStats,
    pub volume: VolumeStats,
    /// Interval of the first bar.
    pub interval_seconds: u64,
}

fn serialize_seconds<S: serde::Serializer>(
    duration: &chrono::TimeDelta,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.num_milliseconds() as f64 / 1000.0)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Computes the summary statistics of a series.
///
/// # Errors
/// * [`Error::EmptySeries`] if the series has no bars.
pub fn summarize(series: &Series) -> Result<SummaryRecord> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Error::EmptySeries),
    };

    let closes = series.closes();
    let volumes = series.volumes();
    let close_mean = mean(&closes);

    let price = PriceStats {
        min: series.iter().map(|b| b.low).fold(f64::INFINITY, f64::min),
        max: series.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max),
        mean: close_mean,
        std: sample_std(&closes, close_mean),
    };
    let volume = VolumeStats {
        total: volumes.iter().sum(),
        mean: mean(&volumes),
        max: volumes.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };

    Ok(SummaryRecord {
        total_bars: series.len(),
        date_range: DateRange {
            start: first.timestamp,
            end: last.timestamp,
            duration: last.timestamp - first.timestamp,
        },
        price,
        volume,
        interval_seconds: first.interval_seconds,
    })
}

impl std::fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total bars: {}", self.total_bars)?;
        writeln!(
            f,
            "Date range: {} to {}",
            self.date_range.start, self.date_range.end
        )?;
        writeln!(f, "Duration: {}", utils::format_duration(self.date_range.duration))?;
        writeln!(f)?;
        writeln!(f, "Price Statistics:")?;
        writeln!(f, "  Min:  ${:.2}", self.price.min)?;
        writeln!(f, "  Max:  ${:.2}", self.price.max)?;
        writeln!(f, "  Mean: ${:.2}", self.price.mean)?;
        match self.price.std {
            Some(std) => writeln!(f, "  Std:  ${std:.2}")?,
            None => writeln!(f, "  Std:  n/a")?,
        }
        writeln!(f)?;
        writeln!(f, "Volume Statistics:")?;
        writeln!(f, "  Total: {:.0}", self.volume.total)?;
        writeln!(f, "  Mean:  {:.2}", self.volume.mean)?;
        writeln!(f, "  Max:   {:.0}", self.volume.max)?;
        writeln!(f)?;
        write!(f, "Interval: {}s bars", self.interval_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::Bar;

    fn ts(minute: u32) -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 2, 17)
            .unwrap()
            .and_hms_opt(14, minute, 0)
            .unwrap()
    }

    fn three_bars() -> Series {
        let lows = [10.0, 9.0, 11.0];
        let highs = [12.0, 13.0, 12.0];
        let closes = [11.0, 10.0, 11.5];
        let volumes = [100.0, 200.0, 50.0];
        Series::from_bars((0..3).map(|i| {
            Bar::new(
                ts(i as u32),
                60,
                closes[i],
                highs[i],
                lows[i],
                closes[i],
                volumes[i],
            )
        }))
    }

    #[test]
    fn three_bar_summary() {
        let summary = summarize(&three_bars()).unwrap();

        assert_eq!(summary.total_bars, 3);
        assert_eq!(summary.price.min, 9.0);
        assert_eq!(summary.price.max, 13.0);
        assert_eq!(summary.volume.total, 350.0);
        assert_eq!(summary.volume.max, 200.0);
        assert!((summary.volume.mean - 350.0 / 3.0).abs() < 1e-12);
        assert!((summary.price.mean - 32.5 / 3.0).abs() < 1e-12);
        // closes 11, 10, 11.5 around mean 10.8333..: sample variance 0.58333..
        let std = summary.price.std.unwrap();
        assert!((std - (0.583_333_333_333_333_3f64).sqrt()).abs() < 1e-9);
        assert_eq!(summary.interval_seconds, 60);
        assert_eq!(summary.date_range.start, ts(0));
        assert_eq!(summary.date_range.end, ts(2));
        assert_eq!(summary.date_range.duration, chrono::TimeDelta::minutes(2));
    }

    #[test]
    fn empty_series_fails() {
        let err = summarize(&Series::empty()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::EmptySeries);
    }

    #[test]
    fn single_bar_has_no_std() {
        let series = Series::from_bars([Bar::new(ts(0), 1, 5.0, 6.0, 4.0, 5.5, 10.0)]);
        let summary = summarize(&series).unwrap();
        assert_eq!(summary.price.std, None);
        assert_eq!(summary.date_range.duration, chrono::TimeDelta::zero());
    }

    #[test]
    fn huge_interval_is_reported_unchanged() {
        let series = Series::from_bars([
            Bar::new(ts(0), 100_000_000_000_000_000, 5.0, 6.0, 4.0, 5.5, 10.0),
            Bar::new(ts(1), u64::MAX, 5.5, 6.0, 5.0, 5.0, 1.0),
        ]);
        let summary = summarize(&series).unwrap();
        assert_eq!(summary.interval_seconds, 100_000_000_000_000_000);
        assert_eq!(summary.date_range.duration, chrono::TimeDelta::minutes(1));
        assert!(summary.to_string().ends_with("Interval: 100000000000000000s bars"));
    }

    #[test]
    fn display_and_json() {
        let summary = summarize(&three_bars()).unwrap();

        let text = summary.to_string();
        assert!(text.contains("Total bars: 3"));
        assert!(text.contains("Min:  $9.00"));
        assert!(text.contains("Total: 350"));
        assert!(text.ends_with("Interval: 60s bars"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_bars"], 3);
        assert_eq!(json["date_range"]["duration_seconds"], 120.0);
        assert_eq!(json["date_range"]["start"], "2025-02-17T14:00:00");
        assert_eq!(json["price"]["max"], 13.0);
    }
}
