mod common;

use common::{fixture_dir, ts};
use marketsim_ohlcv::{summarize, ErrorKind, ReaderConfig, Series, SeriesAggregator};

#[test]
fn summary_of_merged_fixtures() {
    let aggregator = SeriesAggregator::new(ReaderConfig::new(fixture_dir()));
    let series = aggregator.read_merged("AAPL", None).unwrap().series;
    let summary = aggregator.summarize(&series).unwrap();

    assert_eq!(summary.total_bars, 5);
    assert_eq!(summary.date_range.start, ts("2025-02-17 14:23:00"));
    assert_eq!(summary.date_range.end, ts("2025-02-17 14:23:04"));
    assert_eq!(summary.date_range.duration, chrono::TimeDelta::seconds(4));
    assert_eq!(summary.price.min, 100.45);
    assert_eq!(summary.price.max, 101.2);
    // 87 + 12 + 55 + 63 + 20
    assert_eq!(summary.volume.total, 237.0);
    assert_eq!(summary.volume.max, 87.0);
    assert_eq!(summary.interval_seconds, 1);
    assert!(summary.price.std.unwrap() > 0.0);
}

#[test]
fn empty_series_cannot_be_summarized() {
    let err = summarize(&Series::empty()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptySeries);
}

#[test]
fn header_only_export_merges_to_empty_series() {
    let dir = common::DataDir::new();
    dir.write_bars("AAPL_ohlcv_1.csv", &[]);

    let series = SeriesAggregator::new(ReaderConfig::new(dir.path()))
        .read_merged("AAPL", None)
        .unwrap()
        .series;

    assert!(series.is_empty());
    assert_eq!(summarize(&series).unwrap_err().kind(), ErrorKind::EmptySeries);
}
