mod common;

use common::{fixture_dir, DataDir};
use marketsim_ohlcv::{ErrorKind, FileCatalog};

#[test]
fn lists_symbol_files_sorted() {
    let catalog = FileCatalog::new(fixture_dir());
    let files = catalog.list_files(Some("AAPL")).unwrap();

    let names: Vec<_> = files.iter().map(|f| f.file_name().into_owned()).collect();
    assert_eq!(
        names,
        vec!["AAPL_ohlcv_20250217_142300.csv", "AAPL_ohlcv_20250217_142302.csv"]
    );
    assert_eq!(files[0].order, 0);
    assert_eq!(files[1].order, 1);
}

#[test]
fn lists_all_symbols_without_filter() {
    let catalog = FileCatalog::new(fixture_dir());
    let names: Vec<_> = catalog
        .list_files(None)
        .unwrap()
        .iter()
        .map(|f| f.file_name().into_owned())
        .collect();

    assert_eq!(
        names,
        vec![
            "AAPL_ohlcv_20250217_142300.csv",
            "AAPL_ohlcv_20250217_142302.csv",
            "MSFT_ohlcv_20250217_142300.csv",
        ]
    );
}

#[test]
fn latest_is_last_listed() {
    let dir = DataDir::new();
    dir.write_bars("AAPL_ohlcv_b.csv", &[]);
    dir.write_bars("AAPL_ohlcv_a.csv", &[]);
    dir.write_bars("AAPL_ohlcv_c.csv", &[]);
    std::fs::create_dir(dir.path().join("AAPL_ohlcv_zz")).unwrap();

    let latest = FileCatalog::new(dir.path()).latest("AAPL").unwrap();
    assert_eq!(latest.file_name(), "AAPL_ohlcv_c.csv");
    assert_eq!(latest.order, 2);
}

#[test]
fn unknown_symbol_is_empty_then_not_found() {
    let catalog = FileCatalog::new(fixture_dir());
    assert!(catalog.list_files(Some("TSLA")).unwrap().is_empty());

    let err = catalog.latest("TSLA").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("TSLA"));
}
