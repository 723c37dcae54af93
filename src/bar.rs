/// One closed OHLCV interval as exported by the simulator.
///
/// `timestamp` is the local wall-clock start of the interval; it is the key
/// of the bar inside a [`Series`](crate::series::Series).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Bar {
    pub timestamp: chrono::NaiveDateTime,
    pub interval_seconds: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(
        timestamp: chrono::NaiveDateTime,
        interval_seconds: u64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            interval_seconds,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_fields_verbatim() {
        let ts = chrono::NaiveDate::from_ymd_opt(2025, 2, 17)
            .unwrap()
            .and_hms_opt(14, 23, 0)
            .unwrap();
        let bar = Bar::new(ts, u64::MAX, 1.0, 2.0, 0.5, 1.5, 10.0);

        assert_eq!(bar.timestamp, ts);
        assert_eq!(bar.interval_seconds, u64::MAX);
        assert_eq!((bar.open, bar.high, bar.low, bar.close), (1.0, 2.0, 0.5, 1.5));
        assert_eq!(bar.volume, 10.0);
    }
}
