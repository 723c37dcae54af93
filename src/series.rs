use crate::bar::Bar;

/// Time-ordered bar sequence for one symbol.
///
/// Invariant: bars are sorted strictly ascending by `timestamp`, so no two
/// bars share a timestamp. The only way to build a `Series` is through
/// [`Series::from_bars`] (or the merge path built on top of it), which
/// enforces the invariant.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a series from bars in arrival order.
    ///
    /// When several bars share a timestamp the one that arrives last wins,
    /// whatever its values. The result is sorted ascending by timestamp.
    pub fn from_bars<I: IntoIterator<Item = Bar>>(bars: I) -> Self {
        Self::from_bars_counting(bars).0
    }

    /// Same as [`Series::from_bars`], also returning how many bars were
    /// replaced by a later bar with the same timestamp.
    pub(crate) fn from_bars_counting<I: IntoIterator<Item = Bar>>(bars: I) -> (Self, usize) {
        let mut by_time = std::collections::BTreeMap::new();
        let mut replaced = 0usize;
        for bar in bars {
            if by_time.insert(bar.timestamp, bar).is_some() {
                replaced += 1;
            }
        }
        let series = Self {
            bars: by_time.into_values().collect(),
        };
        (series, replaced)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Looks up the bar starting exactly at `timestamp`.
    pub fn get(&self, timestamp: chrono::NaiveDateTime) -> Option<&Bar> {
        self.bars
            .binary_search_by_key(&timestamp, |b| b.timestamp)
            .ok()
            .map(|i| &self.bars[i])
    }

    /// Bars whose timestamp lies in `[start, end)`.
    pub fn range(&self, range: std::ops::Range<chrono::NaiveDateTime>) -> &[Bar] {
        let lo = self.bars.partition_point(|b| b.timestamp < range.start);
        let hi = self.bars.partition_point(|b| b.timestamp < range.end);
        &self.bars[lo..hi.max(lo)]
    }

    pub fn timestamps(&self) -> Vec<chrono::NaiveDateTime> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(minute: u32, close: f64) -> Bar {
        let ts = chrono::NaiveDate::from_ymd_opt(2025, 2, 17)
            .unwrap()
            .and_hms_opt(14, minute, 0)
            .unwrap();
        Bar::new(ts, 60, close, close, close, close, 1.0)
    }

    #[test]
    fn sorts_and_keeps_last_duplicate() {
        let (series, replaced) =
            Series::from_bars_counting(vec![bar(3, 1.0), bar(1, 2.0), bar(3, 3.0), bar(2, 4.0)]);

        assert_eq!(replaced, 1);
        assert_eq!(series.closes(), vec![2.0, 4.0, 3.0]);
        assert!(series
            .bars()
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn lookup_and_range() {
        let series = Series::from_bars(vec![bar(1, 1.0), bar(2, 2.0), bar(4, 4.0)]);

        assert_eq!(series.get(bar(2, 0.0).timestamp).map(|b| b.close), Some(2.0));
        assert!(series.get(bar(3, 0.0).timestamp).is_none());

        let window = series.range(bar(2, 0.0).timestamp..bar(5, 0.0).timestamp);
        assert_eq!(window.len(), 2);
        assert!(series.range(bar(4, 0.0).timestamp..bar(1, 0.0).timestamp).is_empty());
    }

    #[test]
    fn empty_series() {
        let series = Series::empty();
        assert!(series.is_empty());
        assert!(series.first().is_none());
        assert_eq!(series, Series::from_bars(Vec::new()));
    }
}
