/// Directory the simulator's recorder writes to by default.
pub const DEFAULT_DATA_DIR: &str = "market_history";

/// How parsed rows are checked before they become bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Rows are accepted as long as every value parses.
    #[default]
    PassThrough,
    /// Rows must be finite, have non-negative volume and satisfy
    /// `low <= min(open, close) <= max(open, close) <= high`.
    Strict,
}

/// Settings shared by the catalog and the aggregator.
///
/// The data directory is always explicit; nothing is read from the
/// process working directory implicitly.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub root: std::path::PathBuf,
    pub validation: ValidationMode,
    /// Parse files of a merge on the rayon pool.
    pub parallel: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            root: std::path::PathBuf::from(DEFAULT_DATA_DIR),
            validation: ValidationMode::default(),
            parallel: true,
        }
    }
}

impl ReaderConfig {
    pub fn new<P: AsRef<std::path::Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
