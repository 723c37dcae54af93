use crate::error::{Error, Result};

/// Marker every OHLCV export carries in its file name (`{symbol}_ohlcv*`).
const OHLCV_MARKER: &str = "_ohlcv";

/// One candidate snapshot file, in the position it was discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub path: std::path::PathBuf,
    /// Zero-based position in the sorted listing.
    pub order: usize,
}

impl FileDescriptor {
    pub fn file_name(&self) -> std::borrow::Cow<'_, str> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    }
}

/// Discovers OHLCV snapshot files under a data directory.
///
/// Files are ordered lexicographically by path. The recorder names its files
/// so that this order follows creation time; the catalog relies on that and
/// cannot check it.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    root: std::path::PathBuf,
}

impl FileCatalog {
    pub fn new<P: AsRef<std::path::Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Lists files named `{symbol}_ohlcv*`, or `*_ohlcv*` when no symbol is
    /// given, sorted ascending by path.
    ///
    /// An empty result is not an error, and neither is a data directory that
    /// does not exist yet (the recorder creates it on first export).
    ///
    /// # Errors
    /// * [`Error::Io`] if the data directory exists but cannot be read.
    pub fn list_files(&self, symbol: Option<&str>) -> Result<Vec<FileDescriptor>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(root = %self.root.display(), "data directory does not exist");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(Error::Io {
                    root: self.root.clone(),
                    source,
                });
            }
        };

        let mut paths = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map_or(false, |t| !t.is_dir()))
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map_or(false, |name| matches_pattern(name, symbol))
            })
            .map(|entry| entry.path())
            .collect::<Vec<_>>();
        paths.sort();

        tracing::debug!(
            root = %self.root.display(),
            symbol = symbol.unwrap_or("*"),
            count = paths.len(),
            "listed OHLCV files"
        );

        Ok(paths
            .into_iter()
            .enumerate()
            .map(|(order, path)| FileDescriptor { path, order })
            .collect())
    }

    /// The last file of [`FileCatalog::list_files`] for `symbol`.
    ///
    /// # Errors
    /// * [`Error::NotFound`] if no file matches.
    /// * [`Error::Io`] if the data directory cannot be read.
    pub fn latest(&self, symbol: &str) -> Result<FileDescriptor> {
        self.list_files(Some(symbol))?
            .pop()
            .ok_or_else(|| Error::NotFound {
                symbol: symbol.to_string(),
                root: self.root.clone(),
            })
    }
}

/// Glob-equivalent match of `{symbol}_ohlcv*` / `*_ohlcv*` on a file name.
///
/// The symbol is taken literally. Like a shell glob, a leading `*` never
/// matches dot-files.
fn matches_pattern(name: &str, symbol: Option<&str>) -> bool {
    match symbol {
        Some(symbol) => name
            .strip_prefix(symbol)
            .map_or(false, |rest| rest.starts_with(OHLCV_MARKER)),
        None => !name.starts_with('.') && name.contains(OHLCV_MARKER),
    }
}
