//! Immutable per-call scan parameters.

use std::path::{Path, PathBuf};

use super::filter::LineFilter;
use super::ScanError;

/// What one scan should read.
///
/// Built through validating constructors; a request that exists is valid.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub(crate) log_path: PathBuf,
    pub(crate) max_lines: usize,
    pub(crate) start_offset_from_end: u64,
    pub(crate) page_size_cap: usize,
    pub(crate) filter: LineFilter,
}

impl ScanRequest {
    /// Request the last `max_lines` lines of `log_path`.
    ///
    /// The page size cap starts equal to `max_lines`.
    pub fn new(log_path: impl Into<PathBuf>, max_lines: usize) -> Result<Self, ScanError> {
        if max_lines == 0 {
            return Err(ScanError::InvalidLineCount { value: max_lines });
        }
        Ok(Self {
            log_path: log_path.into(),
            max_lines,
            start_offset_from_end: 0,
            page_size_cap: max_lines,
            filter: LineFilter::none(),
        })
    }

    /// Skip `offset` bytes from the end of the file before scanning.
    pub fn with_start_offset(mut self, offset: u64) -> Self {
        self.start_offset_from_end = offset;
        self
    }

    /// Cap the lines returned by one call.
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self, ScanError> {
        if page_size == 0 {
            return Err(ScanError::InvalidPageSize { value: page_size });
        }
        self.page_size_cap = page_size;
        Ok(self)
    }

    /// Use an already compiled filter.
    pub fn with_filter(mut self, filter: LineFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Compile and use `pattern` as the line filter.
    pub fn with_pattern(self, pattern: Option<&str>) -> Result<Self, ScanError> {
        Ok(self.with_filter(LineFilter::new(pattern)?))
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn start_offset_from_end(&self) -> u64 {
        self.start_offset_from_end
    }

    pub fn page_size_cap(&self) -> usize {
        self.page_size_cap
    }

    pub fn filter(&self) -> &LineFilter {
        &self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = ScanRequest::new("/logs/app.log", 50).unwrap();
        assert_eq!(req.max_lines(), 50);
        assert_eq!(req.page_size_cap(), 50);
        assert_eq!(req.start_offset_from_end(), 0);
        assert_eq!(req.filter().as_str(), None);
        assert_eq!(req.log_path(), Path::new("/logs/app.log"));
    }

    #[test]
    fn test_zero_lines_rejected() {
        let err = ScanRequest::new("app.log", 0).unwrap_err();
        assert!(matches!(err, ScanError::InvalidLineCount { value: 0 }));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = ScanRequest::new("app.log", 10).unwrap().with_page_size(0).unwrap_err();
        assert!(matches!(err, ScanError::InvalidPageSize { value: 0 }));
    }

    #[test]
    fn test_builder_chain() {
        let req = ScanRequest::new("app.log", 200)
            .unwrap()
            .with_start_offset(4096)
            .with_page_size(50)
            .unwrap()
            .with_pattern(Some("WARN"))
            .unwrap();
        assert_eq!(req.start_offset_from_end(), 4096);
        assert_eq!(req.page_size_cap(), 50);
        assert_eq!(req.filter().as_str(), Some("WARN"));
    }
}
