//! Optional regex filter applied to each assembled batch.

use regex_lite::Regex;

use super::line::LogLine;
use super::ScanError;

/// Line predicate. With no pattern, every line passes.
///
/// The regex is compiled once when the filter is built and shared by every
/// clone, so continuation requests reuse it.
#[derive(Debug, Clone, Default)]
pub struct LineFilter {
    pattern: Option<Regex>,
}

impl LineFilter {
    /// A filter that keeps every line.
    pub fn none() -> Self {
        Self::default()
    }

    /// Compile `pattern`. `None` and the empty string both keep every line.
    pub fn new(pattern: Option<&str>) -> Result<Self, ScanError> {
        let pattern = match pattern {
            None | Some("") => None,
            Some(p) => Some(Regex::new(p).map_err(|source| ScanError::BadRegex {
                pattern: p.to_string(),
                source,
            })?),
        };
        Ok(Self { pattern })
    }

    /// The source pattern, if any.
    pub fn as_str(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// Unanchored search of `text`.
    pub fn matches(&self, text: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(text),
            None => true,
        }
    }

    /// Keep the matching lines of `lines`, preserving order.
    pub fn retain(&self, lines: impl IntoIterator<Item = LogLine>) -> Vec<LogLine> {
        lines.into_iter().filter(|line| self.matches(&line.text)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<LogLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| LogLine {
                offset: i as u64,
                text: t.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_none_is_identity() {
        let filter = LineFilter::none();
        assert_eq!(filter.as_str(), None);
        assert_eq!(filter.retain(lines(&["a", "b"])).len(), 2);
    }

    #[test]
    fn test_empty_pattern_is_identity() {
        let filter = LineFilter::new(Some("")).unwrap();
        assert_eq!(filter.as_str(), None);
        assert!(filter.matches("anything"));
    }

    #[test]
    fn test_retain_preserves_order() {
        let filter = LineFilter::new(Some("ERROR")).unwrap();
        let kept = filter.retain(lines(&["ERROR one", "INFO two", "x ERROR three"]));
        let texts: Vec<_> = kept.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["ERROR one", "x ERROR three"]);
        assert_eq!(kept[1].offset, 2);
    }

    #[test]
    fn test_regex_syntax() {
        let filter = LineFilter::new(Some(r"^Log line 9\d{2}$")).unwrap();
        assert!(filter.matches("Log line 950"));
        assert!(!filter.matches("Log line 9950"));
        assert_eq!(filter.as_str(), Some(r"^Log line 9\d{2}$"));
    }

    #[test]
    fn test_bad_regex() {
        let err = LineFilter::new(Some("(unclosed")).unwrap_err();
        assert!(matches!(err, ScanError::BadRegex { ref pattern, .. } if pattern == "(unclosed"));
    }
}
