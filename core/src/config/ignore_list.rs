//! User-maintained ignore list of path substrings

use std::path::Path;

use super::{Loaded, content_lines, log_diagnostics, read_config_file};

/// Ordered list of path substrings; a matching entity never gets an icon
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    patterns: Vec<String>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pattern. Empty patterns are dropped since they would match
    /// every entity.
    pub fn push(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if !pattern.is_empty() {
            self.patterns.push(pattern);
        }
    }

    /// First pattern contained in `path`
    pub fn first_match(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .map(String::as_str)
            .find(|pattern| path.contains(pattern))
    }

    #[inline]
    pub fn matches(&self, path: &str) -> bool {
        self.first_match(path).is_some()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for pattern in iter {
            list.push(pattern);
        }
        list
    }
}

/// Load the ignore file. A missing file means nothing is ignored by path.
pub fn load_ignore_patterns(path: &Path) -> Loaded<IgnoreList> {
    let loaded = match read_config_file(path) {
        Ok(text) => Loaded {
            value: parse_ignore_patterns(&text),
            diagnostics: Vec::new(),
        },
        Err(e) => Loaded::failed(e),
    };
    log_diagnostics(&loaded.diagnostics);
    loaded
}

/// One pattern per non-comment, non-blank line, in file order
pub fn parse_ignore_patterns(text: &str) -> IgnoreList {
    content_lines(text).map(|(_, line)| line).collect()
}
