//! Store path 파싱
//!
//! `a:b:c` 형식. 마지막 segment가 target, 나머지가 traversal prefix,
//! 첫 segment가 권한 검사 키.

use std::fmt;
use std::iter;

/// Segment separator
pub const SEPARATOR: char = ':';

/// A parsed colon-delimited path
///
/// Every string is a valid path: splitting always yields at least one
/// segment, and empty segments name the empty property `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePath<'a> {
    raw: &'a str,
    prefix: Vec<&'a str>,
    target: &'a str,
}

impl<'a> StorePath<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let (prefix, target) = match raw.rsplit_once(SEPARATOR) {
            Some((prefix, target)) => (prefix.split(SEPARATOR).collect(), target),
            None => (Vec::new(), raw),
        };
        Self {
            raw,
            prefix,
            target,
        }
    }

    /// 권한 검사 키 (첫 segment, 단일 segment면 그 자신)
    pub fn auth_key(&self) -> &'a str {
        self.prefix.first().copied().unwrap_or(self.target)
    }

    /// Segments before the target
    pub fn prefix(&self) -> &[&'a str] {
        &self.prefix
    }

    pub fn target(&self) -> &'a str {
        self.target
    }

    /// All segments in order, target last
    pub fn segments(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.prefix.iter().copied().chain(iter::once(self.target))
    }

    pub fn depth(&self) -> usize {
        self.prefix.len() + 1
    }

    pub fn is_nested(&self) -> bool {
        !self.prefix.is_empty()
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }
}

impl fmt::Display for StorePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_segment() {
        let path = StorePath::parse("name");
        assert_eq!(path.target(), "name");
        assert!(path.prefix().is_empty());
        assert_eq!(path.auth_key(), "name");
        assert!(!path.is_nested());
        assert_eq!(path.depth(), 1);
    }

    #[test]
    fn test_nested() {
        let path = StorePath::parse("a:b:c");
        assert_eq!(path.prefix(), &["a", "b"]);
        assert_eq!(path.target(), "c");
        assert_eq!(path.auth_key(), "a");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(path.to_string(), "a:b:c");
    }

    #[test]
    fn test_empty_segments() {
        let path = StorePath::parse("");
        assert_eq!(path.target(), "");
        assert_eq!(path.auth_key(), "");

        let path = StorePath::parse("a::");
        assert_eq!(path.prefix(), &["a", ""]);
        assert_eq!(path.target(), "");
        assert_eq!(path.depth(), 3);
    }
}
