//! Section map of a requirement document body
//!
//! A line starting with `##` followed by whitespace opens a section named by
//! the rest of the line. Text before the first header, and headers with an
//! empty name, belong to the overview section, which always exists.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Name of the implicit leading section
pub const OVERVIEW_SECTION: &str = "概览";

static SECTION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+").expect("section header pattern is valid"));

/// Ordered map of section title to trimmed body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMap {
    sections: IndexMap<String, String>,
}

impl SectionMap {
    /// Split `content` into sections
    ///
    /// Repeated titles accumulate into one section, in order of appearance.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut buckets: IndexMap<String, Vec<&str>> = IndexMap::new();
        buckets.insert(OVERVIEW_SECTION.to_string(), Vec::new());
        let mut current = OVERVIEW_SECTION.to_string();

        for line in content.split('\n') {
            if let Some(header) = SECTION_HEADER.find(line) {
                let title = line[header.end()..].trim();
                current = if title.is_empty() {
                    OVERVIEW_SECTION.to_string()
                } else {
                    title.to_string()
                };
                buckets.entry(current.clone()).or_default();
                continue;
            }
            buckets.entry(current.clone()).or_default().push(line);
        }

        let sections = buckets
            .into_iter()
            .map(|(title, lines)| (title, lines.join("\n").trim().to_string()))
            .collect();
        Self { sections }
    }

    /// Body of a section
    #[inline]
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&str> {
        self.sections.get(title).map(String::as_str)
    }

    /// True if a section with this title exists
    #[inline]
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.sections.contains_key(title)
    }

    /// Section titles in document order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Sections in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of sections, overview included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Never true: the overview section always exists
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn leading_text_goes_to_overview() {
        let map = SectionMap::parse("intro line\n\n## Goals\nship it\n");
        assert_eq!(map.titles().collect::<Vec<_>>(), vec![OVERVIEW_SECTION, "Goals"]);
        assert_eq!(map.get(OVERVIEW_SECTION), Some("intro line"));
        assert_eq!(map.get("Goals"), Some("ship it"));
    }

    #[test]
    fn overview_exists_for_empty_content() {
        let map = SectionMap::parse("");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(OVERVIEW_SECTION), Some(""));
    }

    #[test]
    fn header_requires_whitespace_after_hashes() {
        let map = SectionMap::parse("##Goals\n### Detail\n##\tScope\nin");
        assert_eq!(map.titles().collect::<Vec<_>>(), vec![OVERVIEW_SECTION, "Scope"]);
        assert_eq!(map.get(OVERVIEW_SECTION), Some("##Goals\n### Detail"));
        assert_eq!(map.get("Scope"), Some("in"));
    }

    #[test]
    fn blank_header_falls_back_to_overview() {
        let map = SectionMap::parse("a\n## A\nfoo\n##   \nb");
        assert_eq!(map.get(OVERVIEW_SECTION), Some("a\nb"));
        assert_eq!(map.get("A"), Some("foo"));
    }

    #[test]
    fn repeated_titles_accumulate() {
        let map = SectionMap::parse("## A\none\n## B\nx\n## A\ntwo");
        assert_eq!(map.get("A"), Some("one\ntwo"));
        assert_eq!(map.len(), 3);
    }
}
