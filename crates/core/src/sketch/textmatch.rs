//! Regular expression matches with capture group bookkeeping.

use std::ops::Range;

use regex::Regex;

/// A single capture group of a [`TextMatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextMatchGroup {
    /// Group name; empty unless set with `(?P<name>...)`.
    pub name: String,
    /// Byte range within the matched text, `None` if the group did not
    /// participate in the match.
    pub span: Option<Range<usize>>,
    /// Captured text, empty if not captured.
    pub text: String,
}

impl TextMatchGroup {
    pub fn is_captured(&self) -> bool {
        self.span.is_some()
    }

    /// Zero-based start offset, or -1 if not captured.
    pub fn start(&self) -> isize {
        self.span.as_ref().map_or(-1, |s| s.start as isize)
    }

    /// Zero-based end offset, or -1 if not captured.
    pub fn end(&self) -> isize {
        self.span.as_ref().map_or(-1, |s| s.end as isize)
    }
}

/// The first match of a pattern within a text. Group 0 is the whole match.
#[derive(Clone, Debug)]
pub struct TextMatch {
    pattern: Regex,
    text: String,
    spans: Vec<Option<Range<usize>>>,
}

impl TextMatch {
    /// Matches `pattern` against `text`, returning `None` if there is no
    /// match.
    pub fn evaluate(pattern: &Regex, text: &str) -> Option<Self> {
        let captures = pattern.captures(text)?;
        let spans = captures.iter().map(|m| m.map(|m| m.range())).collect();

        Some(Self {
            pattern: pattern.clone(),
            text: text.to_string(),
            spans,
        })
    }

    /// Source text of the matched pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The full text the pattern was matched against.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Byte range of group `idx`, `None` if out of range or not captured.
    pub fn span(&self, idx: usize) -> Option<Range<usize>> {
        self.spans.get(idx).cloned().flatten()
    }

    /// Returns group `idx`, or `None` if the pattern has fewer groups.
    /// Groups which did not participate in the match are returned with an
    /// empty span.
    pub fn group(&self, idx: usize) -> Option<TextMatchGroup> {
        let span = self.spans.get(idx)?.clone();
        let name = self
            .pattern
            .capture_names()
            .nth(idx)
            .flatten()
            .unwrap_or_default()
            .to_string();
        let text = span
            .as_ref()
            .map(|s| self.text[s.clone()].to_string())
            .unwrap_or_default();

        Some(TextMatchGroup { name, span, text })
    }

    /// Returns the group with the given name. An empty name refers to the
    /// whole match.
    pub fn named(&self, name: &str) -> Option<TextMatchGroup> {
        if name.is_empty() {
            return self.group(0);
        }

        let idx = self
            .pattern
            .capture_names()
            .position(|n| n == Some(name))?;

        self.group(idx)
    }

    /// All groups in pattern order.
    pub fn groups(&self) -> Vec<TextMatchGroup> {
        (0..self.spans.len()).filter_map(|idx| self.group(idx)).collect()
    }
}
