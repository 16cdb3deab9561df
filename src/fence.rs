use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::Result;

pub const DEFAULT_FENCE_LANGUAGE: &str = "json";

fn fence_pattern(language: &str) -> String {
    format!(r"(?s)```{}\n(.*?)\n```", regex::escape(language))
}

/// Locates the first markdown code fence tagged with a language.
///
/// The fence must open with ```` ```<language> ```` directly followed by a
/// newline and close with a newline and three backticks. The match is lazy,
/// so with several blocks only the first one is captured.
#[derive(Debug, Clone)]
pub struct FenceExtractor {
    pattern: Regex,
}

impl FenceExtractor {
    pub fn new(language: &str) -> Result<Self> {
        if language == DEFAULT_FENCE_LANGUAGE {
            return Ok(Self::default());
        }
        Ok(FenceExtractor {
            pattern: Regex::new(&fence_pattern(language))?,
        })
    }

    /// Fenced block content if one is present.
    pub fn find<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// The text to parse as JSON: the first fenced block, or all of `text`.
    pub fn candidate<'a>(&self, text: &'a str) -> &'a str {
        match self.find(text) {
            Some(inner) => {
                debug!(len = inner.len(), "found fenced block");
                inner
            }
            None => {
                debug!("no fenced block, using whole text");
                text
            }
        }
    }
}

impl Default for FenceExtractor {
    fn default() -> Self {
        static JSON_FENCE_RE: OnceLock<Regex> = OnceLock::new();
        let pattern = JSON_FENCE_RE
            .get_or_init(|| {
                // Constant pattern, always compiles
                Regex::new(&fence_pattern(DEFAULT_FENCE_LANGUAGE)).expect("json fence regex")
            })
            .clone();
        FenceExtractor { pattern }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_fenced_block() {
        let text = "Here is the data:\n```json\n{\"a\": 1}\n```\nDone.";
        assert_eq!(FenceExtractor::default().candidate(text), "{\"a\": 1}");
    }

    #[test]
    fn test_multiline_block() {
        let text = "```json\n{\n  \"a\": [1,\n 2]\n}\n```";
        assert_eq!(
            FenceExtractor::default().candidate(text),
            "{\n  \"a\": [1,\n 2]\n}"
        );
    }

    #[test]
    fn test_first_block_only() {
        let text = "```json\n[1]\n```\nand\n```json\n[2]\n```";
        assert_eq!(FenceExtractor::default().candidate(text), "[1]");
    }

    #[test]
    fn test_falls_back_to_whole_text() {
        let text = "{\"a\": 1}";
        let fence = FenceExtractor::default();
        assert_eq!(fence.find(text), None);
        assert_eq!(fence.candidate(text), text);
    }

    #[test]
    fn test_requires_newlines_around_content() {
        // Inline fence has no newline after the tag
        let text = "```json {\"a\": 1} ```";
        assert_eq!(FenceExtractor::default().candidate(text), text);
    }

    #[test]
    fn test_other_language_not_matched() {
        let text = "```yaml\na: 1\n```";
        assert_eq!(FenceExtractor::default().find(text), None);
    }

    #[test]
    fn test_custom_language() {
        let fence = FenceExtractor::new("c++").unwrap();
        let text = "```c++\nint x;\n```";
        assert_eq!(fence.find(text), Some("int x;"));
        assert_eq!(fence.find("```c\nint x;\n```"), None);
    }
}
