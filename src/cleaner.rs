pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// Text after cleaning, together with how many characters were replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
    pub text: String,
    pub replaced: usize,
}

// Cleaning runs on the serialized payload, never on the raw envelope
pub trait TextCleaner: Send + Sync {
    fn clean(&self, text: &str) -> Cleaned;
}

/// Replaces Unicode line terminators that break JavaScript string literals.
///
/// JSON allows U+2028 and U+2029 unescaped inside strings, but older JS
/// engines treat them as newlines, so a viewer loading the output with
/// `<script>` or `eval` would choke. Each occurrence becomes `replacement`.
#[derive(Debug, Clone)]
pub struct LineTerminatorCleaner {
    separators: Vec<char>,
    replacement: char,
}

impl LineTerminatorCleaner {
    pub fn new(separators: Vec<char>, replacement: char) -> Self {
        LineTerminatorCleaner {
            separators,
            replacement,
        }
    }
}

impl Default for LineTerminatorCleaner {
    fn default() -> Self {
        LineTerminatorCleaner::new(vec![LINE_SEPARATOR, PARAGRAPH_SEPARATOR], ' ')
    }
}

impl TextCleaner for LineTerminatorCleaner {
    fn clean(&self, text: &str) -> Cleaned {
        let mut replaced = 0;
        let text = text
            .chars()
            .map(|c| {
                if self.separators.contains(&c) {
                    replaced += 1;
                    self.replacement
                } else {
                    c
                }
            })
            .collect();

        Cleaned { text, replaced }
    }
}
