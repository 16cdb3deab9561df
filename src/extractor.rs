use std::{
    fmt::{self, Debug, Formatter},
    fs, io,
    path::Path,
    sync::Arc,
};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    cleaner::{Cleaned, TextCleaner},
    envelope::{parse_envelope, text_field},
    error::{ExtractError, Result},
    extractor_config::ExtractorConfig,
    fence::FenceExtractor,
};

/// A builder for the `Extractor` struct
/// that allows for configuring the extractor
/// before building it
pub struct ExtractorBuilder {
    config: Option<ExtractorConfig>,
    cleaner: Option<Arc<dyn TextCleaner>>,
}

impl ExtractorBuilder {
    pub fn new() -> Self {
        ExtractorBuilder {
            config: None,
            cleaner: None,
        }
    }

    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the cleaner derived from the config.
    pub fn with_cleaner<T: TextCleaner + 'static>(mut self, cleaner: T) -> Self {
        self.cleaner = Some(Arc::new(cleaner));
        self
    }

    pub fn build(self) -> Result<Extractor> {
        let config = self.config.unwrap_or_default();
        let fence = FenceExtractor::new(&config.fence_language)?;
        let cleaner = match self.cleaner {
            Some(cleaner) => cleaner,
            None => Arc::new(config.cleaner()),
        };

        Ok(Extractor {
            text_field: config.text_field,
            fence,
            cleaner,
        })
    }
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of running the extraction steps on in-memory content.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub payload: Value,
    pub cleaned: Cleaned,
}

impl Extraction {
    /// Number of top-level keys when the payload is an object, else 0.
    pub fn places(&self) -> usize {
        self.payload.as_object().map_or(0, |map| map.len())
    }
}

/// The one-line report printed after a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub places: usize,
    pub cleaned_chars: usize,
    pub output: String,
}

impl Summary {
    pub fn to_json_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(ExtractError::Serialize)
    }
}

/// Pulls the JSON payload out of an MCP tool-result dump.
///
/// # Example
///
/// ```
/// use dp_extract::Extractor;
/// use std::path::Path;
///
/// let raw = r#"[{"type": "text", "text": "```json\n{\"a\": 1}\n```"}]"#;
/// let extractor = Extractor::default();
/// let extraction = extractor.extract_str(raw, Path::new("dump.json")).unwrap();
/// assert_eq!(extraction.cleaned.text, r#"{"a":1}"#);
/// assert_eq!(extraction.places(), 1);
/// ```
#[derive(Clone)]
pub struct Extractor {
    text_field: String,
    fence: FenceExtractor,
    cleaner: Arc<dyn TextCleaner>,
}

impl Debug for Extractor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("text_field", &self.text_field)
            .field("fence", &self.fence)
            .finish_non_exhaustive()
    }
}

impl Extractor {
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    /// Parses the envelope, locates and parses the payload, and cleans its
    /// compact serialization. `source` only labels envelope errors.
    pub fn extract_str(&self, raw: &str, source: &Path) -> Result<Extraction> {
        let envelope = parse_envelope(raw, source)?;
        let text = text_field(&envelope, &self.text_field);
        let candidate = self.fence.candidate(text);

        let payload: Value = serde_json::from_str(candidate).map_err(ExtractError::InnerJson)?;
        let serialized = serde_json::to_string(&payload).map_err(ExtractError::Serialize)?;
        let cleaned = self.cleaner.clean(&serialized);
        debug!(
            bytes = cleaned.text.len(),
            replaced = cleaned.replaced,
            "payload cleaned"
        );

        Ok(Extraction { payload, cleaned })
    }

    /// Reads `input`, writes the cleaned payload to `output` and returns the
    /// summary. Nothing is written unless extraction succeeded.
    pub fn run(&self, input: &Path, output: &Path) -> Result<Summary> {
        let raw = fs::read_to_string(input).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ExtractError::FileNotFound {
                path: input.to_path_buf(),
            },
            _ => ExtractError::Io(err),
        })?;

        let extraction = self.extract_str(&raw, input)?;
        fs::write(output, &extraction.cleaned.text)?;
        info!(
            output = %output.display(),
            bytes = extraction.cleaned.text.len(),
            "wrote payload"
        );

        Ok(Summary {
            places: extraction.places(),
            cleaned_chars: extraction.cleaned.replaced,
            output: output.display().to_string(),
        })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        let config = ExtractorConfig::default();
        Extractor {
            cleaner: Arc::new(config.cleaner()),
            text_field: config.text_field,
            fence: FenceExtractor::default(),
        }
    }
}
