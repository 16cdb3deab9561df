mod cleaner;
mod envelope;
mod error;
mod extractor;
mod extractor_config;
mod fence;

pub use cleaner::{Cleaned, LineTerminatorCleaner, TextCleaner, LINE_SEPARATOR, PARAGRAPH_SEPARATOR};
pub use envelope::{parse_envelope, text_field, DEFAULT_TEXT_FIELD};
pub use error::{ExtractError, Result};
pub use extractor::{Extraction, Extractor, ExtractorBuilder, Summary};
pub use extractor_config::ExtractorConfig;
pub use fence::{FenceExtractor, DEFAULT_FENCE_LANGUAGE};
