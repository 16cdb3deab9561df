use serde::{Deserialize, Serialize};
use std::{fmt::Display, fs, path::Path};

use crate::{
    cleaner::{LineTerminatorCleaner, LINE_SEPARATOR, PARAGRAPH_SEPARATOR},
    envelope::DEFAULT_TEXT_FIELD,
    error::{ExtractError, Result},
    fence::DEFAULT_FENCE_LANGUAGE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractorConfig {
    #[serde(default = "default_fence_language")]
    pub fence_language: String,
    #[serde(default = "default_text_field")]
    pub text_field: String,
    #[serde(default = "default_separators")]
    pub separators: Vec<char>,
    #[serde(default = "default_replacement")]
    pub replacement: char,
}

fn default_fence_language() -> String {
    DEFAULT_FENCE_LANGUAGE.to_string()
}

fn default_text_field() -> String {
    DEFAULT_TEXT_FIELD.to_string()
}

fn default_separators() -> Vec<char> {
    vec![LINE_SEPARATOR, PARAGRAPH_SEPARATOR]
}

fn default_replacement() -> char {
    ' '
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            fence_language: default_fence_language(),
            text_field: default_text_field(),
            separators: default_separators(),
            replacement: default_replacement(),
        }
    }
}

impl ExtractorConfig {
    /// Loads a config from a `.json`/`.toml` file path, or parses `config`
    /// itself as inline JSON (then TOML) when no such file exists.
    pub fn from_config(config: &str) -> Result<ExtractorConfig> {
        if Path::new(config).exists() {
            let config_content = fs::read_to_string(config)?;
            if config.ends_with(".json") {
                serde_json::from_str(&config_content).map_err(ExtractError::ConfigParse)
            } else if config.ends_with(".toml") {
                #[cfg(feature = "toml_config")]
                {
                    Ok(toml::from_str(&config_content)?)
                }
                #[cfg(not(feature = "toml_config"))]
                {
                    Err(ExtractError::TomlNotEnabled)
                }
            } else {
                Err(ExtractError::UnsupportedFormat)
            }
        } else {
            serde_json::from_str(config).or_else(|json_err| {
                #[cfg(feature = "toml_config")]
                {
                    let _ = json_err;
                    toml::from_str(config).map_err(|e| e.into())
                }
                #[cfg(not(feature = "toml_config"))]
                {
                    Err(ExtractError::ConfigParse(json_err))
                }
            })
        }
    }

    pub fn cleaner(&self) -> LineTerminatorCleaner {
        LineTerminatorCleaner::new(self.separators.clone(), self.replacement)
    }
}

impl Display for ExtractorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", json)
    }
}
