use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Usage: {program} <mcp_temp_file> <output_path>")]
    Usage { program: String },
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON in {}: {source}", path.display())]
    OuterJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse extracted JSON: {0}")]
    InnerJson(#[source] serde_json::Error),
    #[error("failed to serialize payload: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("invalid fence pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("JSON config parsing error: {0}")]
    ConfigParse(#[source] serde_json::Error),
    #[cfg(feature = "toml_config")]
    #[error("TOML config parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Unsupported config file format. Use .json or .toml")]
    UnsupportedFormat,
    #[error("TOML support is not enabled. Enable the 'toml_config' feature to use TOML configs.")]
    TomlNotEnabled,
}

impl ExtractError {
    /// Every failure is terminal for the run.
    pub fn exit_code(&self) -> i32 {
        1
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, ExtractError::Usage { .. })
    }
}
