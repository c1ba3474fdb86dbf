//! Error types for Glint

use thiserror::Error;

/// The main error type for Glint operations
///
/// The per-frame simulation and drawing paths never produce errors; these
/// cover configuration loading and optional GPU capability probing.
#[derive(Debug, Error)]
pub enum GlintError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Shader error: {0}")]
    ShaderError(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias for Glint operations
pub type Result<T> = std::result::Result<T, GlintError>;

impl From<toml::de::Error> for GlintError {
    fn from(err: toml::de::Error) -> Self {
        GlintError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_errors_convert() {
        let err: GlintError = toml::from_str::<toml::Value>("world = = 3")
            .unwrap_err()
            .into();
        assert!(matches!(err, GlintError::TomlParseError(_)));
        assert!(err.to_string().starts_with("TOML parse error"));
    }
}
