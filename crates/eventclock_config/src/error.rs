use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown time unit `{0}`")]
    InvalidUnit(String),

    #[error("invalid value `{value}` for {key}")]
    InvalidNumber { key: String, value: String },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "toml-config")]
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(not(feature = "toml-config"))]
    #[error("TOML support not enabled. Enable the 'toml-config' feature.")]
    TomlDisabled,
}
