use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("Unknown colour: {0}")]
    UnknownColor(String),
    #[error("Selected {selected} colours for {fillable} fillable tubes")]
    ColorCountMismatch { selected: usize, fillable: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
