use burnout_common::GridRect;

/// Setup-time contract violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("block size must be positive, got {0}")]
    NonPositiveBlockSize(i32),
    #[error("{what} extent is empty: {rows} rows x {cols} cols")]
    EmptyExtent {
        what: &'static str,
        rows: i32,
        cols: i32,
    },
    #[error("{what} must occupy exactly one cell, got {rect}")]
    NotUnitCell { what: &'static str, rect: GridRect },
    #[error("avatar starts off the map at {rect} and the map rejects out-of-bounds moves")]
    AvatarOffMap { rect: GridRect },
}

/// Errors from loading a layout file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported layout format: {0:?} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
}
