use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FleetsheetError {
    #[error("no service files found in the following directory: {}", dir.display())]
    NoServiceFiles { dir: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to open workbook {}: {reason}", path.display())]
    Workbook { path: PathBuf, reason: String },

    #[error("invalid cell reference '{0}'")]
    CellRef(String),

    #[error("failed to load reference services from {}: {reason}", path.display())]
    Reference { path: PathBuf, reason: String },

    #[error("failed to write output workbook {}: {reason}", path.display())]
    Output { path: PathBuf, reason: String },

    #[error("field resolution order has a cycle involving '{0}'")]
    DependencyCycle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
