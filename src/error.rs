use thiserror::Error;

/// Errors raised while reading a host export into the canonical node model.
#[derive(Error, Debug, Clone)]
pub enum IngestError {
    #[error("Failed to parse design export JSON: {0}")]
    JsonParseError(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Errors raised while extracting a single node or screen subtree.
///
/// These never leave the screen builder: a failing child is dropped from its
/// parent and a failing screen root is replaced by a fallback screen.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("Node '{node_id}' is nested {depth} levels deep, exceeding the limit of {limit}")]
    DepthExceeded {
        node_id: String,
        depth: usize,
        limit: usize,
    },

    #[error("Screen '{name}' has degenerate geometry ({width} x {height})")]
    DegenerateGeometry { name: String, width: f64, height: f64 },
}

/// Errors raised inside the flow detection pipeline.
#[derive(Error, Debug, Clone)]
pub enum DetectionError {
    #[error("Strategy '{strategy}' failed: {message}")]
    StrategyFailed { strategy: String, message: String },

    #[error("Flow group '{group_id}' references unknown screen {screen_id}")]
    UnknownScreen { group_id: String, screen_id: u32 },

    #[error("Flow group '{0}' has no screens")]
    EmptyGroup(String),
}

/// Errors raised when validating or parsing an `EngineConfig`.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Failed to parse configuration JSON: {0}")]
    JsonParseError(String),

    #[error("Configuration value '{field}' is invalid: {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors that can occur when converting a custom host format into a `DesignForest`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Invalid host data: {0}")]
    ValidationError(String),
}
