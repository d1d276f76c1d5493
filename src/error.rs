use thiserror::Error;

/// Pipeline error type. Contained at the orchestrator boundary; the HTTP
/// handlers are infallible (the analyze path always renders a page), so
/// this type never crosses into the response layer.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model inference error: {0}")]
    ModelInference(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}
