use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoostError {
    #[error("io error: {0}")]
    Io(String),
    #[error("config parse error: {0}")]
    ConfigParse(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("cli error: {0}")]
    Cli(String),
    #[error("invalid intent: {0}")]
    InvalidIntent(String),
    #[error("invalid mode: {0}")]
    InvalidMode(String),
    #[error("runtime dispatch failed: {0}")]
    RuntimeDispatch(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("render error: {0}")]
    Render(String),
}
