use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("session error: {0}")]
    Session(#[from] ffg_consensus::SessionError),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
