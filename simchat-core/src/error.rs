use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimchatError {
    #[error("Sink error: {0}")]
    Sink(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimchatError>;
