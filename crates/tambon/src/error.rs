use thiserror::Error;

#[derive(Error, Debug)]
pub enum TambonError {
    #[error("Gazetteer data error: {0}")]
    DataError(#[from] tambon_data::DataError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TambonError>;
