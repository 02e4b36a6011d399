use thiserror::Error;

/// RFC parsing errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(#[from] crate::ical::parse::ParseError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
