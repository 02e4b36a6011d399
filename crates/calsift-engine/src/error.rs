use thiserror::Error;

/// Engine errors.
///
/// Only malformed recurrence data is an error; every missing or
/// mismatched temporal field is defined predicate behavior ("not a
/// duplicate") and never surfaces here.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed recurrence rule: {0}")]
    MalformedRule(String),

    #[error("Recurrence expansion failed: {0}")]
    Expansion(#[from] rrule::RRuleError),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
