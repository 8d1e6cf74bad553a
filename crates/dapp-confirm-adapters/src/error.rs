use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
    #[error("duplicate entry: {0}")]
    Duplicate(String),
}
