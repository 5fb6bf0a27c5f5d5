use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventFormError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type EventFormResult<T> = Result<T, EventFormError>;
