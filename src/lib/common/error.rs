use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("dispatch error: {0}")]
    Dispatch(String),

    #[error("store error: {0}")]
    Store(String),
}

impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        NotifyError::Dispatch(e.to_string())
    }
}

impl From<firestore::errors::FirestoreError> for NotifyError {
    fn from(e: firestore::errors::FirestoreError) -> Self {
        NotifyError::Store(e.to_string())
    }
}

impl NotifyError {
    pub fn missing(field: &str) -> Self {
        NotifyError::Validation(format!("missing field `{}`", field))
    }
}
