#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid rule for field '{field}': {reason}")]
    InvalidRule { field: String, reason: String },

    #[error("Unknown form: {0}")]
    UnknownForm(String),
}
