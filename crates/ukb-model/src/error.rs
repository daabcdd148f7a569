use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown {dictionary} code: {code:?}")]
    UnknownCode {
        dictionary: &'static str,
        code: String,
    },
}

impl ModelError {
    pub(crate) fn unknown(dictionary: &'static str, code: &str) -> Self {
        Self::UnknownCode {
            dictionary,
            code: code.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
