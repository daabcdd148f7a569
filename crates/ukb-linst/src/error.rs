use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinstError {
    #[error("field descriptor: field_id is required")]
    MissingFieldId,

    #[error("{descriptor} descriptor: title is required")]
    MissingTitle { descriptor: &'static str },

    #[error("instrument descriptor: there must be at least one field")]
    NoFields,
}

pub type Result<T> = std::result::Result<T, LinstError>;
