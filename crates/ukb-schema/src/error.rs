use std::path::PathBuf;

use ukb_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TSV {path}: {message}")]
    Tsv { path: PathBuf, message: String },

    #[error("missing column {column:?} in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("field_id not found: {field_id}")]
    FieldNotFound { field_id: String },

    #[error("encoding not found: {encoding_id}")]
    EncodingNotFound { encoding_id: String },

    #[error("category not found: {category_id}")]
    CategoryNotFound { category_id: String },

    #[error("subproject not found: {instance_id}")]
    SubprojectNotFound { instance_id: String },

    #[error("invalid number in {column} for record {record_id}: {value:?}")]
    InvalidNumber {
        record_id: String,
        column: &'static str,
        value: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl SchemaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
