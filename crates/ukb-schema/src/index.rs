//! Schema document index (`999-schema.txt`).
//!
//! The index lists every schema file the showcase publishes, one row per
//! document. Retrieval is handled elsewhere; this module only answers
//! which files a schema directory is expected to contain and which of
//! them are missing.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::tsv::{read_tsv_rows, require_column};

/// File name of the schema index itself.
pub const SCHEMA_INDEX_FILE: &str = "999-schema.txt";

/// One row of the schema index.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDoc {
    pub schema_id: String,
    pub name: String,
}

impl SchemaDoc {
    /// The on-disk naming convention: `{schema_id}-{name}.txt`.
    pub fn file_name(&self) -> String {
        format!("{}-{}.txt", self.schema_id, self.name)
    }
}

/// Parse the schema index from a schema directory.
pub fn load_schema_index(schema_dir: &Path) -> Result<Vec<SchemaDoc>> {
    let path = schema_dir.join(SCHEMA_INDEX_FILE);
    let rows = read_tsv_rows(&path)?;
    let mut docs = Vec::with_capacity(rows.len());
    for row in &rows {
        docs.push(SchemaDoc {
            schema_id: require_column(row, &path, "schema_id")?.to_string(),
            name: require_column(row, &path, "name")?.to_string(),
        });
    }
    Ok(docs)
}

/// Return the paths of indexed schema files absent from `schema_dir`.
pub fn missing_files(docs: &[SchemaDoc], schema_dir: &Path) -> Vec<PathBuf> {
    docs.iter()
        .map(|doc| schema_dir.join(doc.file_name()))
        .filter(|path| !path.exists())
        .collect()
}
