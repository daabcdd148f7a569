pub mod error;
pub mod index;
pub mod repository;
pub mod tsv;

pub use error::{Result, SchemaError};
pub use index::{SCHEMA_INDEX_FILE, SchemaDoc, load_schema_index, missing_files};
pub use repository::{CategoryFields, ROOT_CATEGORY_ID, SchemaRepository};
pub use tsv::{read_tsv_rows, read_tsv_rows_latin1};
