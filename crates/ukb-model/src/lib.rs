pub mod dictionaries;
pub mod error;
pub mod record;

pub use dictionaries::{
    BaseType, Instanced, ItemType, Sexed, Stability, Strata, ValueType, arrayed, availability,
    private,
};
pub use error::{ModelError, Result};
pub use record::{Category, Encoding, EncodingValue, EnrichedField, RawField, Subproject, Visit};
