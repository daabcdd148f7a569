//! LORIS instrument (LINST) rendering.
//!
//! Turns enriched UK Biobank schema records into the `{@}`-delimited
//! instrument-definition grammar: one document per category, one row per
//! field, with field-type-dependent row shapes.

mod clean;
mod error;
mod field;
mod instrument;

pub use clean::clean_string;
pub use error::{LinstError, Result};
pub use field::{ElementType, FieldDescriptor, SEPARATOR};
pub use instrument::InstrumentDescriptor;
