//! Instrument descriptor: renders one category and its fields as a full
//! LINST document.

use ukb_model::{Category, EnrichedField};

use crate::clean::clean_string;
use crate::error::{LinstError, Result};
use crate::field::FieldDescriptor;

/// Transient wrapper over a category header and the enriched fields it
/// owns. Field descriptors are constructed fresh on every render.
#[derive(Debug)]
pub struct InstrumentDescriptor {
    title: String,
    descript: String,
    notes: String,
    fields: Vec<EnrichedField>,
}

impl InstrumentDescriptor {
    /// Build a descriptor from a category record. Rejects a category with
    /// an empty title and an empty field list; an instrument with zero
    /// fields is meaningless and must not render an empty document.
    pub fn new(category: &Category, fields: Vec<EnrichedField>) -> Result<Self> {
        Self::from_parts(&category.title, &category.descript, &category.notes, fields)
    }

    pub fn from_parts(
        title: &str,
        descript: &str,
        notes: &str,
        fields: Vec<EnrichedField>,
    ) -> Result<Self> {
        if title.is_empty() {
            return Err(LinstError::MissingTitle {
                descriptor: "instrument",
            });
        }
        if fields.is_empty() {
            return Err(LinstError::NoFields);
        }
        Ok(Self {
            title: title.to_string(),
            descript: descript.to_string(),
            notes: notes.to_string(),
            fields,
        })
    }

    pub fn title(&self) -> String {
        clean_string(&self.title)
    }

    /// Destination table identifier: `ukbb_` plus the cleaned title,
    /// lowercased with underscores.
    pub fn table_name(&self) -> String {
        format!("ukbb_{}", self.title().replace(' ', "_").to_lowercase())
    }

    pub fn description(&self) -> Option<&str> {
        (!self.descript.is_empty()).then_some(self.descript.as_str())
    }

    pub fn notes(&self) -> Option<&str> {
        (!self.notes.is_empty()).then_some(self.notes.as_str())
    }

    /// The per-field instance lists, in field order.
    pub fn instances(&self) -> Vec<&[Option<String>]> {
        self.fields.iter().map(|f| f.instances.as_slice()).collect()
    }

    /// Render the instrument document: table and title header, optional
    /// static description and notes rows, then one row per field. Each
    /// line is newline-terminated. Any field that fails descriptor
    /// validation aborts the render before any line is returned.
    pub fn as_linst(&self) -> Result<Vec<String>> {
        let mut lines = Vec::with_capacity(self.fields.len() + 4);
        lines.push(format!("table{{@}}{}\n", self.table_name()));
        lines.push(format!("title{{@}}{}\n", self.title()));

        if let Some(descript) = self.description() {
            lines.push(format!("static{{@}}{{@}}{descript}\n"));
        }
        if let Some(notes) = self.notes() {
            lines.push(format!("static{{@}}{{@}}Notes: {notes}\n"));
        }

        for field in &self.fields {
            let descriptor = FieldDescriptor::new(field)?;
            lines.push(format!("{}\n", descriptor.as_linst()));
        }
        Ok(lines)
    }
}
