//! Field descriptor: derives LINST presentation attributes from one
//! enriched field and renders its instrument row.

use ukb_model::{EnrichedField, ItemType, Strata, ValueType};

use crate::clean::clean_string;
use crate::error::{LinstError, Result};

/// LINST field separator.
pub const SEPARATOR: &str = "{@}";

/// The rendering kind of a field line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Text,
    Numeric,
    Select,
    SelectMultiple,
    Date,
    Static,
}

impl ElementType {
    /// Map a field's value type to its rendering kind. A field without a
    /// resolvable value type renders as a static row.
    pub fn from_value_type(value_type: Option<ValueType>) -> Self {
        match value_type {
            Some(ValueType::Compound) => ElementType::Text,
            Some(ValueType::Integer) => ElementType::Numeric,
            Some(ValueType::CategoricalSingle) => ElementType::Select,
            Some(ValueType::CategoricalMultiple) => ElementType::SelectMultiple,
            Some(ValueType::Continuous) => ElementType::Numeric,
            Some(ValueType::Text) => ElementType::Text,
            Some(ValueType::Date) => ElementType::Date,
            Some(ValueType::Time) => ElementType::Numeric,
            None => ElementType::Static,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Numeric => "numeric",
            ElementType::Select => "select",
            ElementType::SelectMultiple => "selectmultiple",
            ElementType::Date => "date",
            ElementType::Static => "static",
        }
    }
}

/// Transient view over one enriched field, rendering it as a LINST row.
#[derive(Debug)]
pub struct FieldDescriptor<'a> {
    field: &'a EnrichedField,
}

impl<'a> FieldDescriptor<'a> {
    pub fn new(field: &'a EnrichedField) -> Result<Self> {
        if field.field_id.is_empty() {
            return Err(LinstError::MissingFieldId);
        }
        if field.title.is_empty() {
            return Err(LinstError::MissingTitle {
                descriptor: "field",
            });
        }
        Ok(Self { field })
    }

    /// The source title with non-word characters replaced by spaces.
    pub fn title(&self) -> String {
        clean_string(&self.field.title)
    }

    /// Column identifier: `{field_id}_` plus at most 50 characters of the
    /// normalized, lowercased, underscore-joined title.
    pub fn column_name(&self) -> String {
        let suffix: String = self
            .title()
            .replace(' ', "_")
            .to_lowercase()
            .chars()
            .take(50)
            .collect();
        format!("{}_{}", self.field.field_id, suffix)
    }

    /// Display label: cleaned title plus the units in parentheses. A
    /// unit-less field keeps the literal empty parentheses.
    pub fn label(&self) -> String {
        format!("{} ({})", self.title(), self.field.units)
    }

    pub fn element_type(&self) -> ElementType {
        ElementType::from_value_type(self.field.value_type)
    }

    /// Option list for the two categorical kinds, in encoding-table
    /// order; empty for every other element type. Single quotes inside a
    /// meaning are replaced with backticks to survive the grammar.
    pub fn options(&self) -> String {
        let categorical = self
            .field
            .value_type
            .is_some_and(|vt| vt.is_categorical());
        if !categorical {
            return String::new();
        }
        let mut options = String::from("NULL=>''");
        for entry in &self.field.encoding {
            let meaning = entry.meaning.replace('\'', "`");
            options.push_str("{-}'");
            options.push_str(&entry.value);
            options.push_str("'=>'");
            options.push_str(&meaning);
            options.push('\'');
        }
        options
    }

    /// Render the field's instrument row.
    ///
    /// Ordered decision table, first match wins:
    /// 1. non-Data item types are file-backed rows
    /// 2. non-Primary strata render as static display rows
    /// 3. text has no options column
    /// 4. date forces empty option slots
    /// 5. numeric forces `null{@}null`
    /// 6. everything else keeps its computed options
    pub fn as_linst(&self) -> String {
        let element_type = self.element_type();
        let column_name = self.column_name();
        let label = self.label();

        if self.field.item_type != ItemType::Data {
            return ["file", column_name.as_str(), label.as_str()].join(SEPARATOR);
        }

        if self.field.strata != Strata::Primary {
            return ["static", column_name.as_str(), label.as_str()].join(SEPARATOR);
        }

        if element_type == ElementType::Text {
            return [element_type.as_str(), column_name.as_str(), label.as_str()].join(SEPARATOR);
        }

        let options = match element_type {
            ElementType::Date => "{@}{@}".to_string(),
            ElementType::Numeric => "null{@}null".to_string(),
            _ => self.options(),
        };

        [
            element_type.as_str(),
            column_name.as_str(),
            label.as_str(),
            options.as_str(),
        ]
        .join(SEPARATOR)
    }
}
