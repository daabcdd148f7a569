//! Code dictionaries for the UK Biobank schema.
//!
//! The showcase schema stores every field attribute as a short numeric
//! code. These lookups translate each code into its semantic label,
//! exactly as published in the showcase documentation. Each lookup is
//! total over the closed set of known codes: an unknown code indicates a
//! schema-version mismatch and surfaces as [`ModelError::UnknownCode`]
//! rather than being masked with a fallback.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, Result};

/// Whether a field is generally available to researchers.
///
/// Code "0" means available, "1" means restricted.
pub fn availability(code: &str) -> Result<bool> {
    match code {
        "0" => Ok(true),
        "1" => Ok(false),
        _ => Err(ModelError::unknown("availability", code)),
    }
}

/// Whether a field is private. Code "0" means public, "1" private.
pub fn private(code: &str) -> Result<bool> {
    match code {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(ModelError::unknown("private", code)),
    }
}

/// Whether a field carries an array of values per instance.
pub fn arrayed(code: &str) -> Result<bool> {
    match code {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(ModelError::unknown("arrayed", code)),
    }
}

/// Dataset stability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stability {
    Complete,
    Updateable,
    Accruing,
    Ongoing,
}

impl Stability {
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "0" => Ok(Stability::Complete),
            "1" => Ok(Stability::Updateable),
            "2" => Ok(Stability::Accruing),
            "3" => Ok(Stability::Ongoing),
            _ => Err(ModelError::unknown("stability", code)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stability::Complete => "Complete",
            Stability::Updateable => "Updateable",
            Stability::Accruing => "Accruing",
            Stability::Ongoing => "Ongoing",
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The value type of a field, driving how it renders in an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Compound,
    Integer,
    /// Single-choice categorical value backed by an encoding.
    CategoricalSingle,
    /// Multi-choice categorical value backed by an encoding.
    CategoricalMultiple,
    Continuous,
    Text,
    Date,
    Time,
}

impl ValueType {
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "101" => Ok(ValueType::Compound),
            "11" => Ok(ValueType::Integer),
            "21" => Ok(ValueType::CategoricalSingle),
            "22" => Ok(ValueType::CategoricalMultiple),
            "31" => Ok(ValueType::Continuous),
            "41" => Ok(ValueType::Text),
            "51" => Ok(ValueType::Date),
            "61" => Ok(ValueType::Time),
            _ => Err(ModelError::unknown("value_type", code)),
        }
    }

    /// The label as published in the showcase schema documentation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Compound => "Compound",
            ValueType::Integer => "Integer",
            ValueType::CategoricalSingle => "Categorical (single)",
            ValueType::CategoricalMultiple => "Categorical (multiple)",
            ValueType::Continuous => "Continuous",
            ValueType::Text => "Text",
            ValueType::Date => "Date",
            ValueType::Time => "Time",
        }
    }

    /// Returns true for either categorical kind (fields that carry an
    /// option list from their encoding).
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            ValueType::CategoricalSingle | ValueType::CategoricalMultiple
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether and how a field's raw values are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseType {
    NotEncoded,
    Encoded1,
    Encoded2,
}

impl BaseType {
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "0" => Ok(BaseType::NotEncoded),
            "11" => Ok(BaseType::Encoded1),
            "41" => Ok(BaseType::Encoded2),
            _ => Err(ModelError::unknown("base_type", code)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::NotEncoded => "Not encoded",
            BaseType::Encoded1 => "Encoded 1",
            BaseType::Encoded2 => "Encoded 2",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The storage kind of a field.
///
/// Only `Data` items carry values inline; the other kinds reference
/// external material (sample assays, bulk files, linked records).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Data,
    Samples,
    Bulk,
    Records,
}

impl ItemType {
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "0" => Ok(ItemType::Data),
            "10" => Ok(ItemType::Samples),
            "20" => Ok(ItemType::Bulk),
            "30" => Ok(ItemType::Records),
            _ => Err(ModelError::unknown("item_type", code)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Data => "Data",
            ItemType::Samples => "Samples",
            ItemType::Bulk => "Bulk",
            ItemType::Records => "Records",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of a field as primary collected data or derived /
/// supporting material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strata {
    Primary,
    Supporting,
    Auxiliary,
    Derived,
}

impl Strata {
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "0" => Ok(Strata::Primary),
            "1" => Ok(Strata::Supporting),
            "2" => Ok(Strata::Auxiliary),
            "3" => Ok(Strata::Derived),
            _ => Err(ModelError::unknown("strata", code)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strata::Primary => "Primary",
            Strata::Supporting => "Supporting",
            Strata::Auxiliary => "Auxiliary",
            Strata::Derived => "Derived",
        }
    }
}

impl fmt::Display for Strata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a field repeats across assessment instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instanced {
    Singular,
    Defined,
    Variable,
}

impl Instanced {
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "0" => Ok(Instanced::Singular),
            "1" => Ok(Instanced::Defined),
            "2" => Ok(Instanced::Variable),
            _ => Err(ModelError::unknown("instanced", code)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Instanced::Singular => "Singular",
            Instanced::Defined => "Defined",
            Instanced::Variable => "Variable",
        }
    }
}

impl fmt::Display for Instanced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which sexes a field was collected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sexed {
    Both,
    MalesOnly,
    FemalesOnly,
}

impl Sexed {
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "0" => Ok(Sexed::Both),
            "1" => Ok(Sexed::MalesOnly),
            "2" => Ok(Sexed::FemalesOnly),
            _ => Err(ModelError::unknown("sexed", code)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sexed::Both => "Both sexes",
            Sexed::MalesOnly => "Males only",
            Sexed::FemalesOnly => "Females only",
        }
    }
}

impl fmt::Display for Sexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
