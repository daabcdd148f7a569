//! Schema record types.
//!
//! These are the in-memory shapes of the showcase reference tables:
//! raw rows as loaded from disk, and the enriched field record produced
//! once every coded attribute has been resolved through the dictionaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dictionaries::{BaseType, ItemType, Sexed, Strata, ValueType};

/// One entry of an encoding's value table: the raw stored value and its
/// human meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingValue {
    pub value: String,
    pub meaning: String,
}

/// A named mapping from raw stored values to meanings, shared across
/// fields. Values keep their source-table order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encoding {
    pub encoding_id: String,
    pub title: String,
    pub values: Vec<EncodingValue>,
}

/// One assessment visit within a cohort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub descript: String,
    pub title: String,
}

/// A cohort (the showcase calls these "instances"): a group of
/// participants with a shared set of visits, indexed by instance index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subproject {
    pub descript: String,
    pub num_members: String,
    pub visits: BTreeMap<u32, Visit>,
}

/// A grouping node in the category tree.
///
/// `children` is populated from the flat browse-edge table; after tree
/// reconciliation the root category ("0") reaches every category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub category_id: String,
    pub title: String,
    pub descript: String,
    pub group_type: String,
    pub notes: String,
    pub availability: String,
    pub children: Vec<String>,
}

/// One row of the field table, all attributes still coded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawField {
    pub field_id: String,
    pub title: String,
    pub notes: String,
    pub debut: String,
    pub version: String,
    pub strata: String,
    pub item_type: String,
    pub availability: String,
    pub sexed: String,
    pub base_type: String,
    pub encoding_id: String,
    pub instance_id: String,
    pub instanced: String,
    pub instance_min: String,
    pub instance_max: String,
    pub item_count: String,
    pub num_participants: String,
    pub value_type: String,
    pub units: String,
    pub main_category: String,
}

/// A field with every coded attribute resolved to its semantic form.
///
/// `instances` holds one entry per instance index in
/// `[instance_min, instance_max)`: the cohort visit's title, or `None`
/// when the cohort has no visit record at that index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedField {
    pub field_id: String,
    pub title: String,
    pub notes: String,
    pub debut: String,
    pub version: String,
    pub strata: Strata,
    pub item_type: ItemType,
    pub availability: bool,
    pub sexed: Sexed,
    pub encoded: BaseType,
    pub encoding: Vec<EncodingValue>,
    pub instance_id: String,
    pub instances: Vec<Option<String>>,
    pub item_count: String,
    pub num_participants: String,
    pub value_type: Option<ValueType>,
    pub units: String,
    /// Title of the field's main category, already resolved.
    pub main_category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionaries::{BaseType, ItemType, Sexed, Strata, ValueType};

    #[test]
    fn enriched_field_serializes() {
        let field = EnrichedField {
            field_id: "21022".to_string(),
            title: "Age at recruitment".to_string(),
            notes: String::new(),
            debut: "2009-01-01".to_string(),
            version: "1".to_string(),
            strata: Strata::Primary,
            item_type: ItemType::Data,
            availability: true,
            sexed: Sexed::Both,
            encoded: BaseType::NotEncoded,
            encoding: vec![],
            instance_id: "2".to_string(),
            instances: vec![Some("Baseline".to_string()), None],
            item_count: "1".to_string(),
            num_participants: "502000".to_string(),
            value_type: Some(ValueType::Integer),
            units: "years".to_string(),
            main_category: "Baseline characteristics".to_string(),
        };
        let json = serde_json::to_string(&field).expect("serialize field");
        let round: EnrichedField = serde_json::from_str(&json).expect("deserialize field");
        assert_eq!(round.field_id, "21022");
        assert_eq!(round.instances, field.instances);
        assert_eq!(round.value_type, Some(ValueType::Integer));
    }
}
