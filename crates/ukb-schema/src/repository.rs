//! The schema repository: loads the showcase reference tables into
//! read-only in-memory indices and enriches field records on demand.
//!
//! Load order follows the table dependencies: encodings (and their value
//! tables), subprojects (and their visits), categories (and their browse
//! edges), fields, then the category→fields index. Each file is opened,
//! fully consumed and closed before the next load step. A missing or
//! malformed file is fatal; no partial repository is ever returned.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use ukb_model::dictionaries;
use ukb_model::{
    Category, Encoding, EncodingValue, EnrichedField, ItemType, RawField, Sexed, Strata,
    Subproject, ValueType, Visit,
};

use crate::error::{Result, SchemaError};
use crate::tsv::{read_tsv_rows, read_tsv_rows_latin1, require_column};

/// Id of the root category every other category must reach.
pub const ROOT_CATEGORY_ID: &str = "0";

const FIELD_FILE: &str = "1-field.txt";
const ENCODING_FILE: &str = "2-encoding.txt";
const CATEGORY_FILE: &str = "3-category.txt";
const INSTANCES_FILE: &str = "9-instances.txt";
const INSVALUE_FILE: &str = "10-insvalue.txt";
const CATBROWSE_FILE: &str = "13-catbrowse.txt";

/// The encoding value tables, one file per storage type. All of them are
/// published in ISO-8859-1.
const ENCODING_VALUE_FILES: [&str; 6] = [
    "5-esimpint.txt",
    "6-esimpstring.txt",
    "7-esimpreal.txt",
    "8-esimpdate.txt",
    "11-ehierint.txt",
    "12-ehierstring.txt",
];

/// A category paired with the enriched fields it owns, as produced by
/// [`SchemaRepository::categories_with_fields`].
#[derive(Debug)]
pub struct CategoryFields<'a> {
    pub category_id: String,
    /// `None` when a field references a category id with no record in the
    /// category table.
    pub category: Option<&'a Category>,
    pub fields: Vec<EnrichedField>,
}

/// In-memory view of the showcase schema dictionary.
///
/// Read-only after [`load`](Self::load); safe to share across concurrent
/// renders.
#[derive(Debug)]
pub struct SchemaRepository {
    schema_dir: PathBuf,
    encodings: BTreeMap<String, Encoding>,
    subprojects: BTreeMap<String, Subproject>,
    categories: BTreeMap<String, Category>,
    /// Field rows in source order; the order drives the category→fields
    /// index and therefore instrument ordering.
    fields: Vec<RawField>,
    field_index: HashMap<String, usize>,
    /// category_id → field ids, in source-row order of each category's
    /// first field.
    category_fields: Vec<(String, Vec<String>)>,
    category_fields_index: HashMap<String, usize>,
}

impl SchemaRepository {
    /// Load every reference table from a directory of pre-fetched schema
    /// files.
    pub fn load(schema_dir: &Path) -> Result<Self> {
        let mut repo = Self {
            schema_dir: schema_dir.to_path_buf(),
            encodings: BTreeMap::new(),
            subprojects: BTreeMap::new(),
            categories: BTreeMap::new(),
            fields: Vec::new(),
            field_index: HashMap::new(),
            category_fields: Vec::new(),
            category_fields_index: HashMap::new(),
        };
        repo.load_encodings()?;
        repo.load_subprojects()?;
        repo.load_categories()?;
        repo.load_fields()?;
        repo.build_category_fields_index();
        info!(
            encodings = repo.encodings.len(),
            subprojects = repo.subprojects.len(),
            categories = repo.categories.len(),
            fields = repo.fields.len(),
            "schema repository loaded"
        );
        Ok(repo)
    }

    fn load_encodings(&mut self) -> Result<()> {
        let path = self.schema_dir.join(ENCODING_FILE);
        for row in &read_tsv_rows(&path)? {
            let encoding_id = require_column(row, &path, "encoding_id")?.to_string();
            self.encodings.insert(
                encoding_id.clone(),
                Encoding {
                    encoding_id,
                    title: row.get("title").cloned().unwrap_or_default(),
                    values: Vec::new(),
                },
            );
        }
        debug!(count = self.encodings.len(), file = ENCODING_FILE, "loaded encodings");

        for file in ENCODING_VALUE_FILES {
            let path = self.schema_dir.join(file);
            let rows = read_tsv_rows_latin1(&path)?;
            for row in &rows {
                let encoding_id = require_column(row, &path, "encoding_id")?;
                let encoding = self.encodings.get_mut(encoding_id).ok_or_else(|| {
                    SchemaError::EncodingNotFound {
                        encoding_id: encoding_id.to_string(),
                    }
                })?;
                let value = require_column(row, &path, "value")?;
                let meaning = require_column(row, &path, "meaning")?;
                // A value key repeated across the value tables replaces
                // the earlier meaning but keeps its original position.
                match encoding.values.iter_mut().find(|v| v.value == value) {
                    Some(existing) => existing.meaning = meaning.to_string(),
                    None => encoding.values.push(EncodingValue {
                        value: value.to_string(),
                        meaning: meaning.to_string(),
                    }),
                }
            }
            debug!(count = rows.len(), file, "loaded encoding values");
        }
        Ok(())
    }

    fn load_subprojects(&mut self) -> Result<()> {
        let path = self.schema_dir.join(INSTANCES_FILE);
        for row in &read_tsv_rows(&path)? {
            let instance_id = require_column(row, &path, "instance_id")?.to_string();
            self.subprojects.insert(
                instance_id,
                Subproject {
                    descript: require_column(row, &path, "descript")?.to_string(),
                    num_members: require_column(row, &path, "num_members")?.to_string(),
                    visits: BTreeMap::new(),
                },
            );
        }
        debug!(
            count = self.subprojects.len(),
            file = INSTANCES_FILE,
            "loaded subprojects"
        );
        self.load_visits()
    }

    fn load_visits(&mut self) -> Result<()> {
        let path = self.schema_dir.join(INSVALUE_FILE);
        let rows = read_tsv_rows(&path)?;
        for row in &rows {
            let instance_id = require_column(row, &path, "instance_id")?;
            let index_raw = require_column(row, &path, "index")?;
            let index: u32 =
                index_raw
                    .parse()
                    .map_err(|_| SchemaError::InvalidNumber {
                        record_id: instance_id.to_string(),
                        column: "index",
                        value: index_raw.to_string(),
                    })?;
            let subproject = self.subprojects.get_mut(instance_id).ok_or_else(|| {
                SchemaError::SubprojectNotFound {
                    instance_id: instance_id.to_string(),
                }
            })?;
            subproject.visits.insert(
                index,
                Visit {
                    descript: require_column(row, &path, "descript")?.to_string(),
                    title: require_column(row, &path, "title")?.to_string(),
                },
            );
        }
        debug!(count = rows.len(), file = INSVALUE_FILE, "loaded visits");
        Ok(())
    }

    fn load_categories(&mut self) -> Result<()> {
        let path = self.schema_dir.join(CATEGORY_FILE);
        for row in &read_tsv_rows(&path)? {
            let category_id = require_column(row, &path, "category_id")?.to_string();
            self.categories.insert(
                category_id.clone(),
                Category {
                    category_id,
                    title: require_column(row, &path, "title")?.to_string(),
                    descript: require_column(row, &path, "descript")?.to_string(),
                    group_type: require_column(row, &path, "group_type")?.to_string(),
                    notes: require_column(row, &path, "notes")?.to_string(),
                    availability: require_column(row, &path, "availability")?.to_string(),
                    children: Vec::new(),
                },
            );
        }
        debug!(
            count = self.categories.len(),
            file = CATEGORY_FILE,
            "loaded categories"
        );
        self.populate_child_categories()
    }

    /// Build the category tree from the flat browse-edge table, then
    /// attach every parentless category to the root.
    ///
    /// The source edge table is known to omit edges for top-level
    /// categories; treating them as root children is a policy decision,
    /// not an error path. The parent lists are scratch state and are
    /// dropped once the orphans have been reattached.
    fn populate_child_categories(&mut self) -> Result<()> {
        let path = self.schema_dir.join(CATBROWSE_FILE);
        let mut parents: HashMap<String, Vec<String>> = HashMap::new();
        for row in &read_tsv_rows(&path)? {
            let parent_id = require_column(row, &path, "parent_id")?;
            let child_id = require_column(row, &path, "child_id")?;
            let parent = self.categories.get_mut(parent_id).ok_or_else(|| {
                SchemaError::CategoryNotFound {
                    category_id: parent_id.to_string(),
                }
            })?;
            parent.children.push(child_id.to_string());
            if !self.categories.contains_key(child_id) {
                return Err(SchemaError::CategoryNotFound {
                    category_id: child_id.to_string(),
                });
            }
            parents
                .entry(child_id.to_string())
                .or_default()
                .push(parent_id.to_string());
        }

        // Snapshot the id set before mutating the root's child list.
        let orphans: Vec<String> = self
            .categories
            .keys()
            .filter(|id| id.as_str() != ROOT_CATEGORY_ID && !parents.contains_key(*id))
            .cloned()
            .collect();
        let root = self.categories.get_mut(ROOT_CATEGORY_ID).ok_or_else(|| {
            SchemaError::CategoryNotFound {
                category_id: ROOT_CATEGORY_ID.to_string(),
            }
        })?;
        for orphan in &orphans {
            root.children.push(orphan.clone());
        }
        debug!(
            orphans = orphans.len(),
            file = CATBROWSE_FILE,
            "reconciled category tree"
        );
        Ok(())
    }

    fn load_fields(&mut self) -> Result<()> {
        let path = self.schema_dir.join(FIELD_FILE);
        for row in &read_tsv_rows(&path)? {
            let field = RawField {
                field_id: require_column(row, &path, "field_id")?.to_string(),
                title: require_column(row, &path, "title")?.to_string(),
                notes: require_column(row, &path, "notes")?.to_string(),
                debut: require_column(row, &path, "debut")?.to_string(),
                version: require_column(row, &path, "version")?.to_string(),
                strata: require_column(row, &path, "strata")?.to_string(),
                item_type: require_column(row, &path, "item_type")?.to_string(),
                availability: require_column(row, &path, "availability")?.to_string(),
                sexed: require_column(row, &path, "sexed")?.to_string(),
                base_type: require_column(row, &path, "base_type")?.to_string(),
                encoding_id: require_column(row, &path, "encoding_id")?.to_string(),
                instance_id: require_column(row, &path, "instance_id")?.to_string(),
                instanced: require_column(row, &path, "instanced")?.to_string(),
                instance_min: require_column(row, &path, "instance_min")?.to_string(),
                instance_max: require_column(row, &path, "instance_max")?.to_string(),
                item_count: require_column(row, &path, "item_count")?.to_string(),
                num_participants: require_column(row, &path, "num_participants")?.to_string(),
                value_type: require_column(row, &path, "value_type")?.to_string(),
                units: require_column(row, &path, "units")?.to_string(),
                main_category: require_column(row, &path, "main_category")?.to_string(),
            };
            self.field_index
                .insert(field.field_id.clone(), self.fields.len());
            self.fields.push(field);
        }
        debug!(count = self.fields.len(), file = FIELD_FILE, "loaded fields");
        Ok(())
    }

    fn build_category_fields_index(&mut self) {
        for field in &self.fields {
            let category_id = field.main_category.as_str();
            let position = match self.category_fields_index.get(category_id) {
                Some(&position) => position,
                None => {
                    let position = self.category_fields.len();
                    self.category_fields
                        .push((category_id.to_string(), Vec::new()));
                    self.category_fields_index
                        .insert(category_id.to_string(), position);
                    position
                }
            };
            self.category_fields[position].1.push(field.field_id.clone());
        }
        debug!(
            categories = self.category_fields.len(),
            "built category-fields index"
        );
    }

    /// Resolve one field into its enriched form: every coded attribute
    /// translated through the dictionaries, the encoding value table and
    /// category title attached, and the visit titles computed for the
    /// instance range `[instance_min, instance_max)`.
    pub fn get_field(&self, field_id: &str) -> Result<EnrichedField> {
        let field = self
            .field_index
            .get(field_id)
            .map(|&idx| &self.fields[idx])
            .ok_or_else(|| SchemaError::FieldNotFound {
                field_id: field_id.to_string(),
            })?;

        let subproject = self.subprojects.get(&field.instance_id).ok_or_else(|| {
            SchemaError::SubprojectNotFound {
                instance_id: field.instance_id.clone(),
            }
        })?;
        let instance_min = parse_instance_bound(field, "instance_min", &field.instance_min)?;
        let instance_max = parse_instance_bound(field, "instance_max", &field.instance_max)?;
        // A cohort with no visit record at an index is a valid gap, not
        // an error; the slot stays empty.
        let instances: Vec<Option<String>> = (instance_min..instance_max)
            .map(|x| subproject.visits.get(&x).map(|visit| visit.title.clone()))
            .collect();

        let encoding = self
            .encodings
            .get(&field.encoding_id)
            .ok_or_else(|| SchemaError::EncodingNotFound {
                encoding_id: field.encoding_id.clone(),
            })?
            .values
            .clone();

        let main_category = self
            .categories
            .get(&field.main_category)
            .ok_or_else(|| SchemaError::CategoryNotFound {
                category_id: field.main_category.clone(),
            })?
            .title
            .clone();

        Ok(EnrichedField {
            field_id: field.field_id.clone(),
            title: field.title.clone(),
            notes: field.notes.clone(),
            debut: field.debut.clone(),
            version: field.version.clone(),
            strata: Strata::from_code(&field.strata)?,
            item_type: ItemType::from_code(&field.item_type)?,
            availability: dictionaries::availability(&field.availability)?,
            sexed: Sexed::from_code(&field.sexed)?,
            encoded: dictionaries::BaseType::from_code(&field.base_type)?,
            encoding,
            instance_id: field.instance_id.clone(),
            instances,
            item_count: field.item_count.clone(),
            num_participants: field.num_participants.clone(),
            value_type: Some(ValueType::from_code(&field.value_type)?),
            units: field.units.clone(),
            main_category,
        })
    }

    /// Iterate every category that owns at least one field, paired with
    /// its enriched fields in source order.
    ///
    /// The sequence is recomputed on each traversal and follows the
    /// category→fields index order (source-row order of each category's
    /// first field).
    pub fn categories_with_fields(
        &self,
    ) -> impl Iterator<Item = Result<CategoryFields<'_>>> + '_ {
        self.category_fields.iter().map(|(category_id, field_ids)| {
            let fields = field_ids
                .iter()
                .map(|id| self.get_field(id))
                .collect::<Result<Vec<_>>>()?;
            Ok(CategoryFields {
                category_id: category_id.clone(),
                category: self.categories.get(category_id),
                fields,
            })
        })
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.get(category_id)
    }

    pub fn encoding(&self, encoding_id: &str) -> Option<&Encoding> {
        self.encodings.get(encoding_id)
    }

    pub fn subproject(&self, instance_id: &str) -> Option<&Subproject> {
        self.subprojects.get(instance_id)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

fn parse_instance_bound(field: &RawField, column: &'static str, value: &str) -> Result<u32> {
    value.parse().map_err(|_| SchemaError::InvalidNumber {
        record_id: field.field_id.clone(),
        column,
        value: value.to_string(),
    })
}
