//! Integration tests for the schema repository, against a small fixture
//! schema directory written with the showcase file layout.

use std::path::Path;

use tempfile::TempDir;

use ukb_model::{ItemType, Sexed, Strata, ValueType};
use ukb_schema::{SchemaError, SchemaRepository};

const FIELD_HEADER: &str = "field_id\ttitle\tnotes\tdebut\tversion\tstrata\titem_type\t\
availability\tsexed\tbase_type\tencoding_id\tinstance_id\tinstanced\tinstance_min\t\
instance_max\titem_count\tnum_participants\tvalue_type\tunits\tmain_category";

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write fixture file");
}

/// Lay down a minimal but complete schema directory:
/// - two cohort visits at indices 0 and 2 (index 1 is a gap)
/// - categories 100 and 200 with no parent edge, 101 under 100
/// - an integer field in category 101 and a categorical field in 100
fn fixture_schema() -> TempDir {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = tmp.path();

    write(dir, "2-encoding.txt", "encoding_id\ttitle\n0\t\n100\tYes/No\n");
    write(
        dir,
        "5-esimpint.txt",
        "encoding_id\tvalue\tmeaning\n100\t1\tYes\n100\t2\tNo\n",
    );
    for file in [
        "6-esimpstring.txt",
        "7-esimpreal.txt",
        "8-esimpdate.txt",
        "11-ehierint.txt",
        "12-ehierstring.txt",
    ] {
        write(dir, file, "encoding_id\tvalue\tmeaning\n");
    }

    write(
        dir,
        "9-instances.txt",
        "instance_id\tdescript\tnum_members\n2\tMain cohort\t500000\n",
    );
    write(
        dir,
        "10-insvalue.txt",
        "instance_id\tindex\tdescript\ttitle\n\
         2\t0\tInitial assessment\tBaseline\n\
         2\t2\tImaging assessment\tImaging\n",
    );

    write(
        dir,
        "3-category.txt",
        "category_id\ttitle\tdescript\tgroup_type\tnotes\tavailability\n\
         0\tRoot\t\t0\t\t0\n\
         100\tPopulation characteristics\tWho took part\t0\t\t0\n\
         101\tBaseline characteristics\tMeasured at recruitment\t0\tSelf reported\t0\n\
         200\tGenomics\t\t0\t\t0\n",
    );
    write(dir, "13-catbrowse.txt", "parent_id\tchild_id\n100\t101\n");

    write(
        dir,
        "1-field.txt",
        &format!(
            "{FIELD_HEADER}\n\
             21022\tAge at recruitment\t\t2009-01-01\t1\t0\t0\t0\t0\t0\t0\t2\t1\t0\t3\t1\t500000\t11\tyears\t101\n\
             31\tSex\t\t2009-01-01\t1\t0\t0\t0\t0\t11\t100\t2\t0\t0\t1\t1\t500000\t21\t\t100\n"
        ),
    );

    tmp
}

#[test]
fn enriches_field_attributes() {
    let tmp = fixture_schema();
    let repo = SchemaRepository::load(tmp.path()).expect("load repository");

    let field = repo.get_field("21022").expect("get field");
    assert_eq!(field.field_id, "21022");
    assert_eq!(field.strata, Strata::Primary);
    assert_eq!(field.item_type, ItemType::Data);
    assert!(field.availability);
    assert_eq!(field.sexed, Sexed::Both);
    assert_eq!(field.value_type, Some(ValueType::Integer));
    assert_eq!(field.units, "years");
    assert_eq!(field.main_category, "Baseline characteristics");
    assert!(field.encoding.is_empty());
}

#[test]
fn instance_range_resolves_visit_titles_with_gaps() {
    let tmp = fixture_schema();
    let repo = SchemaRepository::load(tmp.path()).expect("load repository");

    // instance_min=0, instance_max=3, visits exist at 0 and 2 only
    let field = repo.get_field("21022").expect("get field");
    assert_eq!(
        field.instances,
        vec![Some("Baseline".to_string()), None, Some("Imaging".to_string())]
    );

    // instance_max is exclusive: [0, 1) yields a single entry
    let field = repo.get_field("31").expect("get field");
    assert_eq!(field.instances, vec![Some("Baseline".to_string())]);
}

#[test]
fn categorical_field_carries_encoding_values_in_order() {
    let tmp = fixture_schema();
    let repo = SchemaRepository::load(tmp.path()).expect("load repository");

    let field = repo.get_field("31").expect("get field");
    assert_eq!(field.value_type, Some(ValueType::CategoricalSingle));
    let pairs: Vec<(&str, &str)> = field
        .encoding
        .iter()
        .map(|v| (v.value.as_str(), v.meaning.as_str()))
        .collect();
    assert_eq!(pairs, vec![("1", "Yes"), ("2", "No")]);
}

#[test]
fn duplicate_encoding_value_keeps_position_last_meaning_wins() {
    let tmp = fixture_schema();
    // Same encoding and value key as 5-esimpint.txt, later file
    write(
        tmp.path(),
        "11-ehierint.txt",
        "encoding_id\tvalue\tmeaning\n100\t1\tYes (revised)\n",
    );
    let repo = SchemaRepository::load(tmp.path()).expect("load repository");

    let field = repo.get_field("31").expect("get field");
    let pairs: Vec<(&str, &str)> = field
        .encoding
        .iter()
        .map(|v| (v.value.as_str(), v.meaning.as_str()))
        .collect();
    assert_eq!(pairs, vec![("1", "Yes (revised)"), ("2", "No")]);
}

#[test]
fn non_numeric_visit_index_is_fatal() {
    let tmp = fixture_schema();
    write(
        tmp.path(),
        "10-insvalue.txt",
        "instance_id\tindex\tdescript\ttitle\n2\tfirst\tInitial assessment\tBaseline\n",
    );
    let err = SchemaRepository::load(tmp.path()).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidNumber { .. }));
    assert_eq!(
        err.to_string(),
        "invalid number in index for record 2: \"first\""
    );
}

#[test]
fn unknown_field_id_is_an_error() {
    let tmp = fixture_schema();
    let repo = SchemaRepository::load(tmp.path()).expect("load repository");
    let err = repo.get_field("99999").unwrap_err();
    assert!(matches!(err, SchemaError::FieldNotFound { .. }));
}

#[test]
fn parentless_categories_attach_to_root() {
    let tmp = fixture_schema();
    let repo = SchemaRepository::load(tmp.path()).expect("load repository");

    let root = repo.category("0").expect("root category");
    assert!(root.children.contains(&"100".to_string()));
    assert!(root.children.contains(&"200".to_string()));
    // 101 has a recorded parent edge and must not be reattached
    assert!(!root.children.contains(&"101".to_string()));

    let parent = repo.category("100").expect("category 100");
    assert_eq!(parent.children, vec!["101".to_string()]);
}

#[test]
fn categories_with_fields_follows_field_row_order() {
    let tmp = fixture_schema();
    let repo = SchemaRepository::load(tmp.path()).expect("load repository");

    let groups: Vec<_> = repo
        .categories_with_fields()
        .collect::<Result<Vec<_>, _>>()
        .expect("collect groups");
    assert_eq!(groups.len(), 2);
    // 21022 (category 101) appears before 31 (category 100) in the field file
    assert_eq!(
        groups[0].category.map(|c| c.category_id.as_str()),
        Some("101")
    );
    assert_eq!(groups[0].fields[0].field_id, "21022");
    assert_eq!(
        groups[1].category.map(|c| c.category_id.as_str()),
        Some("100")
    );

    // the sequence is re-iterable
    assert_eq!(repo.categories_with_fields().count(), 2);
}

#[test]
fn missing_source_file_is_fatal() {
    let tmp = fixture_schema();
    std::fs::remove_file(tmp.path().join("13-catbrowse.txt")).expect("remove edge file");
    let err = SchemaRepository::load(tmp.path()).unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
}

#[test]
fn unknown_dictionary_code_propagates() {
    let tmp = fixture_schema();
    write(
        tmp.path(),
        "1-field.txt",
        &format!(
            "{FIELD_HEADER}\n\
             50\tBad strata\t\t\t1\t9\t0\t0\t0\t0\t0\t2\t0\t0\t1\t1\t1\t11\t\t100\n"
        ),
    );
    let repo = SchemaRepository::load(tmp.path()).expect("load repository");
    let err = repo.get_field("50").unwrap_err();
    assert!(matches!(err, SchemaError::Model(_)));
}

#[test]
fn missing_encoding_id_is_an_error() {
    let tmp = fixture_schema();
    write(
        tmp.path(),
        "1-field.txt",
        &format!(
            "{FIELD_HEADER}\n\
             60\tNo such encoding\t\t\t1\t0\t0\t0\t0\t11\t555\t2\t0\t0\t1\t1\t1\t21\t\t100\n"
        ),
    );
    let repo = SchemaRepository::load(tmp.path()).expect("load repository");
    let err = repo.get_field("60").unwrap_err();
    assert!(matches!(err, SchemaError::EncodingNotFound { .. }));
}
