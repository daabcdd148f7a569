//! Command drivers: the thin wrapper around the transformation core.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use ukb_linst::{InstrumentDescriptor, LinstError};
use ukb_schema::{SchemaRepository, load_schema_index, missing_files};

use crate::cli::{CheckArgs, ConvertArgs};
use crate::types::{CheckResult, ConvertResult, InstrumentSummary};

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let schema_dir = &args.schema_dir;
    let span = info_span!("convert", schema_dir = %schema_dir.display());
    let _guard = span.enter();

    let load_start = Instant::now();
    let repository = SchemaRepository::load(schema_dir)
        .with_context(|| format!("load schema from {}", schema_dir.display()))?;
    info!(
        fields = repository.field_count(),
        categories = repository.category_count(),
        duration_ms = load_start.elapsed().as_millis(),
        "schema loaded"
    );

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| schema_dir.join("linst"));
    if !args.dry_run {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("create output dir {}", output_dir.display()))?;
    }

    let mut instruments = Vec::new();
    let mut skipped = Vec::new();
    for group in repository.categories_with_fields() {
        let group = group.context("enrich category fields")?;
        let Some(category) = group.category else {
            // Fields can reference a category id absent from the
            // category table; there is nothing to title the instrument
            // with, so the group is reported and skipped.
            warn!(
                category = %group.category_id,
                fields = group.fields.len(),
                "no category record, skipping"
            );
            skipped.push(group.category_id);
            continue;
        };
        if !args.categories.is_empty() && !args.categories.contains(&category.category_id) {
            continue;
        }

        let field_count = group.fields.len();
        let instrument = match InstrumentDescriptor::new(category, group.fields) {
            Ok(instrument) => instrument,
            Err(error @ LinstError::MissingTitle { .. }) => {
                // A category record with an empty title cannot head an
                // instrument; the fields themselves are fine, so the
                // group is reported and skipped rather than aborting
                // the whole conversion.
                warn!(
                    category = %category.category_id,
                    fields = field_count,
                    %error,
                    "category header fails validation, skipping"
                );
                skipped.push(category.category_id.clone());
                continue;
            }
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("build instrument for category {}", category.category_id)
                });
            }
        };
        let lines = instrument
            .as_linst()
            .with_context(|| format!("render instrument for category {}", category.category_id))?;
        let table_name = instrument.table_name();

        let path = if args.dry_run {
            None
        } else {
            let path = output_dir.join(format!("{table_name}.linst"));
            std::fs::write(&path, lines.concat())
                .with_context(|| format!("write {}", path.display()))?;
            debug!(path = %path.display(), lines = lines.len(), "wrote instrument");
            Some(path)
        };

        instruments.push(InstrumentSummary {
            category_id: category.category_id.clone(),
            title: instrument.title(),
            table_name,
            field_count,
            line_count: lines.len(),
            path,
        });
    }

    info!(
        instruments = instruments.len(),
        skipped = skipped.len(),
        "conversion complete"
    );
    Ok(ConvertResult {
        output_dir,
        instruments,
        skipped,
        dry_run: args.dry_run,
    })
}

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    check_schema_dir(&args.schema_dir)
}

pub fn check_schema_dir(schema_dir: &Path) -> Result<CheckResult> {
    let docs = load_schema_index(schema_dir)
        .with_context(|| format!("load schema index from {}", schema_dir.display()))?;
    let missing = missing_files(&docs, schema_dir);
    for path in &missing {
        warn!(path = %path.display(), "indexed schema file is missing");
    }
    Ok(CheckResult {
        indexed: docs.len(),
        missing,
    })
}
