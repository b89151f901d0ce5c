//! Validation command handler

use super::utils::{load_document, load_schema, schema_name};
use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{DocumentReport, OutputWriter, ValidationReport};
use bundlekit_schemas::{ConstraintValidator, SchemaValidator};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
///
/// Every document is validated and reported before the command fails, so
/// one run shows all problems of all files.
#[instrument(skip_all, fields(files = args.files.len(), detailed = args.detailed))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("validate_command");

    let files = if args.files.is_empty() {
        vec![config.validation.descriptor_file.clone()]
    } else {
        args.files
    };
    let schema_file: Option<PathBuf> = args.schema.or_else(|| config.validation.schema_file.clone());

    let schema = {
        let _schema_timer = Timer::new("schema_loading");
        load_schema(schema_file.as_deref())?
    };
    let validator = ConstraintValidator::new(schema);
    let mut report = ValidationReport::new(schema_name(validator.schema()));
    info!(schema = %report.schema, "Validating {} document(s)", files.len());

    for file in files {
        output.info(&format!("Validating {}", file.display()))?;
        let document = load_document(&file)?;

        let errors = {
            let _validation_timer = Timer::with_details("schema_validation", &file.display().to_string());
            validator.collect_errors(&document)
        };
        debug!(file = %file.display(), errors = errors.len(), "Document validated");

        if args.detailed && output.format() == OutputFormat::Human {
            output.section(&format!("Document {}", file.display()))?;
            output.redacted_data(&document)?;
        }

        let mut entry = DocumentReport::new(file, errors);
        if args.detailed && output.format() != OutputFormat::Human {
            entry = entry.with_document(&document);
        }
        report.documents.push(entry);
    }

    if args.detailed && output.format() == OutputFormat::Human {
        output.section("Results")?;
    }
    output.validation_report(&report)?;

    if report.is_valid() {
        info!("All documents are valid");
        Ok(())
    } else {
        let count = report.error_count();
        warn!(errors = count, "Validation failed");
        Err(Error::ValidationFailed { count })
    }
}
