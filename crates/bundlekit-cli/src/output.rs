//! Output formatting and writing utilities
//!
//! Results go to stdout in the selected format: human-readable text, or a
//! serialized form (JSON, pretty JSON, YAML) for machines. Status messages
//! are only printed in human mode so machine output stays parseable.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use bundlekit_schemas::{ValidationError, ValidationErrors};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, trace};

/// Validation outcome for one document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Document that was validated
    pub file: PathBuf,
    /// Whether the document satisfied its schema
    pub valid: bool,
    /// Every error found, in document order
    pub errors: Vec<ValidationError>,
    /// The document itself with secrets masked, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Value>,
}

impl DocumentReport {
    pub fn new(file: PathBuf, errors: ValidationErrors) -> Self {
        Self {
            file,
            valid: errors.is_empty(),
            errors: errors.errors,
            document: None,
        }
    }

    /// Attach a redacted copy of the validated document
    pub fn with_document(mut self, document: &Value) -> Self {
        let mut redacted = document.clone();
        redaction::redact_json_value(&mut redacted);
        self.document = Some(redacted);
        self
    }
}

/// Outcome of one `validate` run over any number of documents
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Name of the schema the documents were validated against
    pub schema: String,
    pub checked_at: DateTime<Utc>,
    pub documents: Vec<DocumentReport>,
}

impl ValidationReport {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            checked_at: Utc::now(),
            documents: Vec::new(),
        }
    }

    /// Total number of errors across all documents
    pub fn error_count(&self) -> usize {
        self.documents.iter().map(|d| d.errors.len()).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.documents.iter().all(|d| d.valid)
    }
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation report; `max_errors` caps the human listing (0 = all)
    fn format_validation_report(&self, report: &ValidationReport, max_errors: usize) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_validation_report(&self, report: &ValidationReport, max_errors: usize) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_report_human(report, max_errors)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    max_errors: usize,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            quiet,
            max_errors: 0,
            writer,
        }
    }

    /// Cap the number of errors listed per document in human output
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        // YAML already ends with a newline
        if self.format == OutputFormat::Yaml {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write a document with secrets masked
    pub fn redacted_data(&mut self, value: &Value) -> Result<()> {
        let mut redacted = value.clone();
        redaction::redact_json_value(&mut redacted);
        self.data(&redacted)
    }

    /// Write a validation report
    pub fn validation_report(&mut self, report: &ValidationReport) -> Result<()> {
        if self.is_human() && self.use_color {
            let formatted = format_validation_report_colored(report, self.max_errors);
            return self.write(&formatted);
        }

        let formatted = self.format.format_validation_report(report, self.max_errors)?;
        if self.is_human() {
            self.write(&formatted)
        } else {
            self.writeln(formatted.trim_end())
        }
    }
}

/// Format a validation report for human reading
fn format_validation_report_human(report: &ValidationReport, max_errors: usize) -> String {
    render_report(report, max_errors, |document, header| {
        if document.valid {
            format!("✓ {}", header)
        } else {
            format!("✗ {}", header)
        }
    }, |line| line.to_string())
}

fn format_validation_report_colored(report: &ValidationReport, max_errors: usize) -> String {
    render_report(report, max_errors, |document, header| {
        if document.valid {
            format!("✓ {}", header).green().to_string()
        } else {
            format!("✗ {}", header).red().bold().to_string()
        }
    }, |line| line.dimmed().to_string())
}

fn render_report(
    report: &ValidationReport,
    max_errors: usize,
    header: impl Fn(&DocumentReport, &str) -> String,
    note: impl Fn(&str) -> String,
) -> String {
    let mut output = String::new();

    for document in &report.documents {
        let title = if document.valid {
            format!("{} is valid", document.file.display())
        } else {
            format!("{}: {} validation error(s)", document.file.display(), document.errors.len())
        };
        output.push_str(&header(document, &title));
        output.push('\n');

        output.push_str(&format_errors_human(&document.errors, max_errors));
        if max_errors > 0 && document.errors.len() > max_errors {
            let hidden = document.errors.len() - max_errors;
            output.push_str(&note(&format!("  ... and {} more error(s)", hidden)));
            output.push('\n');
        }
    }

    if report.documents.len() > 1 {
        let invalid = report.documents.iter().filter(|d| !d.valid).count();
        output.push_str(&note(&format!(
            "{} document(s) checked, {} invalid, {} error(s) in total",
            report.documents.len(),
            invalid,
            report.error_count()
        )));
        output.push('\n');
    }

    output
}

/// Numbered `path: message` lines, at most `max_errors` of them (0 = all)
fn format_errors_human(errors: &[ValidationError], max_errors: usize) -> String {
    let shown = if max_errors == 0 { errors.len() } else { max_errors.min(errors.len()) };

    errors
        .iter()
        .take(shown)
        .enumerate()
        .map(|(i, error)| format!("  {}. {}\n", i + 1, error))
        .collect()
}

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
