//! Schema command handler

use super::utils::{load_schema, schema_name};
use crate::cli::SchemaArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use tracing::{info, instrument};

/// Print the compiled schema in the selected output format
#[instrument(skip_all, fields(definition = ?args.definition))]
pub fn handle_schema(args: SchemaArgs, output: &mut OutputWriter) -> Result<()> {
    let schema = load_schema(args.definition.as_deref())?;
    info!(schema = schema_name(&schema), fields = schema.fields().len(), "Schema compiled");

    output.data(&*schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::error::Error;
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::path::PathBuf;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Capture(Rc<RefCell<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_builtin_schema_as_json() {
        let capture = Capture::default();
        let mut output = OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(capture.clone()));

        handle_schema(SchemaArgs { definition: None }, &mut output).unwrap();

        let printed: serde_json::Value = serde_json::from_slice(&capture.0.borrow()).unwrap();
        assert_eq!(printed["name"], "bundle");
        let fields = printed["fields"].as_array().unwrap();
        assert_eq!(fields[0]["name"], "name");
        assert!(fields.iter().any(|f| f["name"] == "microfrontends"));
    }

    #[test]
    fn test_unreadable_definition() {
        let mut output = OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(io::sink()));
        let result = handle_schema(
            SchemaArgs {
                definition: Some(PathBuf::from("missing/schema.yaml")),
            },
            &mut output,
        );
        assert!(matches!(result, Err(Error::Schema(_))));
    }
}
