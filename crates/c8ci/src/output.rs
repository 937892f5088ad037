//! Output formatting for the summary document: JSON, compact JSON, YAML.
//!
//! Only the summary and the CI mask directive go to stdout; logs go to stderr.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render a serde-serializable document in the chosen format.
pub fn render<T: Serialize + ?Sized>(format: OutputFormat, data: &T) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
    })
}

/// Print rendered output to stdout with a single trailing newline.
pub fn print_output(output: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end_matches('\n'))?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Doc {
        status: &'static str,
        count: u32,
    }

    const DOC: Doc = Doc {
        status: "success",
        count: 2,
    };

    #[test]
    fn json_is_pretty_by_default() {
        assert_eq!(
            render(OutputFormat::Json, &DOC).unwrap(),
            "{\n  \"status\": \"success\",\n  \"count\": 2\n}"
        );
    }

    #[test]
    fn compact_json_is_single_line() {
        assert_eq!(
            render(OutputFormat::JsonCompact, &DOC).unwrap(),
            r#"{"status":"success","count":2}"#
        );
    }

    #[test]
    fn yaml_output() {
        assert_eq!(
            render(OutputFormat::Yaml, &DOC).unwrap(),
            "status: success\ncount: 2\n"
        );
    }
}
