//! Output formatters for CLI commands.
//!
//! Every command reports through [`format_output`], so `--format` behaves
//! the same for `stat` and `digest`.

use anyhow::Result;
use colored::Colorize;
use mockfs_core::cli::OutputFormat;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use mockfs_cli::formatters::format_output;
/// use mockfs_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Entry {
///     path: String,
///     size: u64,
/// }
///
/// let entry = Entry { path: "/a.txt".to_string(), size: 1024 };
///
/// let output = format_output(&entry, OutputFormat::Json)?;
/// assert!(output.contains("\"path\""));
///
/// let output = format_output(&entry, OutputFormat::Text)?;
/// assert_eq!(output, "path: /a.txt\nsize: 1024");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format data as compact single-line JSON.
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize};
    use serde_json::Value;

    /// Format data as `key: value` lines.
    ///
    /// Objects print one field per line; arrays print one element per line
    /// separated by a blank line. Nested values print as compact JSON.
    /// Suitable for `grep` and `cut`.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(match &value {
            Value::Array(items) => items
                .iter()
                .map(format_value)
                .collect::<Vec<_>>()
                .join("\n\n"),
            other => format_value(other),
        })
    }

    fn format_value(value: &Value) -> String {
        match value {
            Value::Object(fields) => fields
                .iter()
                .map(|(key, val)| format!("{key}: {}", scalar(val)))
                .collect::<Vec<_>>()
                .join("\n"),
            other => scalar(other),
        }
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Format data as colorized, indented output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&mut out, &value, 0);
        Ok(out)
    }

    fn write_value(out: &mut String, value: &Value, indent: usize) {
        match value {
            Value::Null => out.push_str(&"-".dimmed().to_string()),
            Value::Bool(b) => out.push_str(&b.to_string().yellow().to_string()),
            Value::Number(n) => out.push_str(&n.to_string().cyan().to_string()),
            Value::String(s) => out.push_str(&s.green().to_string()),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    out.push_str(&"  ".repeat(indent));
                    out.push_str(&"-".dimmed().to_string());
                    out.push('\n');
                    write_value(out, item, indent + 1);
                }
            }
            Value::Object(fields) => {
                for (i, (key, val)) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    out.push_str(&"  ".repeat(indent));
                    out.push_str(&key.blue().bold().to_string());
                    out.push(':');
                    if matches!(val, Value::Object(_) | Value::Array(_)) {
                        out.push('\n');
                        write_value(out, val, indent + 1);
                    } else {
                        out.push(' ');
                        write_value(out, val, indent);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Entry {
        path: String,
        size: u64,
        directory: bool,
    }

    fn entry() -> Entry {
        Entry {
            path: "/a.txt".to_string(),
            size: 42,
            directory: false,
        }
    }

    #[test]
    fn test_json_format() {
        let output = json::format(&entry()).unwrap();
        assert!(output.contains("\"path\": \"/a.txt\""));
        assert!(output.contains("\"size\": 42"));
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_json_format_compact() {
        let output = json::format_compact(&entry()).unwrap();
        assert!(!output.contains('\n'));
        assert!(output.contains("\"path\":\"/a.txt\""));
    }

    #[test]
    fn test_text_format_object() {
        let output = text::format(&entry()).unwrap();
        assert_eq!(output, "directory: false\npath: /a.txt\nsize: 42");
    }

    #[test]
    fn test_text_format_array() {
        let output = text::format(&vec![entry(), entry()]).unwrap();
        assert_eq!(output.matches("path: /a.txt").count(), 2);
        assert!(output.contains("\n\n"));
    }

    #[test]
    fn test_pretty_format() {
        colored::control::set_override(false);
        let output = pretty::format(&entry()).unwrap();
        assert!(output.contains("path: /a.txt"));
        assert!(output.contains("size: 42"));
    }

    #[test]
    fn test_format_output_dispatch() {
        assert!(format_output(&entry(), OutputFormat::Json).unwrap().starts_with('{'));
        assert!(format_output(&entry(), OutputFormat::Text).unwrap().starts_with("directory"));
        assert!(format_output(&entry(), OutputFormat::Pretty).unwrap().contains("path"));
    }
}
