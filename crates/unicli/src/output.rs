//! Output formatting: plain, table, JSON, YAML.
//!
//! Renders data in the format selected by `--output`. Plain emits one
//! line per record, table uses `tabled`, structured formats use serde.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable records in the chosen format.
///
/// - `plain`: calls `line_fn` on each item, one line per record
/// - `table`: maps each item through `to_row` and builds a rounded table
/// - `json` / `json-compact` / `yaml`: serializes the records as decoded
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    line_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Plain => Ok(data.iter().map(line_fn).collect::<Vec<_>>().join("\n")),
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Render a raw controller reply.
///
/// Text formats print the body exactly as received; structured formats
/// parse it and serialize it again.
pub fn render_reply(format: OutputFormat, body: &str) -> Result<String, CliError> {
    match format {
        OutputFormat::Plain | OutputFormat::Table => Ok(body.to_owned()),
        structured => {
            let value: serde_json::Value = serde_json::from_str(body)?;
            match structured {
                OutputFormat::Yaml => render_yaml(&value),
                other => render_json(&value, other == OutputFormat::JsonCompact),
            }
        }
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Item {
        name: &'static str,
        count: u32,
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "Name")]
        name: String,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                name: "office",
                count: 3,
            },
            Item {
                name: "lobby",
                count: 0,
            },
        ]
    }

    fn render(format: OutputFormat) -> String {
        render_list(
            format,
            &items(),
            |i| ItemRow {
                name: i.name.into(),
            },
            |i| format!("{} {}", i.name, i.count),
        )
        .unwrap()
    }

    #[test]
    fn plain_is_one_line_per_record() {
        assert_eq!(render(OutputFormat::Plain), "office 3\nlobby 0");
    }

    #[test]
    fn table_has_header_and_rows() {
        let table = render(OutputFormat::Table);
        assert!(table.contains("Name"));
        assert!(table.contains("office"));
        assert!(table.contains("lobby"));
    }

    #[test]
    fn compact_json_serializes_records() {
        assert_eq!(
            render(OutputFormat::JsonCompact),
            r#"[{"name":"office","count":3},{"name":"lobby","count":0}]"#
        );
    }

    #[test]
    fn empty_list_renders_nothing_in_plain() {
        let out = render_list(
            OutputFormat::Plain,
            &Vec::<Item>::new(),
            |i| ItemRow {
                name: i.name.into(),
            },
            |i| i.name.to_string(),
        )
        .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn reply_is_verbatim_in_plain() {
        let body = r#"{"meta":{"rc":"ok"},"data":[]}"#;
        assert_eq!(render_reply(OutputFormat::Plain, body).unwrap(), body);
        assert_eq!(render_reply(OutputFormat::Table, body).unwrap(), body);
    }

    #[test]
    fn reply_is_reserialized_in_structured_formats() {
        let body = "{ \"meta\": { \"rc\": \"ok\" } }";
        assert_eq!(
            render_reply(OutputFormat::JsonCompact, body).unwrap(),
            r#"{"meta":{"rc":"ok"}}"#
        );
        assert_eq!(
            render_reply(OutputFormat::Yaml, body).unwrap(),
            "meta:\n  rc: ok\n"
        );
    }
}
