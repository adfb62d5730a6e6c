//! Output formatting utilities.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use fundscope_ext_file::{to_csv_string, to_json_string, write_report};
use fundscope_holdings::RecordColumns;

use crate::cli::OutputFormat;

/// Where and how a command's report goes.
#[derive(Debug, Clone)]
pub struct Output<'a> {
    /// Requested format.
    pub format: OutputFormat,
    /// File to write instead of stdout.
    pub path: Option<&'a Path>,
    /// Suppress non-essential messages.
    pub quiet: bool,
}

impl Output<'_> {
    /// Emits a list of records.
    ///
    /// `records` feed CSV and JSON; `rows` are the table view.
    pub fn emit<R, T>(&self, title: &str, records: &[R], rows: &[T]) -> Result<()>
    where
        R: Serialize + RecordColumns,
        T: Tabled,
    {
        match (self.format, self.path) {
            (OutputFormat::Table, None) => {
                if !self.quiet {
                    print_header(title);
                }
                print_table(rows);
                Ok(())
            }
            (OutputFormat::Json, _) => self.deliver(&to_json_string(records)?),
            (OutputFormat::Csv | OutputFormat::Table, _) => self.deliver(&to_csv_string(records)?),
        }
    }

    /// Emits an arbitrary serializable value as JSON, or its rendered CSV.
    pub fn emit_document<T: Serialize + ?Sized>(&self, value: &T, csv: Option<String>) -> Result<()> {
        match (self.format, csv) {
            (OutputFormat::Json, _) | (_, None) => self.deliver(&to_json_string(value)?),
            (_, Some(csv)) => self.deliver(&csv),
        }
    }

    /// Prints rendered text, or writes it to the output file.
    pub fn deliver(&self, contents: &str) -> Result<()> {
        match self.path {
            Some(path) => {
                write_report(path, contents)?;
                if !self.quiet {
                    print_success(&format!("Wrote {}", path.display()));
                }
            }
            None => {
                print!("{contents}");
                if !contents.ends_with('\n') && !contents.is_empty() {
                    println!();
                }
            }
        }
        Ok(())
    }

    /// True when the report is a table on stdout.
    pub fn is_table(&self) -> bool {
        self.format == OutputFormat::Table && self.path.is_none()
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
}

/// Prints a grid with a header row, first column left-aligned.
pub fn print_grid(header: Vec<String>, rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        println!("No results.");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(header);
    for row in rows {
        builder.push_record(row);
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
}

/// Formats an average % AUM, or a dash when no row carried one.
pub fn format_aum(value: f64, has_data: bool) -> String {
    if has_data {
        format!("{value:.2}%")
    } else {
        "-".to_string()
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Setting")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl RecordColumns for KeyValue {
    const COLUMNS: &'static [&'static str] = &["key", "value"];
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
