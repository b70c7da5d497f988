///! Output formatting for CLI
///!
///! Every command prints through these helpers so table, JSON and YAML
///! output look the same everywhere.

use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            _ => OutputFormat::Table,
        }
    }
}

/// Print a list as a table of `R` rows, or serialize the raw items
pub fn print_list<T, R>(items: Vec<T>, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize,
    R: Tabled + From<T>,
{
    match format {
        OutputFormat::Table => print_table(items.into_iter().map(R::from).collect::<Vec<R>>()),
        OutputFormat::Json => print_json(&items)?,
        OutputFormat::Yaml => print_yaml(&items)?,
    }
    Ok(())
}

/// Serialize a single item; returns `false` when the caller should render
/// its own table view
pub fn print_structured<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<bool> {
    match format {
        OutputFormat::Table => return Ok(false),
        OutputFormat::Json => print_json(data)?,
        OutputFormat::Yaml => print_yaml(data)?,
    }
    Ok(true)
}

/// Print data as a table using the tabled crate
pub fn print_table<T: Tabled>(data: Vec<T>) {
    if data.is_empty() {
        println!("{}", "No results found".yellow());
        return;
    }

    let table = Table::new(data);
    println!("{}", table);
}

pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

pub fn print_yaml<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    println!("{}", yaml);
    Ok(())
}

/// Print a success message with green checkmark
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_deleted(resource_type: &str, id: &str) {
    println!(
        "{} {} '{}' deleted",
        "✓".green().bold(),
        resource_type.green(),
        id.green().bold()
    );
}

/// Print an error message with red X
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Warnings go to stderr so they never mix into `-o json`/`-o yaml` output
pub fn print_warning(message: &str) {
    let _ = write_warning(&mut std::io::stderr().lock(), message);
}

fn write_warning(out: &mut impl std::io::Write, message: &str) -> std::io::Result<()> {
    writeln!(out, "{} {}", "⚠".yellow().bold(), message.yellow())
}

/// Labelled detail line, blank values shown as N/A
pub fn print_field(label: &str, value: &str) {
    let value = if value.trim().is_empty() { "N/A" } else { value };
    println!("  {:<28} {}", format!("{}:", label).dimmed(), value);
}

/// Horizontal bar scaled to `fraction` of `width` cells
pub fn bar(fraction: f64, width: usize) -> String {
    let cells = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    "█".repeat(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("yml"), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_str("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("anything"), OutputFormat::Table);
    }

    #[test]
    fn test_warning_is_one_line_on_the_given_writer() {
        let mut buf = Vec::new();
        write_warning(&mut buf, "config unreadable, using defaults").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("config unreadable, using defaults"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar(1.0, 10).chars().count(), 10);
        assert_eq!(bar(0.5, 10).chars().count(), 5);
        assert_eq!(bar(0.0, 10), "");
        assert_eq!(bar(3.0, 4).chars().count(), 4);
    }
}
