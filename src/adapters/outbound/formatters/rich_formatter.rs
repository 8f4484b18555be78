use crate::ports::outbound::DiffFormatter;
use crate::shared::Result;
use crate::vulnerability_diff::domain::PackageChanges;
use owo_colors::{OwoColorize, Style};

const TABLE_TITLE: &str = "Vulnerability Differences";
const TABLE_HEADERS: [&str; 5] = [
    "CVE ID",
    "Package",
    "Previous Version",
    "New Version",
    "Status",
];
const EMPTY_SUMMARY: &str = "No vulnerabilities found";

/// RichFormatter adapter for human-readable terminal output
///
/// Fixed identifiers render as a titled list; per-package changes render as
/// a column-aligned table. ANSI colours are only emitted when enabled.
pub struct RichFormatter {
    colored: bool,
}

impl RichFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.colored {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn column_styles() -> [Style; 5] {
        [
            Style::new().cyan(),
            Style::new().magenta(),
            Style::new().red(),
            Style::new().green(),
            Style::new().yellow(),
        ]
    }

    fn render_row(&self, cells: &[&str; 5], widths: &[usize; 5], styles: &[Style; 5]) -> String {
        let rendered: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(styles)
            .map(|((cell, &width), style)| self.paint(&format!("{:<width$}", cell), *style))
            .collect();
        format!("│ {} │", rendered.join(" │ "))
    }

    fn render_rule(widths: &[usize; 5], left: &str, middle: &str, right: &str) -> String {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(middle), right)
    }
}

impl Default for RichFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl DiffFormatter for RichFormatter {
    fn format_fixed(&self, identifiers: &[String]) -> Result<String> {
        if identifiers.is_empty() {
            return Ok(format!(
                "{}\n",
                self.paint(EMPTY_SUMMARY, Style::new().green())
            ));
        }

        let title = format!("Fixed Vulnerabilities ({} total)", identifiers.len());
        let mut output = String::new();
        output.push_str(&self.paint(&title, Style::new().cyan().bold()));
        output.push('\n');
        output.push_str(&self.paint(&"─".repeat(title.chars().count()), Style::new().cyan()));
        output.push('\n');
        for identifier in identifiers {
            output.push_str("  • ");
            output.push_str(&self.paint(identifier, Style::new().red().bold()));
            output.push('\n');
        }
        Ok(output)
    }

    fn format_changes(&self, changes: &PackageChanges) -> Result<String> {
        let rows: Vec<[&str; 5]> = changes
            .iter()
            .flat_map(|(identifier, records)| {
                records.iter().map(move |change| {
                    [
                        identifier.as_str(),
                        change.package_name(),
                        change.previous_version(),
                        change.new_version(),
                        if change.is_removed() {
                            "Removed"
                        } else {
                            "Updated"
                        },
                    ]
                })
            })
            .collect();

        let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header_styles = [Style::new().bold(); 5];
        let column_styles = Self::column_styles();

        let mut lines = vec![
            self.paint(TABLE_TITLE, Style::new().italic()),
            Self::render_rule(&widths, "┌", "┬", "┐"),
            self.render_row(&TABLE_HEADERS, &widths, &header_styles),
            Self::render_rule(&widths, "├", "┼", "┤"),
        ];
        for row in &rows {
            lines.push(self.render_row(row, &widths, &column_styles));
        }
        lines.push(Self::render_rule(&widths, "└", "┴", "┘"));

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }
}
