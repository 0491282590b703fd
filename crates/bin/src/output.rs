//! Terminal output for the CLI commands: aligned tables or one JSON document.

use serde::Serialize;

/// How a command prints its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Print `value` as a single line of JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Render rows under headers with every column padded to its widest cell.
///
/// Cells beyond the header count are dropped.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = vec![pad_line(headers, &widths)];
    out.extend(rows.iter().map(|row| pad_line(row.as_slice(), &widths)));
    out.join("\n")
}

fn pad_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }
    println!("{}", render_table(headers, rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_the_widest_cell() {
        let table = render_table(
            &["SERVICE", "URL"],
            &[
                vec!["auth".into(), "http://localhost:8081/".into()],
                vec!["credit-cards".into(), "http://localhost:8083/".into()],
            ],
        );
        assert_eq!(
            table,
            "SERVICE       URL\n\
             auth          http://localhost:8081/\n\
             credit-cards  http://localhost:8083/"
        );
    }

    #[test]
    fn extra_cells_are_dropped() {
        let table = render_table(&["A"], &[vec!["x".into(), "ignored".into()]]);
        assert_eq!(table, "A\nx");
    }
}
