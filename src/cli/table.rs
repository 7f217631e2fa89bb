//! Plain-text table rendering for roster rows

use std::fmt::Write;
use student_roster::roster::{RosterRow, HEADER};

/// Render `rows` (paired with their zero-based roster index) as an aligned
/// table. The first column shows the one-based row number.
pub fn render(rows: &[(usize, &RosterRow)]) -> String {
    let mut widths: Vec<usize> = std::iter::once("#")
        .chain(HEADER)
        .map(|h| h.chars().count())
        .collect();

    let numbers: Vec<String> = rows.iter().map(|(i, _)| (i + 1).to_string()).collect();
    for ((_, row), number) in rows.iter().zip(&numbers) {
        let cells = std::iter::once(number.as_str()).chain(row.fields());
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, std::iter::once("#").chain(HEADER), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for ((_, row), number) in rows.iter().zip(&numbers) {
        push_line(
            &mut out,
            std::iter::once(number.as_str()).chain(row.fields()),
            &widths,
        );
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, id: &str) -> RosterRow {
        RosterRow {
            name: name.to_string(),
            id: id.to_string(),
            subjects: "Math".to_string(),
            grades: "80.0".to_string(),
            attendance: "80".to_string(),
            attendance_status: "Good".to_string(),
            average: "80.00".to_string(),
            final_grade: "B".to_string(),
        }
    }

    #[test]
    fn test_render_numbers_rows_from_one() {
        let alice = row("Alice", "S1");
        let bob = row("Bob", "S2");
        let table = render(&[(0, &alice), (4, &bob)]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("# | Name "));
        assert!(lines[2].starts_with("1 | Alice | S1"));
        assert!(lines[3].starts_with("5 | Bob   | S2"));
    }

    #[test]
    fn test_render_empty_has_header_only() {
        let table = render(&[]);
        assert_eq!(table.lines().count(), 2);
    }
}
