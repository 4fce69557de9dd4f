use unicode_width::UnicodeWidthStr;

use super::{Report, Section};
use crate::format::pad_to_width;

const TITLE: &str = "System Information";
const COLUMN_GAP: &str = "  ";

/// Plain-text rendering: one aligned table per section.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    for section in &report.sections {
        out.push('\n');
        write_section(&mut out, section);
    }
    out
}

fn column_widths(section: &Section) -> Vec<usize> {
    let mut widths: Vec<usize> = section.header.iter().map(|h| h.width()).collect();
    for row in &section.rows {
        for (i, cell) in row.iter().enumerate() {
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(cell.width()),
                None => widths.push(cell.width()),
            }
        }
    }
    widths
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str(COLUMN_GAP);
        }
        if i == last {
            out.push_str(cell);
        } else {
            out.push_str(&pad_to_width(cell, widths.get(i).copied().unwrap_or(0)));
        }
    }
    out.push('\n');
}

fn write_section(out: &mut String, section: &Section) {
    let widths = column_widths(section);
    out.push_str(&format!("{}:\n", section.title));
    write_line(out, &section.header, &widths);

    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    write_line(out, &rule, &widths);

    for row in &section.rows {
        write_line(out, row, &widths);
    }

    if section.rows.is_empty() {
        match &section.note {
            Some(note) => out.push_str(&format!("({note})\n")),
            None => out.push_str("(no entries)\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(rows: Vec<Vec<&str>>, note: Option<&str>) -> Section {
        Section {
            title: "Things".to_string(),
            header: vec!["Name".to_string(), "Value".to_string()],
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            note: note.map(String::from),
        }
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let mut out = String::new();
        write_section(&mut out, &section(vec![vec!["alpha", "1"], vec!["b", "22"]], None));
        assert_eq!(
            out,
            "Things:\nName   Value\n-----  -----\nalpha  1\nb      22\n"
        );
    }

    #[test]
    fn empty_section_says_so() {
        let mut out = String::new();
        write_section(&mut out, &section(Vec::new(), None));
        assert!(out.ends_with("----  -----\n(no entries)\n"));
    }

    #[test]
    fn degraded_section_prints_note() {
        let mut out = String::new();
        write_section(&mut out, &section(Vec::new(), Some("unavailable: denied")));
        assert!(out.ends_with("(unavailable: denied)\n"));
    }

    #[test]
    fn report_starts_with_title() {
        let text = render_text(&Report { sections: Vec::new() });
        assert_eq!(text, "System Information\n");
    }
}
