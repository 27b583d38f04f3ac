//! Plain-text rendering of a snapshot.

use rust_sheet_core::{Position, Snapshot};

/// Lay the snapshot out as a table with column letters and 1-based row numbers.
pub fn render_grid(snapshot: &Snapshot) -> String {
    if snapshot.n_cols() == 0 || snapshot.n_rows() == 0 {
        return format!(
            "(empty sheet: {} cols, {} rows)\n",
            snapshot.n_cols(),
            snapshot.n_rows()
        );
    }

    let headers: Vec<String> = (0..snapshot.n_cols())
        .map(Position::column_to_letters)
        .collect();
    let rows: Vec<Vec<String>> = (0..snapshot.n_rows())
        .map(|row| {
            (0..snapshot.n_cols())
                .map(|column| snapshot.display_text(Position::new(column, row)))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.chars().count());
        }
    }
    let gutter = snapshot.n_rows().to_string().len();

    let mut out = String::new();
    push_line(&mut out, "", gutter, &headers, &widths);
    for (i, row) in rows.iter().enumerate() {
        push_line(&mut out, &(i + 1).to_string(), gutter, row, &widths);
    }
    out
}

fn push_line(out: &mut String, label: &str, gutter: usize, cells: &[String], widths: &[usize]) {
    let mut line = format!("{label:>gutter$} |");
    for (text, width) in cells.iter().zip(widths) {
        line.push_str(&format!(" {text:<width$} |"));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
