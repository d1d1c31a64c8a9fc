//! Plain-text rendering of a flattened grid

use gridcodec_codec::{FlatTable, Value};

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Render the grid as aligned columns with a header rule and row numbers
pub fn render_table(table: &FlatTable) -> String {
    let body = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(cell_text).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = table
        .columns
        .iter()
        .map(|c| c.chars().count())
        .collect::<Vec<_>>();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let index_width = body.len().saturating_sub(1).to_string().len();

    let line = |index: &str, cells: &[String]| {
        let mut out = format!("{:>w$} ", index, w = index_width);
        for (cell, width) in cells.iter().zip(&widths) {
            out.push_str(&format!("| {:<w$} ", cell, w = *width));
        }
        out.trim_end().to_string()
    };

    let mut lines = vec![line("", &table.columns)];
    let rule = widths.iter().map(|w| "-".repeat(w + 2)).collect::<Vec<_>>();
    lines.push(format!("{}-+{}", "-".repeat(index_width), rule.join("+")));
    for (i, row) in body.iter().enumerate() {
        lines.push(line(&i.to_string(), row));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcodec_codec::FlatRecord;

    #[test]
    fn test_render_table() {
        let table = FlatTable {
            columns: vec!["name".to_string(), "scores".to_string()],
            rows: vec![
                FlatRecord::new(vec![Value::from("Alice"), Value::from("85.5, 92.3")]),
                FlatRecord::new(vec![Value::from("Bob"), Value::Null]),
            ],
        };

        let expected = "  | name  | scores\n\
                        --+-------+------------\n\
                        0 | Alice | 85.5, 92.3\n\
                        1 | Bob   | -";
        assert_eq!(render_table(&table), expected);
    }
}
