//! Plain-text table rendering for console sinks

/// Default cap on the number of data rows a rendered table shows
pub const DEFAULT_MAX_ROWS: usize = 20;

/// Cells longer than this many characters are shortened with an ellipsis
const MAX_CELL_WIDTH: usize = 20;

/// Render rows as a bordered plain-text table.
///
/// Cells are right-aligned and shortened to at most 20 characters. At most
/// `max_rows` data rows are shown; if rows were withheld a trailing
/// `only showing top N rows` note is appended. The returned string ends with
/// a newline.
///
/// ```rust
/// use freshet::sinks::render_table;
///
/// let table = render_table(
///     &["city", "count"],
///     &[
///         vec!["Berlin".to_owned(), "2".to_owned()],
///         vec!["null".to_owned(), "1".to_owned()],
///     ],
///     20,
/// );
/// assert_eq!(
///     table,
///     "\
/// +------+-----+
/// |  city|count|
/// +------+-----+
/// |Berlin|    2|
/// |  null|    1|
/// +------+-----+
/// "
/// );
/// ```
pub fn render_table(headers: &[&str], rows: &[Vec<String>], max_rows: usize) -> String {
    let shown = rows.len().min(max_rows);

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows[..shown] {
        for (cell, width) in row.iter().zip(widths.iter_mut()) {
            *width = (*width).max(cell_text(cell).chars().count());
        }
    }

    let border = border_line(&widths);
    let mut out = String::new();
    out.push_str(&border);
    let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_owned()).collect();
    out.push_str(&format_row(&header_cells, &widths));
    out.push_str(&border);
    for row in &rows[..shown] {
        out.push_str(&format_row(row, &widths));
    }
    out.push_str(&border);
    if rows.len() > shown {
        out.push_str(&format!("only showing top {shown} rows\n"));
    }
    out
}

fn cell_text(cell: &str) -> String {
    if cell.chars().count() > MAX_CELL_WIDTH {
        let mut text: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
        text.push_str("...");
        text
    } else {
        cell.to_owned()
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths.iter().copied()) {
        line.push_str(&format!("{:>width$}", cell_text(cell)));
        line.push('|');
    }
    line.push('\n');
    line
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(*width));
        line.push('+');
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::render_table;

    #[test]
    fn renders_aligned_table() {
        let table = render_table(
            &["city", "count"],
            &[
                vec!["Amsterdam".to_owned(), "1".to_owned()],
                vec!["Berlin".to_owned(), "12".to_owned()],
            ],
            20,
        );
        let expected = "\
+---------+-----+
|     city|count|
+---------+-----+
|Amsterdam|    1|
|   Berlin|   12|
+---------+-----+
";
        assert_eq!(table, expected);
    }

    #[test]
    fn truncates_rows_with_note() {
        let rows: Vec<Vec<String>> = (0..5)
            .map(|i| vec![format!("city-{i}"), "1".to_owned()])
            .collect();
        let table = render_table(&["city", "count"], &rows, 2);
        assert!(table.contains("city-0"));
        assert!(table.contains("city-1"));
        assert!(!table.contains("city-2"));
        assert!(table.ends_with("only showing top 2 rows\n"));
    }

    #[test]
    fn shortens_long_cells() {
        let table = render_table(
            &["city"],
            &[vec!["a-city-with-a-very-long-name".to_owned()]],
            20,
        );
        assert!(table.contains("a-city-with-a-ver..."));
        assert!(!table.contains("a-city-with-a-very-long-name"));
    }

    #[test]
    fn empty_rows_render_header_only() {
        let table = render_table(&["city", "count"], &[], 20);
        let expected = "\
+----+-----+
|city|count|
+----+-----+
+----+-----+
";
        assert_eq!(table, expected);
    }
}
