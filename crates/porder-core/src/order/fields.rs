//! Line and field splitting.

/// Separator between lines of a purchase order document.
pub const LINE_SEPARATOR: char = '\n';

/// Separator between fields of a line.
pub const FIELD_SEPARATOR: char = '|';

/// Split a document into lines.
///
/// Every line is kept, including a trailing empty one.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(LINE_SEPARATOR)
}

/// Split a line into its present fields, paired with their column index.
///
/// Empty fields are skipped but still count towards the column index of the
/// fields after them.
pub fn split_fields(line: &str) -> impl Iterator<Item = (usize, &str)> {
    line.split(FIELD_SEPARATOR)
        .enumerate()
        .filter(|(_, field)| !field.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(line: &str) -> Vec<(usize, &str)> {
        split_fields(line).collect()
    }

    #[test]
    fn test_split_fields_keeps_columns() {
        assert_eq!(
            fields("10001|2021-10-22 17:13:31|Ofificina"),
            vec![(0, "10001"), (1, "2021-10-22 17:13:31"), (2, "Ofificina")]
        );
    }

    #[test]
    fn test_split_fields_without_separator() {
        assert_eq!(fields("10001"), vec![(0, "10001")]);
    }

    #[test]
    fn test_split_fields_skips_empty() {
        assert_eq!(fields("10001|"), vec![(0, "10001")]);
        assert_eq!(fields("|Focaltec"), vec![(1, "Focaltec")]);
        assert_eq!(fields("P1||Caja"), vec![(0, "P1"), (2, "Caja")]);
    }

    #[test]
    fn test_split_fields_only_separators() {
        assert!(fields("||").is_empty());
        assert!(fields("").is_empty());
    }

    #[test]
    fn test_split_fields_keeps_whitespace() {
        assert_eq!(fields(" 5 | x"), vec![(0, " 5 "), (1, " x")]);
    }

    #[test]
    fn test_split_lines_keeps_trailing_empty_line() {
        let lines: Vec<&str> = split_lines("a\nb\n").collect();
        assert_eq!(lines, vec!["a", "b", ""]);
    }

    #[test]
    fn test_split_lines_empty_text() {
        let lines: Vec<&str> = split_lines("").collect();
        assert_eq!(lines, vec![""]);
    }
}
