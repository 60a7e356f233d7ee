//! Minimal RFC 4180 reader.
//!
//! Handles quoted fields containing commas, doubled quotes and line breaks.
//! CRLF and LF line endings are both accepted.

/// Split CSV text into records of raw field values.
///
/// Blank lines outside quotes are skipped. An unterminated quote consumes the
/// rest of the input into the last field.
pub fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => finish_record(&mut records, &mut record, &mut field),
            _ => field.push(ch),
        }
    }
    finish_record(&mut records, &mut record, &mut field);

    records
}

fn finish_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    if record.is_empty() && field.is_empty() {
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rows() {
        let rows = parse_records("a,b,c\n1,2,3\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn quoted_commas_quotes_and_newlines() {
        let rows = parse_records("name,genres\n\"Hello, \"\"World\"\"\",\"pop,\nrock\"\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], r#"Hello, "World""#);
        assert_eq!(rows[1][1], "pop,\nrock");
    }

    #[test]
    fn crlf_and_blank_lines() {
        let rows = parse_records("a,b\r\n\r\n1,2\r\n\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn empty_fields_and_missing_trailing_newline() {
        let rows = parse_records("a,b,c\n,,x");
        assert_eq!(rows[1], vec!["", "", "x"]);
    }

    #[test]
    fn empty_input() {
        assert!(parse_records("").is_empty());
    }
}
