//! Row encoding shared by every record kind.
//!
//! A backing file holds one record per line, fields joined by [`DELIMITER`]
//! in the record's declared order. There is no header, no trailing delimiter
//! and no escaping: a value containing a comma produces a row with the wrong
//! field count, which the loader then skips.

pub const DELIMITER: char = ',';

/// Joins already-ordered field values into a single row (without newline).
pub fn encode_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut row = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            row.push(DELIMITER);
        }
        row.push_str(field.as_ref());
    }
    row
}

/// Splits a row into its fields. Returns `Err(found)` when the row does not
/// carry exactly `expected` fields.
pub fn split_row(line: &str, expected: usize) -> std::result::Result<Vec<&str>, usize> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() == expected {
        Ok(fields)
    } else {
        Err(fields.len())
    }
}

/// Case-insensitive key comparison used for every lookup.
pub fn keys_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
