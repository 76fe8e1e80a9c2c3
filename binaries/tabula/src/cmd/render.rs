use {
    def::{Row, Schema},
    std::fmt::Write,
};

/// Renders the schema header followed by one `<index>. v1 | v2 | ...` line per row.
pub fn listing<'a>(schema: &Schema, rows: impl IntoIterator<Item = (usize, &'a Row)>) -> String {
    let mut out = schema.to_string();

    for (index, row) in rows {
        let _ = write!(out, "\n{}. ", index);
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.push_str(" | ");
            }
            let _ = write!(out, "{}", value);
        }
    }

    out
}
