//! Whole-file JSON persistence of a [`Database`].
//!
//! The document is `{"name": .., "tables": {<table>: {"schema": .., "rows": ..}}}`,
//! indented with four spaces. Saving always rewrites the file and loading
//! always reads all of it.

use {
    crate::{
        error::{self, Result},
        Database, Table,
    },
    def::{decode_row, Row, Schema},
    serde::{Deserialize, Serialize},
    snafu::prelude::*,
    std::{collections::BTreeMap, fs, io, path::Path},
    tracing::info,
};

const INDENT: &[u8] = b"    ";

/// How rows read from disk are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Rows are taken as stored. Numbers become integers or reals by their
    /// JSON form and every string becomes a string value.
    #[default]
    Trusted,
    /// Every row is decoded again from its text against the table schema, so
    /// dates come back typed and rows that no longer fit are rejected.
    Strict,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    name: &'a str,
    tables: BTreeMap<&'a str, TableRef<'a>>,
}

#[derive(Serialize)]
struct TableRef<'a> {
    schema: &'a Schema,
    rows: &'a [Row],
}

#[derive(Deserialize)]
struct Document {
    name: String,
    tables: BTreeMap<String, TableDocument>,
}

#[derive(Deserialize)]
struct TableDocument {
    schema: Schema,
    rows: Vec<Row>,
}

pub(crate) fn encode(database: &Database) -> Result<Vec<u8>> {
    let document = DocumentRef {
        name: database.name(),
        tables: database
            .tables()
            .map(|table| {
                (
                    table.name(),
                    TableRef {
                        schema: table.schema(),
                        rows: table.rows(),
                    },
                )
            })
            .collect(),
    };

    let mut bytes = vec![];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    document
        .serialize(&mut serializer)
        .context(error::EncodeSnafu {
            name: database.name(),
        })?;

    Ok(bytes)
}

pub(crate) fn save(database: &Database, path: &Path) -> Result<()> {
    let bytes = encode(database)?;
    fs::write(path, bytes).context(error::IoSnafu { path })?;

    info!(
        database = database.name(),
        path = %path.display(),
        tables = database.len(),
        "database saved"
    );

    Ok(())
}

pub(crate) fn load(path: &Path, mode: LoadMode) -> Result<Database> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return error::FileNotFoundSnafu { path }.fail();
        }
        Err(err) => return Err(err).context(error::IoSnafu { path }),
    };

    let document: Document = serde_json::from_str(&text).context(error::ParseSnafu { path })?;

    let mut database = Database::new(document.name);
    for (name, TableDocument { schema, rows }) in document.tables {
        let rows = match mode {
            LoadMode::Trusted => rows,
            LoadMode::Strict => revalidate(&name, &schema, rows)?,
        };
        database.insert_table(Table::with_rows(name, schema, rows));
    }

    info!(
        database = database.name(),
        path = %path.display(),
        tables = database.len(),
        ?mode,
        "database loaded"
    );

    Ok(database)
}

fn revalidate(table: &str, schema: &Schema, rows: Vec<Row>) -> Result<Vec<Row>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let tokens: Vec<String> = row.iter().map(ToString::to_string).collect();
            decode_row(schema, &tokens).context(error::InvalidRowSnafu { table, row: i })
        })
        .collect()
}
