use {
    crate::{
        error::{self, Result},
        storage::{self, LoadMode},
        Table,
    },
    def::Schema,
    snafu::prelude::*,
    std::{collections::BTreeMap, path::Path},
    tracing::debug,
};

/// A named collection of independent tables, kept in name order.
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    name: String,
    tables: BTreeMap<String, Table>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn create_table(&mut self, name: &str, schema: Schema) -> Result<&mut Table> {
        ensure!(
            !self.tables.contains_key(name),
            error::DuplicateTableSnafu { name }
        );

        debug!(database = %self.name, table = name, fields = schema.len(), "table created");

        Ok(self
            .tables
            .entry(name.to_string())
            .or_insert_with(|| Table::new(name, schema)))
    }

    pub fn get_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .context(error::TableNotFoundSnafu { name })
    }

    pub fn get_table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .context(error::TableNotFoundSnafu { name })
    }

    /// Removes a table together with all of its rows.
    pub fn delete_table(&mut self, name: &str) -> Result<Table> {
        let table = self
            .tables
            .remove(name)
            .context(error::TableNotFoundSnafu { name })?;

        debug!(database = %self.name, table = name, rows = table.rows().len(), "table deleted");

        Ok(table)
    }

    pub(crate) fn insert_table(&mut self, table: Table) {
        self.tables.insert(table.name().to_string(), table);
    }

    /// Writes the whole database to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        storage::save(self, path)
    }

    /// Reads a database previously written by [`Database::save`].
    pub fn load(path: &Path, mode: LoadMode) -> Result<Self> {
        storage::load(path, mode)
    }
}
