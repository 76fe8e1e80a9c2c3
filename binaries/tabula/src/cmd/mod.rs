//! The shell side of tabula: a [`Session`] owning the current database, the
//! line [`Command`] parser and the read-eval-print loop tying them together.

mod command;
mod error;
mod render;

pub use {
    command::{Command, HELP},
    error::{Error, Result},
};

use {
    crate::Config,
    catalog::Database,
    def::{DataType, Field, Schema},
    snafu::prelude::*,
    std::{
        fs,
        io::{self, BufRead, Write},
        path::PathBuf,
    },
    tracing::debug,
};

const ROW_SEPARATOR: char = ';';

/// What the shell should do after a command ran.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Quit,
}

/// Holds the database being edited. Failed operations leave it unchanged.
#[derive(Debug)]
pub struct Session {
    config: Config,
    database: Option<Database>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            database: None,
        }
    }

    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "executing");

        let reply = match command {
            Command::CreateDatabase { name } => self.create_database(&name)?,
            Command::LoadDatabase { name } => self.load_database(&name)?,
            Command::Save => self.save_database()?,
            Command::CreateTable { table, fields } => self.create_table(&table, &fields)?,
            Command::DropTable { table } => self.delete_table(&table)?,
            Command::Tables => self.list_tables()?,
            Command::AddRow { table, row } => self.add_row(&table, &row)?,
            Command::EditRow { table, index, row } => self.edit_row(&table, &index, &row)?,
            Command::Show { table } => self.show_rows(&table)?,
            Command::Search {
                table,
                field,
                pattern,
            } => self.search(&table, &field, &pattern)?,
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Reply(reply))
    }

    pub fn create_database(&mut self, name: &str) -> Result<String> {
        ensure_named(name, "database")?;
        ensure_file_name(name)?;

        self.database = Some(Database::new(name));

        Ok(format!(r#"database "{}" created"#, name))
    }

    pub fn load_database(&mut self, name: &str) -> Result<String> {
        ensure_named(name, "database")?;

        let path = self.database_path(name)?;
        let database = Database::load(&path, self.config.load_mode)?;
        let reply = format!(
            r#"database "{}" loaded from "{}""#,
            database.name(),
            path.display()
        );
        self.database = Some(database);

        Ok(reply)
    }

    pub fn save_database(&self) -> Result<String> {
        let database = self.database.as_ref().context(error::NoDatabaseSnafu)?;

        let path = self.database_path(database.name())?;
        let dir = &self.config.data_dir;
        fs::create_dir_all(dir).context(error::DataDirSnafu { path: dir })?;

        database.save(&path)?;

        Ok(format!(r#"database saved to "{}""#, path.display()))
    }

    /// `fields` are `<name>:<type>` pairs, in declaration order.
    pub fn create_table<S: AsRef<str>>(&mut self, table: &str, fields: &[S]) -> Result<String> {
        let database = self.database.as_mut().context(error::NoDatabaseSnafu)?;
        ensure_named(table, "table")?;
        ensure!(!fields.is_empty(), error::NoFieldsSnafu);

        let fields = fields
            .iter()
            .map(|spec| parse_field(spec.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let schema = Schema::new(fields).context(error::SchemaSnafu)?;

        database.create_table(table, schema)?;

        Ok(format!(r#"table "{}" created"#, table))
    }

    pub fn delete_table(&mut self, table: &str) -> Result<String> {
        let database = self.database.as_mut().context(error::NoDatabaseSnafu)?;
        ensure_named(table, "table")?;

        database.delete_table(table)?;

        Ok(format!(r#"table "{}" deleted"#, table))
    }

    pub fn list_tables(&self) -> Result<String> {
        let database = self.database.as_ref().context(error::NoDatabaseSnafu)?;

        Ok(if database.is_empty() {
            format!(r#"database "{}" has no tables"#, database.name())
        } else {
            database.table_names().collect::<Vec<_>>().join("\n")
        })
    }

    /// `row` holds one `;`-separated token per field.
    pub fn add_row(&mut self, table: &str, row: &str) -> Result<String> {
        let database = self.database.as_mut().context(error::NoDatabaseSnafu)?;
        ensure_named(table, "table")?;

        let table = database.get_table_mut(table)?;
        let row = table.decode_row(&split_row(row))?;
        let index = table.add_row(row)?;

        Ok(format!("row {} added", index))
    }

    pub fn edit_row(&mut self, table: &str, index: &str, row: &str) -> Result<String> {
        let database = self.database.as_mut().context(error::NoDatabaseSnafu)?;
        ensure_named(table, "table")?;

        let index: usize = index
            .trim()
            .parse()
            .ok()
            .context(error::InvalidIndexSnafu { text: index })?;

        let table = database.get_table_mut(table)?;
        table.check_index(index)?;
        let row = table.decode_row(&split_row(row))?;
        table.edit_row(index, row)?;

        Ok(format!("row {} edited", index))
    }

    pub fn show_rows(&self, table: &str) -> Result<String> {
        let database = self.database.as_ref().context(error::NoDatabaseSnafu)?;
        ensure_named(table, "table")?;

        let table = database.get_table(table)?;

        Ok(render::listing(table.schema(), table.rows().iter().enumerate()))
    }

    /// Names taken from a loaded file go through the same check as typed ones.
    fn database_path(&self, name: &str) -> Result<PathBuf> {
        ensure_file_name(name)?;
        Ok(self.config.database_path(name))
    }

    pub fn search(&self, table: &str, field: &str, pattern: &str) -> Result<String> {
        let database = self.database.as_ref().context(error::NoDatabaseSnafu)?;
        ensure_named(table, "table")?;
        ensure_named(field, "search field")?;

        let table = database.get_table(table)?;
        let hits = table.search_rows(field, pattern)?;

        Ok(render::listing(table.schema(), hits))
    }
}

/// Reads commands line by line until end of input or `quit`. Replies go to
/// `output`; failures are reported there too and do not stop the loop.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
    prompt: bool,
) -> io::Result<()> {
    let mut lines = input.lines();

    loop {
        if prompt {
            write!(output, "tabula> ")?;
            output.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let outcome = Command::parse(&line)
            .and_then(|command| command.map(|c| session.execute(c)).transpose());

        match outcome {
            Ok(Some(Outcome::Reply(reply))) => writeln!(output, "{}", reply)?,
            Ok(Some(Outcome::Quit)) => break,
            Ok(None) => {}
            Err(err) => {
                debug!(%err, line = line.as_str(), "command failed");
                writeln!(output, "error: {}", err)?;
            }
        }
    }

    Ok(())
}

fn ensure_named(name: &str, what: &'static str) -> Result<()> {
    ensure!(!name.trim().is_empty(), error::EmptyNameSnafu { what });
    Ok(())
}

fn ensure_file_name(name: &str) -> Result<()> {
    ensure!(!name.contains(['/', '\\']), error::PathInNameSnafu { name });
    Ok(())
}

fn parse_field(spec: &str) -> Result<Field> {
    let (name, tag) = spec
        .split_once(':')
        .filter(|(name, tag)| !name.is_empty() && !tag.is_empty())
        .context(error::InvalidFieldSnafu { spec })?;
    let data_type: DataType = tag.parse().context(error::FieldTypeSnafu)?;

    Ok(Field::new(name, data_type))
}

fn split_row(row: &str) -> Vec<&str> {
    row.split(ROW_SEPARATOR).collect()
}
