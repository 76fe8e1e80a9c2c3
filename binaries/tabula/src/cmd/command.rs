use {
    super::error::{self, Result},
    snafu::prelude::*,
};

pub const HELP: &str = "\
commands:
  create-db <name>                        start a new empty database
  load-db <name>                          load <data dir>/<name>.json
  save                                    write the current database to disk
  create-table <table> <field>:<type>...  types: integer real char string date dateInterval
  drop-table <table>                      delete a table and its rows
  tables                                  list the tables
  add-row <table> <v1;v2;...>             append a row
  edit-row <table> <index> <v1;v2;...>    replace the row at <index>
  show <table>                            print the schema and all rows
  search <table> <field> [pattern]        print rows whose <field> contains [pattern]
  help                                    print this message
  quit                                    leave the shell";

/// One shell instruction, parsed from a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateDatabase { name: String },
    LoadDatabase { name: String },
    Save,
    CreateTable {
        table: String,
        fields: Vec<String>,
    },
    DropTable { table: String },
    Tables,
    AddRow { table: String, row: String },
    EditRow {
        table: String,
        index: String,
        row: String,
    },
    Show { table: String },
    Search {
        table: String,
        field: String,
        pattern: String,
    },
    Help,
    Quit,
}

impl Command {
    /// Returns `None` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (name, rest) = split_word(line).unwrap_or((line, ""));
        let mut args = Args { command: name, rest };

        let command = match name {
            "create-db" => Self::CreateDatabase {
                name: args.word("<name>")?,
            },
            "load-db" => Self::LoadDatabase {
                name: args.word("<name>")?,
            },
            "save" => Self::Save,
            "create-table" => {
                let table = args.word("<table> <field>:<type>...")?;
                let fields = args.rest.split_whitespace().map(str::to_string).collect();
                Self::CreateTable { table, fields }
            }
            "drop-table" => Self::DropTable {
                table: args.word("<table>")?,
            },
            "tables" => Self::Tables,
            "add-row" => Self::AddRow {
                table: args.word("<table> <v1;v2;...>")?,
                row: args.remainder(),
            },
            "edit-row" => {
                let usage = "<table> <index> <v1;v2;...>";
                Self::EditRow {
                    table: args.word(usage)?,
                    index: args.word(usage)?,
                    row: args.remainder(),
                }
            }
            "show" => Self::Show {
                table: args.word("<table>")?,
            },
            "search" => {
                let usage = "<table> <field> [pattern]";
                Self::Search {
                    table: args.word(usage)?,
                    field: args.word(usage)?,
                    pattern: args.remainder(),
                }
            }
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return error::UnknownCommandSnafu { name }.fail(),
        };

        Ok(Some(command))
    }
}

struct Args<'a> {
    command: &'a str,
    rest: &'a str,
}

impl<'a> Args<'a> {
    fn word(&mut self, usage: &'static str) -> Result<String> {
        let (word, rest) = split_word(self.rest).context(error::MissingArgumentSnafu {
            command: self.command,
            usage,
        })?;
        self.rest = rest;

        Ok(word.to_string())
    }

    /// Everything after the parsed words, with the separating blanks removed.
    fn remainder(&mut self) -> String {
        std::mem::take(&mut self.rest).to_string()
    }
}

fn split_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }

    Some(match text.find(char::is_whitespace) {
        Some(end) => {
            let (word, rest) = text.split_at(end);
            (word, rest.trim_start())
        }
        None => (text, ""),
    })
}
