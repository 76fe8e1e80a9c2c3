use {
    def::{schema, types},
    snafu::prelude::*,
    std::{io, path::PathBuf},
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum Error {
    #[snafu(display("create or load a database first"))]
    NoDatabase,

    #[snafu(display("enter the {} name", what))]
    EmptyName { what: &'static str },

    #[snafu(display("`{}` expects {}", command, usage))]
    MissingArgument {
        command: String,
        usage: &'static str,
    },

    #[snafu(display(r#"unknown command "{}", type `help` for the list"#, name))]
    UnknownCommand { name: String },

    #[snafu(display(r#"database name "{}" must not contain a path"#, name))]
    PathInName { name: String },

    #[snafu(display("a table needs at least one field"))]
    NoFields,

    #[snafu(display(r#"expected a field as <name>:<type>, got "{}""#, spec))]
    InvalidField { spec: String },

    #[snafu(display("{}", source))]
    FieldType {
        #[snafu(backtrace)]
        source: types::Error,
    },

    #[snafu(display("{}", source))]
    Schema {
        #[snafu(backtrace)]
        source: schema::Error,
    },

    #[snafu(display(r#"enter a valid row index, got "{}""#, text))]
    InvalidIndex { text: String },

    #[snafu(display(r#"failed to prepare data directory "{}": {}"#, path.display(), source))]
    DataDir { path: PathBuf, source: io::Error },

    #[snafu(context(false), display("{}", source))]
    Catalog {
        #[snafu(backtrace)]
        source: catalog::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
