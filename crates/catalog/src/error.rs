use {
    def::codec,
    snafu::prelude::*,
    std::{io, path::PathBuf},
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("{}", source))]
    Decode {
        #[snafu(backtrace)]
        source: codec::Error,
    },

    #[snafu(display(
        "the count of values ({}) does not match the count of fields ({})",
        actual,
        expected
    ))]
    Arity { expected: usize, actual: usize },

    #[snafu(display("row index {} is out of range, the table has {} rows", index, len))]
    Index { index: usize, len: usize },

    #[snafu(display(r#"table "{}" has no field "{}""#, table, name))]
    UnknownField { table: String, name: String },

    #[snafu(display(r#"table "{}" already exists"#, name))]
    DuplicateTable { name: String },

    #[snafu(display(r#"table "{}" does not exist"#, name))]
    TableNotFound { name: String },

    #[snafu(display(r#"file "{}" not found"#, path.display()))]
    FileNotFound { path: PathBuf },

    #[snafu(display(r#"failed to access "{}": {}"#, path.display(), source))]
    Io { path: PathBuf, source: io::Error },

    #[snafu(display(r#"malformed database file "{}": {}"#, path.display(), source))]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[snafu(display(r#"failed to encode database "{}": {}"#, name, source))]
    Encode {
        name: String,
        source: serde_json::Error,
    },

    #[snafu(display(r#"row {} of table "{}" does not match its schema: {}"#, row, table, source))]
    InvalidRow {
        table: String,
        row: usize,
        #[snafu(backtrace)]
        source: codec::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`], for callers that only care about
/// which rule was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Arity,
    Index,
    UnknownField,
    DuplicateTable,
    NotFound,
    Parse,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode {
                source: codec::Error::Format { .. },
            } => ErrorKind::Format,
            Self::Decode {
                source: codec::Error::Arity { .. },
            }
            | Self::Arity { .. } => ErrorKind::Arity,
            Self::Index { .. } => ErrorKind::Index,
            Self::UnknownField { .. } => ErrorKind::UnknownField,
            Self::DuplicateTable { .. } => ErrorKind::DuplicateTable,
            Self::TableNotFound { .. } | Self::FileNotFound { .. } => ErrorKind::NotFound,
            Self::Parse { .. } | Self::InvalidRow { .. } => ErrorKind::Parse,
            Self::Io { .. } | Self::Encode { .. } => ErrorKind::Io,
        }
    }
}
