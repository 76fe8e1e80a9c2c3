use {
    catalog::LoadMode,
    common::pub_fields_struct,
    snafu::prelude::*,
    std::{env, path::PathBuf},
};

pub const TABULA_DATADIR: &str = "TABULA_DATADIR";
pub const TABULA_STRICT_LOAD: &str = "TABULA_STRICT_LOAD";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display(
        r#"the `{}` environment variable must be a boolean, got "{}""#,
        name,
        value
    ))]
    InvalidFlag { name: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

pub_fields_struct! {
    #[derive(Debug, Clone, PartialEq)]
    struct Config {
        /// Directory holding `<database name>.json` files.
        data_dir: PathBuf,
        load_mode: LoadMode,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            load_mode: LoadMode::Trusted,
        }
    }
}

impl Config {
    /// Command line values win over the environment; anything left unset
    /// falls back to the defaults.
    pub fn from_env(data_dir: Option<&str>, strict_load: bool) -> Result<Self> {
        Self::resolve(data_dir, strict_load, |name| env::var(name).ok())
    }

    pub fn resolve(
        data_dir: Option<&str>,
        strict_load: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = data_dir
            .map(str::to_string)
            .or_else(|| lookup(TABULA_DATADIR))
            .filter(|dir| !dir.is_empty())
        {
            config.data_dir = PathBuf::from(dir);
        }

        let strict_load = strict_load
            || match lookup(TABULA_STRICT_LOAD) {
                Some(value) => parse_flag(TABULA_STRICT_LOAD, &value)?,
                None => false,
            };
        if strict_load {
            config.load_mode = LoadMode::Strict;
        }

        Ok(config)
    }

    pub fn database_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => InvalidFlagSnafu { name, value }.fail(),
    }
}
