use {
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    snafu::prelude::*,
    std::{fmt::Display, str::FromStr},
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display(
        r#"unknown type "{}", expected one of: {}"#,
        tag,
        DataType::tags().join(", ")
    ))]
    UnknownType { tag: String },
}

pub type Result<T> = std::result::Result<T, Error>;

macro_rules! define_types {
    ($($(#[$meta:meta])* $var:ident => $tag:literal $(| $alias:literal)*,)*) => {
        /// The primitive kind a field declares.
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
        pub enum DataType {
            $($(#[$meta])* $var,)*
        }

        impl DataType {
            pub const ALL: &'static [DataType] = &[$(Self::$var,)*];

            /// Canonical spelling used in persisted schemas.
            pub const fn tag(&self) -> &'static str {
                match self {
                    $(Self::$var => $tag,)*
                }
            }
        }

        impl FromStr for DataType {
            type Err = Error;

            fn from_str(tag: &str) -> Result<Self> {
                match tag {
                    $($tag $(| $alias)* => Ok(Self::$var),)*
                    _ => UnknownTypeSnafu { tag }.fail(),
                }
            }
        }
    };
}

define_types! {
    Integer => "integer",
    Real => "real",
    Char => "char",
    String => "string",
    Date => "date",
    /// Two dates written as `<start> - <end>`. Older files spell it `dateInvl`.
    DateInterval => "dateInterval" | "dateInvl",
}

impl DataType {
    pub fn tags() -> Vec<&'static str> {
        Self::ALL.iter().map(DataType::tag).collect()
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(de::Error::custom)
    }
}
