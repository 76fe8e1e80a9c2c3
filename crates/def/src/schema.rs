use {
    crate::DataType,
    common::pub_fields_struct,
    serde::{
        de::{self, MapAccess, Visitor},
        ser::SerializeMap,
        Deserialize, Deserializer, Serialize, Serializer,
    },
    snafu::prelude::*,
    std::fmt::{self, Display},
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display(r#"field "{}" is declared more than once"#, name))]
    DuplicateField { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;

pub_fields_struct! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Field {
        name: String,
        data_type: DataType,
    }
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered field declarations of a table. Field positions line up with row
/// value positions, and names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        for (i, field) in fields.iter().enumerate() {
            ensure!(
                fields[..i].iter().all(|f| f.name != field.name),
                DuplicateFieldSnafu { name: &field.name }
            );
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}: {}", field.name, field.data_type)?;
        }

        Ok(())
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.data_type)?;
        }
        map.end()
    }
}

struct SchemaVisitor;

impl<'de> Visitor<'de> for SchemaVisitor {
    type Value = Schema;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field names to type tags")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Schema, A::Error> {
        let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, data_type)) = access.next_entry::<String, DataType>()? {
            fields.push(Field { name, data_type });
        }

        Schema::new(fields).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SchemaVisitor)
    }
}
