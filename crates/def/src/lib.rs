pub mod codec;
pub mod schema;
pub mod types;
mod value;

pub use {
    codec::{decode, decode_row},
    schema::{Field, Schema},
    types::DataType,
    value::{Row, Value},
};
