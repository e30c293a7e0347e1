mod adapter;
mod backends;
mod decode;
mod schema;

pub use adapter::{parse_coordinates, parse_keywords, CanonicalTable, RowAdapter};
pub use backends::{FileRowSource, HttpRowSource, RowSource, TableFiles};
pub use decode::{decode_rows, normalize_header, RawRow};
pub use schema::{ColumnMap, SchemaMode, SchemaRevision};
