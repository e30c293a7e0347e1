mod common;
mod filter;
mod records;

pub use common::*;
pub use filter::*;
pub use records::*;
