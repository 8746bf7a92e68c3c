//! Data model types

mod record;
mod sort;

pub use record::*;
pub use sort::*;
