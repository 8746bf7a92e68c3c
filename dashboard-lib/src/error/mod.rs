//! Error types

mod profile;
mod settings;
mod submit;

pub use profile::*;
pub use settings::*;
pub use submit::*;
