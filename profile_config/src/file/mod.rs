//! Configuration documents: reading a file into the tree that backs a
//! [`LayeredStore`](crate::LayeredStore).

mod loader;
mod parser;
#[cfg(feature = "yaml")]
mod yaml;

pub use loader::load_document;
pub use parser::parse_document;
#[cfg(feature = "yaml")]
pub use yaml::SaphyrYaml;
