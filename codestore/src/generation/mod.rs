//! Import resolution and file assembly.
//!
//! - [`ImportResolver`] - Collision-free `use` statements for fully-qualified names
//! - [`FileBuilder`] - Namespace, imports and body of one generated file

mod file_builder;
mod imports;

pub use file_builder::FileBuilder;
pub use imports::ImportResolver;
