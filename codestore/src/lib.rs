//! Source code builder with automatic indentation and import aliasing.
//!
//! Generated code is appended one line at a time without leading whitespace;
//! the indentation is derived from the lines themselves.
//!
//! # Module Organization
//!
//! - [`builder`] - Code building (CodeBuilder, IndentationEngine, PhpRules, etc.)
//! - [`generation`] - Import resolution and file assembly (ImportResolver, FileBuilder)

pub mod builder;
pub mod generation;

pub use builder::{CodeBuilder, IndentMode, IndentationRules, PhpRules};
pub use codestore_core::{Error, Indent, Result, StoreConfig};
pub use generation::{FileBuilder, ImportResolver};
