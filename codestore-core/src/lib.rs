//! Core types for the codestore code builder.
//!
//! This crate provides the indentation unit, configuration and error types
//! shared by the `codestore` crate.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod indent;

pub use config::{DEFAULT_FILENAME, StoreConfig};
pub use error::{Error, Result};
pub use indent::{Indent, TAB_COLUMNS};
