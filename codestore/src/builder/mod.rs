//! Line-oriented code building with automatic indentation.
//!
//! - [`CodeBuilder`] - Line buffer that indents appended lines by their content
//! - [`IndentationEngine`] - Applies indentation modes to a running level
//! - [`IndentationRules`] - Classifies lines; [`PhpRules`] and [`BraceRules`]
//! - [`IndentMode`] - Bitmask describing how a line moves the level
//! - [`NestingStack`] - Per-construct brace counters used by [`PhpRules`]
//! - [`RenderedLine`] - A stored line and its level

mod code_builder;
mod engine;
mod line;
mod mode;
mod php;
mod rules;
mod stack;

pub use code_builder::CodeBuilder;
pub use engine::{DEFAULT_MAX_LEVEL, IndentationEngine};
pub use line::RenderedLine;
pub use mode::IndentMode;
pub use php::PhpRules;
pub use rules::{BraceRules, IndentationRules};
pub use stack::NestingStack;
