//! Composable file builder

use codestore_core::{Result, StoreConfig};

use super::ImportResolver;
use crate::builder::{CodeBuilder, PhpRules};

/// Combines import resolution with code building for one PHP file.
///
/// The body is written with fully-qualified names; [`build`](Self::build)
/// resolves the imports, emits the `use` block and replaces the names in the
/// body by their local names.
///
/// # Example
///
/// ```
/// use codestore::{FileBuilder, StoreConfig};
///
/// let mut file = FileBuilder::new("App", &StoreConfig::default());
/// file.add_import("\\Foo\\Bar").unwrap();
/// file.code.append("$bar = new \\Foo\\Bar();");
///
/// assert_eq!(
///     file.build().unwrap(),
///     "<?php\n\nnamespace App;\n\nuse Foo\\Bar;\n\n$bar = new Bar();\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FileBuilder {
    /// Import resolver for the names referenced by the body
    pub imports: ImportResolver,
    /// Code builder for the file body
    pub code: CodeBuilder<PhpRules>,
}

impl FileBuilder {
    /// Create a FileBuilder for code in `namespace`.
    pub fn new(namespace: &str, config: &StoreConfig) -> Self {
        Self {
            imports: ImportResolver::new(namespace),
            code: CodeBuilder::from_config(PhpRules::new(), config),
        }
    }

    /// Register a fully-qualified name used by the body.
    pub fn add_import(&mut self, name: &str) -> Result<&mut Self> {
        self.imports.add_name(name)?;
        Ok(self)
    }

    /// Apply a function to the code builder.
    pub fn with_code<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut CodeBuilder<PhpRules>),
    {
        f(&mut self.code);
        self
    }

    /// Assemble the file: opening tag, namespace, imports and body.
    pub fn build(mut self) -> Result<String> {
        self.imports.prepare();
        let body = self.code.code()?;
        let body = self.imports.simplify_text(&body)?;

        let mut buffer = String::from("<?php\n\n");
        if !self.imports.namespace().is_empty() {
            buffer.push_str("namespace ");
            buffer.push_str(self.imports.namespace());
            buffer.push_str(";\n\n");
        }

        let imports = self.imports.imports()?;
        for import in imports {
            buffer.push_str(import);
            buffer.push('\n');
        }
        if !imports.is_empty() {
            buffer.push('\n');
        }

        buffer.push_str(&body);
        Ok(buffer)
    }
}
