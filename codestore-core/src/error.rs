use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for codestore operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("import resolution has not been prepared")]
    #[diagnostic(
        code(codestore::not_prepared),
        help("call `prepare()` before reading imports or resolved names")
    )]
    NotPrepared,

    #[error("cannot add '{name}': import resolution is already prepared")]
    #[diagnostic(
        code(codestore::already_prepared),
        help("add every name before calling `prepare()`")
    )]
    AlreadyPrepared { name: String },

    #[error("invalid fully-qualified name '{name}'")]
    #[diagnostic(code(codestore::invalid_name))]
    InvalidName { name: String },

    #[error("unterminated literal span opened at line {line}")]
    #[diagnostic(
        code(codestore::unterminated_literal),
        help("append a line containing `{terminator};` to close the literal")
    )]
    UnterminatedLiteral { terminator: String, line: usize },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(codestore::parse_error))]
    Parse {
        filename: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(codestore::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            filename: filename.to_string(),
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a validation error with source context
    pub fn validation(message: impl Into<String>, src: &str, filename: &str) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span: None,
            message: message.into(),
        })
    }

    /// Create a validation error with a span
    pub fn validation_at(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        span: impl Into<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span: Some(span.into()),
            message: message.into(),
        })
    }

    /// Create an unterminated literal error
    pub fn unterminated_literal(terminator: impl Into<String>, line: usize) -> Box<Self> {
        Box::new(Error::UnterminatedLiteral {
            terminator: terminator.into(),
            line,
        })
    }
}
