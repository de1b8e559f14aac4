use std::fmt;

use thiserror::Error;

/// Boxed error produced by a [`Kind`](crate::Kind) parser.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which layer supplied the text that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The derived environment variable.
    Env,
    /// The field's declared default text.
    Def,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Env => f.write_str("env"),
            Source::Def => f.write_str("def"),
        }
    }
}

/// A value kind rejected its source text.
#[derive(Debug, Error)]
#[error("parsing {kind} {text:?}: {source}")]
pub struct KindError {
    pub kind: &'static str,
    pub text: String,
    #[source]
    pub source: BoxError,
}

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum ClapenvError {
    #[error("Invalid config type: {kind} is a value kind, not a record")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(clapenv::invalid_config_type),
            help("pass the record that contains this value instead")
        )
    )]
    InvalidConfigType { kind: &'static str },

    #[error("{field}: type not supported: {kind}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(clapenv::unsupported_type),
            help("implement `Kind` for the type and add it with `.kind::<T>()`")
        )
    )]
    UnsupportedType { field: String, kind: &'static str },

    #[error("{field} {phase}: {error}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(clapenv::parse)))]
    Parse {
        field: String,
        phase: Source,
        #[source]
        error: KindError,
    },

    #[error("Flag redefined: {flag} (field {field})")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(clapenv::duplicate_flag),
            help("give one of the fields an explicit `.flag(..)` name")
        )
    )]
    DuplicateFlag { flag: String, field: String },

    #[error(transparent)]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(clapenv::cli)))]
    Cli(#[from] clap::Error),

    #[error("Command name is required, call .name() on the builder")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(clapenv::name_required)))]
    NameRequired,
}

impl ClapenvError {
    /// Whether this error is the flag registry reporting a help request.
    pub fn is_help(&self) -> bool {
        matches!(self, ClapenvError::Cli(e) if e.kind() == clap::error::ErrorKind::DisplayHelp)
    }
}
