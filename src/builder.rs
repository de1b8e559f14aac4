use std::io::Write;

use crate::cli::{CommandLine, LookupEnv};
use crate::error::ClapenvError;
use crate::kind::{Kind, Registry};
use crate::types::ErrorHandling;
use crate::walk::Record;

/// Entry point for resolving a configuration record.
pub struct Clapenv;

impl Clapenv {
    pub fn builder() -> ClapenvBuilder {
        ClapenvBuilder::new()
    }
}

/// Builder for one resolution of flags, environment and defaults.
///
/// Everything but the command name has a default: errors print to stderr and
/// exit the process, the environment is read from the process, and the
/// built-in kinds are registered.
pub struct ClapenvBuilder {
    name: Option<String>,
    error_handling: ErrorHandling,
    output: Option<Box<dyn Write>>,
    lookup_env: Option<LookupEnv>,
    usage_parent: Option<String>,
    registry: Registry,
}

impl ClapenvBuilder {
    fn new() -> Self {
        Self {
            name: None,
            error_handling: ErrorHandling::default(),
            output: None,
            lookup_env: None,
            usage_parent: None,
            registry: Registry::standard(),
        }
    }

    /// Set the command name. It appears in usage text and prefixes every
    /// derived environment variable (`cool` → `COOL_PORT`).
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Choose what happens to errors (default: [`ErrorHandling::Exit`]).
    pub fn error_handling(mut self, handling: ErrorHandling) -> Self {
        self.error_handling = handling;
        self
    }

    /// Where usage text and error messages go (default: stderr).
    pub fn output<W: Write + 'static>(mut self, output: W) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Replace the environment lookup. Returning `None` means unset.
    pub fn lookup_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.lookup_env = Some(Box::new(lookup));
        self
    }

    /// Show `parent name` instead of `name` in usage text, for commands
    /// dispatched from a parent tool.
    pub fn usage_parent(mut self, parent: &str) -> Self {
        self.usage_parent = Some(parent.to_string());
        self
    }

    /// Register `T` as a terminal value kind. Replaces a built-in kind of
    /// the same type.
    pub fn kind<T: Kind>(mut self) -> Self {
        self.registry.insert::<T>();
        self
    }

    /// Resolve `record` from the process arguments. Returns the positional
    /// arguments left after the flags.
    pub fn parse<R: Record>(self, record: &mut R) -> Result<Vec<String>, ClapenvError> {
        let argv = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned());
        self.parse_from(record, argv)
    }

    /// Resolve `record` from `argv`, which does not include the program name.
    pub fn parse_from<R, I>(self, record: &mut R, argv: I) -> Result<Vec<String>, ClapenvError>
    where
        R: Record,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut command_line = self.build()?;
        command_line.parse(record, argv.into_iter().map(Into::into).collect())
    }

    /// Render the usage text without reading argv or the environment.
    /// `record` is left holding its declared defaults.
    pub fn usage<R: Record>(self, record: &mut R) -> Result<String, ClapenvError> {
        self.build()?.usage(record)
    }

    fn build(self) -> Result<CommandLine, ClapenvError> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or(ClapenvError::NameRequired)?;
        let mut command_line = CommandLine::new(&name);
        command_line.error_handling = self.error_handling;
        command_line.usage_parent = self.usage_parent;
        command_line.registry = self.registry;
        if let Some(output) = self.output {
            command_line.output = output;
        }
        if let Some(lookup) = self.lookup_env {
            command_line.lookup_env = lookup;
        }
        Ok(command_line)
    }
}
