//! Per-field precedence: environment variable, then declared default, then
//! the kind's zero value (empty default text).
//!
//! The command line is not consulted here. Each field is registered as a
//! flag whose default is the value resolved below, and the flag parse that
//! follows overwrites only the fields whose flags were given.
//!
//! In help mode the environment is skipped entirely so usage text shows the
//! declared defaults rather than whatever the current environment holds.

use std::any::Any;

use crate::error::{ClapenvError, Source};
use crate::field::Field;
use crate::kind::Capability;
use crate::naming::Names;

pub(crate) struct Resolver<'a> {
    lookup_env: &'a dyn Fn(&str) -> Option<String>,
    help: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(lookup_env: &'a dyn Fn(&str) -> Option<String>, help: bool) -> Self {
        Self { lookup_env, help }
    }

    /// Resolve one terminal field into `slot`, returning the layer used.
    pub fn resolve(
        &self,
        field: &Field,
        names: &Names,
        capability: &dyn Capability,
        slot: &mut dyn Any,
    ) -> Result<Source, ClapenvError> {
        if !self.help
            && let Some(text) = (self.lookup_env)(&names.env)
        {
            capability
                .bind_text(&text, slot)
                .map_err(|error| ClapenvError::Parse {
                    field: field.name().to_string(),
                    phase: Source::Env,
                    error,
                })?;
            return Ok(Source::Env);
        }

        capability
            .bind_text(field.default_text(), slot)
            .map_err(|error| ClapenvError::Parse {
                field: field.name().to_string(),
                phase: Source::Def,
                error,
            })?;
        Ok(Source::Def)
    }
}
