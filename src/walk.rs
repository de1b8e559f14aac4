//! Schema walk: visits a record's fields in declaration order, depth first.
//!
//! A [`Record`] lists its own fields by calling [`Walk::field`] for terminal
//! values and [`Walk::nested`] for sub-records. The walk runs twice per
//! resolution: the registration pass resolves env/default values into the
//! fields and collects one flag per field, then the apply pass copies the
//! values the command line actually set. Names are derived afresh on each
//! pass; nothing is cached between fields or calls.
//!
//! The first error stops the walk. Fields visited before it keep the values
//! already written into them.

use std::any::Any;
use std::collections::HashSet;

use clap::{Arg, ArgMatches};
use tracing::debug;

use crate::error::ClapenvError;
use crate::field::Field;
use crate::kind::{Registry, kind_name};
use crate::naming::Names;
use crate::resolve::Resolver;

/// A configuration struct the walker can visit.
///
/// ```
/// use clapenv::{ClapenvError, Field, Record, Walk};
///
/// #[derive(Default)]
/// struct Config {
///     port: u16,
///     db: Db,
/// }
///
/// #[derive(Default)]
/// struct Db {
///     host: String,
/// }
///
/// impl Record for Config {
///     fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
///         w.field(Field::new("Port").def("3000"), &mut self.port)?;
///         w.nested(Field::new("DB"), &mut self.db)
///     }
/// }
///
/// impl Record for Db {
///     fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
///         w.field(Field::new("Host").def("localhost"), &mut self.host)
///     }
/// }
/// ```
///
/// `walk` is called more than once per resolution and must declare the same
/// fields in the same order every time.
pub trait Record: 'static {
    fn walk(&mut self, walk: &mut Walk<'_>) -> Result<(), ClapenvError>;
}

enum Pass<'a> {
    Register {
        resolver: Resolver<'a>,
        args: Vec<Arg>,
        flags: HashSet<String>,
    },
    Apply(&'a ArgMatches),
}

/// Cursor handed to [`Record::walk`]. Tracks the prefix chain of enclosing
/// namespaces and the pass being run.
pub struct Walk<'a> {
    command: &'a str,
    registry: &'a Registry,
    prefix: Vec<&'static str>,
    pass: Pass<'a>,
}

impl<'a> Walk<'a> {
    /// Flag names the flag registry already owns.
    const RESERVED: [&'static str; 1] = ["help"];

    pub(crate) fn register(command: &'a str, registry: &'a Registry, resolver: Resolver<'a>) -> Self {
        Self {
            command,
            registry,
            prefix: Vec::new(),
            pass: Pass::Register {
                resolver,
                args: Vec::new(),
                flags: Self::RESERVED.iter().map(|f| f.to_string()).collect(),
            },
        }
    }

    pub(crate) fn apply(command: &'a str, registry: &'a Registry, matches: &'a ArgMatches) -> Self {
        Self {
            command,
            registry,
            prefix: Vec::new(),
            pass: Pass::Apply(matches),
        }
    }

    /// The flags collected by a registration pass, and every flag name now
    /// taken (reserved names included).
    pub(crate) fn into_flags(self) -> (Vec<Arg>, HashSet<String>) {
        match self.pass {
            Pass::Register { args, flags, .. } => (args, flags),
            Pass::Apply(_) => (Vec::new(), HashSet::new()),
        }
    }

    /// Declare a terminal field.
    ///
    /// Fails with [`UnsupportedType`](ClapenvError::UnsupportedType) when
    /// `T` has no [`Kind`](crate::Kind) in the dispatch table.
    pub fn field<T: Any>(&mut self, field: Field, slot: &mut T) -> Result<(), ClapenvError> {
        let names = Names::derive(self.command, &self.prefix, &field);
        let registry = self.registry;
        let capability = registry
            .get::<T>()
            .ok_or_else(|| ClapenvError::UnsupportedType {
                field: field.name().to_string(),
                kind: kind_name::<T>(),
            })?;

        match &mut self.pass {
            Pass::Register {
                resolver,
                args,
                flags,
            } => {
                if !flags.insert(names.flag.clone()) {
                    return Err(ClapenvError::DuplicateFlag {
                        flag: names.flag,
                        field: field.name().to_string(),
                    });
                }
                let source = resolver.resolve(&field, &names, capability, &mut *slot)?;
                debug!(
                    field = field.name(),
                    flag = %names.flag,
                    env = %names.env,
                    %source,
                    "resolved field"
                );
                args.push(capability.arg(&names.flag, &names.usage, &*slot));
            }
            Pass::Apply(matches) => {
                if capability.bind_matches(matches, &names.flag, &mut *slot) {
                    debug!(field = field.name(), flag = %names.flag, "set from command line");
                }
            }
        }
        Ok(())
    }

    /// Declare a nested record. Its fields are named under this field's
    /// name. A type registered as a value kind is treated as a terminal
    /// field instead of being recursed into.
    pub fn nested<R: Record>(&mut self, field: Field, record: &mut R) -> Result<(), ClapenvError> {
        if self.registry.contains::<R>() {
            return self.field(field, record);
        }
        self.prefix.push(field.name());
        let result = record.walk(self);
        self.prefix.pop();
        result
    }
}

/// Walk `record` as the configuration root.
pub(crate) fn walk_root<R: Record>(record: &mut R, walk: &mut Walk<'_>) -> Result<(), ClapenvError> {
    if walk.registry.contains::<R>() {
        return Err(ClapenvError::InvalidConfigType {
            kind: kind_name::<R>(),
        });
    }
    record.walk(walk)
}
