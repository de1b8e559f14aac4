//! The command-line surface: owns the flag registry settings, output stream,
//! environment lookup and error policy, and runs one resolution:
//!
//! 1. Scan the raw arguments for a help token (`--help`, `-help`, `--h`, `-h`).
//! 2. Walk the record, resolving env/default values and collecting flags.
//! 3. Parse the arguments with [clap](https://docs.rs/clap) over those flags
//!    and copy command-line values into the record.
//! 4. Hand any error to the [`ErrorHandling`] policy.
//!
//! Arguments use classic flag syntax: `-port 9090`, `-port=9090`, `--port
//! 9090`, bare `-tls` for booleans. Single-dash long names are rewritten to
//! clap's `--long` form before parsing. Flag parsing stops at the first
//! positional argument; it and everything after it is returned to the caller.

use std::collections::HashSet;
use std::io::Write;

use clap::{Arg, Command};
use tracing::{debug, trace};

use crate::error::ClapenvError;
use crate::kind::Registry;
use crate::policy;
use crate::resolve::Resolver;
use crate::types::ErrorHandling;
use crate::walk::{self, Record, Walk};

/// Environment lookup used for every derived variable name.
pub(crate) type LookupEnv = Box<dyn Fn(&str) -> Option<String>>;

/// Id of the catch-all positional. Contains a character no derived flag name can.
const REST: &str = "clapenv:args";

const HELP_TOKENS: [&str; 4] = ["--help", "-help", "--h", "-h"];

pub(crate) struct CommandLine {
    pub name: String,
    pub output: Box<dyn Write>,
    pub lookup_env: LookupEnv,
    pub error_handling: ErrorHandling,
    pub usage_parent: Option<String>,
    pub registry: Registry,
}

impl CommandLine {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            output: Box::new(std::io::stderr()),
            lookup_env: Box::new(process_env),
            error_handling: ErrorHandling::default(),
            usage_parent: None,
            registry: Registry::standard(),
        }
    }

    /// Resolve `record` from `argv` (without the program name). Returns the
    /// positional arguments left after the flags.
    pub fn parse<R: Record>(
        &mut self,
        record: &mut R,
        argv: Vec<String>,
    ) -> Result<Vec<String>, ClapenvError> {
        let help = help_requested(&argv);
        debug!(command = %self.name, help, argc = argv.len(), "resolving configuration");

        let result = self.resolve(record, argv, help);
        if let Err(err) = &result
            && err.is_help()
        {
            let _ = policy::write_error(&mut *self.output, &self.name, err);
        }
        policy::apply(
            self.error_handling,
            result,
            help,
            &mut *self.output,
            &self.name,
        )
    }

    /// Usage text as it would print for `--help`: declared defaults only,
    /// no environment lookups. Resets `record` to those defaults.
    pub fn usage<R: Record>(&self, record: &mut R) -> Result<String, ClapenvError> {
        let (args, _) = self.register(record, true)?;
        Ok(self.command(args).render_help().to_string())
    }

    fn resolve<R: Record>(
        &self,
        record: &mut R,
        argv: Vec<String>,
        help: bool,
    ) -> Result<Vec<String>, ClapenvError> {
        let (args, flags) = self.register(record, help)?;
        let valued: HashSet<String> = args
            .iter()
            .filter(|arg| !arg.is_require_equals_set())
            .map(|arg| arg.get_id().to_string())
            .collect();
        let argv = normalize(argv, &flags, &valued);
        trace!(?argv, "normalized arguments");

        let matches = self
            .command(args)
            .try_get_matches_from(std::iter::once(self.name.clone()).chain(argv))?;

        let mut walk = Walk::apply(&self.name, &self.registry, &matches);
        walk::walk_root(record, &mut walk)?;

        Ok(matches
            .get_many::<String>(REST)
            .map(|rest| rest.cloned().collect())
            .unwrap_or_default())
    }

    fn register<R: Record>(
        &self,
        record: &mut R,
        help: bool,
    ) -> Result<(Vec<Arg>, HashSet<String>), ClapenvError> {
        let resolver = Resolver::new(&*self.lookup_env, help);
        let mut walk = Walk::register(&self.name, &self.registry, resolver);
        walk::walk_root(record, &mut walk)?;
        Ok(walk.into_flags())
    }

    fn command(&self, args: Vec<Arg>) -> Command {
        let mut command = Command::new(self.name.clone())
            .args_override_self(true)
            .args(args)
            .arg(
                Arg::new(REST)
                    .num_args(1..)
                    .trailing_var_arg(true)
                    .value_parser(clap::value_parser!(String))
                    .hide(true),
            );
        if let Some(parent) = &self.usage_parent {
            command = command.bin_name(format!("{parent} {}", self.name));
        }
        command
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
}

/// Literal scan; a help token anywhere in `argv` counts.
pub(crate) fn help_requested(argv: &[String]) -> bool {
    argv.iter().any(|a| HELP_TOKENS.contains(&a.as_str()))
}

/// Rewrite classic `-name[=value]` flags to `--name[=value]` when `name` is
/// a registered flag. `--h` becomes `--help`. `valued` names the flags that
/// take the next argument as their value. Nothing changes from the first
/// positional argument or `--` on.
pub(crate) fn normalize(
    argv: Vec<String>,
    flags: &HashSet<String>,
    valued: &HashSet<String>,
) -> Vec<String> {
    let mut out = Vec::with_capacity(argv.len());
    let mut verbatim = false;
    let mut value_next = false;
    for arg in argv {
        if verbatim || value_next {
            value_next = false;
            out.push(arg);
            continue;
        }
        if arg == "--" || arg == "-" || !arg.starts_with('-') {
            verbatim = true;
            out.push(arg);
            continue;
        }
        let arg = long_form(arg, flags);
        value_next = arg
            .strip_prefix("--")
            .is_some_and(|name| !name.contains('=') && valued.contains(name));
        out.push(arg);
    }
    out
}

fn long_form(arg: String, flags: &HashSet<String>) -> String {
    if arg == "--h" {
        return "--help".to_string();
    }
    let Some(body) = arg.strip_prefix('-') else {
        return arg;
    };
    if body.starts_with('-') {
        return arg;
    }
    let name = body.split_once('=').map_or(body, |(name, _)| name);
    if flags.contains(name) {
        format!("-{arg}")
    } else {
        arg
    }
}
