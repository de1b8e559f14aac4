//! Derivation of flag names, environment variable names and usage text.
//!
//! All three are pure functions of the command name, the prefix chain (the
//! names of the enclosing nested records) and the field descriptor. With
//! command `mycmd`, field `Host` nested under `DB` then `Postgres`:
//!
//! | Derived     | Value                                        |
//! |-------------|----------------------------------------------|
//! | flag        | `db-postgres-host`                           |
//! | env         | `MYCMD_DB_POSTGRES_HOST`                     |
//! | usage       | `db postgres host (env MYCMD_DB_POSTGRES_HOST)` |
//!
//! Overrides on the field replace the derived flag and env names verbatim.
//! A help override replaces the phrase but keeps the env annotation.

use heck::{ToKebabCase, ToShoutySnakeCase, ToSnakeCase};

use crate::field::Field;

/// The three names derived for one terminal field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Names {
    pub flag: String,
    pub env: String,
    pub usage: String,
}

impl Names {
    pub fn derive(command: &str, prefix: &[&str], field: &Field) -> Self {
        let env = env_name(command, prefix, field);
        Self {
            flag: flag_name(prefix, field),
            usage: usage(prefix, field, &env),
            env,
        }
    }
}

pub(crate) fn flag_name(prefix: &[&str], field: &Field) -> String {
    if let Some(flag) = field.flag_override() {
        return flag.to_string();
    }
    join(prefix, field.name(), "-").to_kebab_case()
}

pub(crate) fn env_name(command: &str, prefix: &[&str], field: &Field) -> String {
    if let Some(env) = field.env_override() {
        return env.to_string();
    }
    format!("{command}_{}", join(prefix, field.name(), "_")).to_shouty_snake_case()
}

pub(crate) fn usage(prefix: &[&str], field: &Field, env: &str) -> String {
    if let Some(help) = field.help_override() {
        return format!("{help} (env {env})");
    }
    let phrase = join(prefix, field.name(), "_").to_snake_case().replace('_', " ");
    format!("{phrase} (env {env})")
}

fn join(prefix: &[&str], name: &str, sep: &str) -> String {
    let mut out = prefix.join(sep);
    if !out.is_empty() {
        out.push_str(sep);
    }
    out.push_str(name);
    out
}
