//! Value kinds and the dispatch table that maps a field's type to them.
//!
//! A [`Kind`] supplies the capability triple every terminal field needs: a
//! zero value, a text parser, and (through the registry) a way to bind a
//! parsed value into the field. [`Registry`] keys the type-erased
//! capabilities by [`TypeId`], so the walker finds a field's kind from its
//! static type alone. Types without an entry are rejected at resolution time
//! with [`UnsupportedType`](crate::ClapenvError::UnsupportedType).
//!
//! Empty text always means the zero value. No kind parser ever sees `""`.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::time::Duration;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches};

use crate::error::{BoxError, KindError};
use crate::value::{IntList, StringList, Timestamp, Url};

/// A type that can be resolved from text into a terminal field.
///
/// Implement this for your own leaf types and add them to the dispatch
/// table with [`ClapenvBuilder::kind`](crate::ClapenvBuilder::kind).
pub trait Kind: Clone + Send + Sync + 'static {
    /// Kind name used in error messages.
    const NAME: &'static str;

    /// Bare switch on the command line (`-tls` means `-tls=true`).
    const SWITCH: bool = false;

    /// The value a field takes when its source text is empty.
    fn zero() -> Self;

    /// Parse non-empty text.
    fn parse(text: &str) -> Result<Self, BoxError>;

    /// Textual form, accepted back by [`parse`](Self::parse).
    fn render(&self) -> String;
}

/// Parse `text` as `T`, mapping empty text to the zero value.
pub(crate) fn coerce<T: Kind>(text: &str) -> Result<T, KindError> {
    if text.is_empty() {
        return Ok(T::zero());
    }
    T::parse(text).map_err(|source| KindError {
        kind: T::NAME,
        text: text.to_string(),
        source,
    })
}

/// Type-erased capability of one registered kind.
pub(crate) trait Capability {
    /// Parse `text` and store the result in `slot`.
    fn bind_text(&self, text: &str, slot: &mut dyn Any) -> Result<(), KindError>;

    /// The flag registry entry for a field currently holding `slot`.
    fn arg(&self, flag: &str, usage: &str, slot: &dyn Any) -> Arg;

    /// Copy a value supplied on the command line into `slot`. Returns
    /// whether the command line set this flag.
    fn bind_matches(&self, matches: &ArgMatches, flag: &str, slot: &mut dyn Any) -> bool;
}

struct Capable<T>(PhantomData<fn() -> T>);

impl<T: Kind> Capability for Capable<T> {
    fn bind_text(&self, text: &str, slot: &mut dyn Any) -> Result<(), KindError> {
        let value = coerce::<T>(text)?;
        if let Some(slot) = slot.downcast_mut::<T>() {
            *slot = value;
        }
        Ok(())
    }

    fn arg(&self, flag: &str, usage: &str, slot: &dyn Any) -> Arg {
        let mut arg = Arg::new(flag.to_string())
            .long(flag.to_string())
            .help(usage.to_string())
            .action(ArgAction::Set)
            .value_parser(coerce::<T>);

        arg = if T::SWITCH {
            arg.num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        } else {
            arg.num_args(1).allow_hyphen_values(true)
        };

        if let Some(current) = slot.downcast_ref::<T>() {
            let shown = current.render();
            if shown != T::zero().render() {
                arg = arg.default_value(shown);
            }
        }
        arg
    }

    fn bind_matches(&self, matches: &ArgMatches, flag: &str, slot: &mut dyn Any) -> bool {
        if matches.value_source(flag) != Some(ValueSource::CommandLine) {
            return false;
        }
        let Ok(Some(value)) = matches.try_get_one::<T>(flag) else {
            return false;
        };
        if let Some(slot) = slot.downcast_mut::<T>() {
            *slot = value.clone();
        }
        true
    }
}

/// Dispatch table from a field's type to its [`Capability`].
pub(crate) struct Registry {
    kinds: HashMap<TypeId, Box<dyn Capability>>,
}

impl Registry {
    /// The built-in scalar kinds plus the four composite leaves.
    pub fn standard() -> Self {
        let mut registry = Self {
            kinds: HashMap::new(),
        };
        registry.insert::<bool>();
        registry.insert::<String>();
        registry.insert::<u16>();
        registry.insert::<u32>();
        registry.insert::<u64>();
        registry.insert::<usize>();
        registry.insert::<i32>();
        registry.insert::<i64>();
        registry.insert::<isize>();
        registry.insert::<f64>();
        registry.insert::<Duration>();
        registry.insert::<StringList>();
        registry.insert::<IntList>();
        registry.insert::<Url>();
        registry.insert::<Timestamp>();
        registry
    }

    /// Add or replace the capability for `T`.
    pub fn insert<T: Kind>(&mut self) {
        self.kinds
            .insert(TypeId::of::<T>(), Box::new(Capable::<T>(PhantomData)));
    }

    pub fn get<T: Any>(&self) -> Option<&dyn Capability> {
        self.kinds.get(&TypeId::of::<T>()).map(|c| c.as_ref())
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.kinds.contains_key(&TypeId::of::<T>())
    }
}

// --- built-in kinds ---

impl Kind for bool {
    const NAME: &'static str = "bool";
    const SWITCH: bool = true;

    fn zero() -> Self {
        false
    }

    fn parse(text: &str) -> Result<Self, BoxError> {
        match text {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err("invalid syntax".into()),
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Kind for String {
    const NAME: &'static str = "string";

    fn zero() -> Self {
        String::new()
    }

    fn parse(text: &str) -> Result<Self, BoxError> {
        Ok(text.to_string())
    }

    fn render(&self) -> String {
        self.clone()
    }
}

macro_rules! number_kind {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Kind for $ty {
                const NAME: &'static str = $name;

                fn zero() -> Self {
                    <$ty>::default()
                }

                fn parse(text: &str) -> Result<Self, BoxError> {
                    Ok(text.parse::<$ty>()?)
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

number_kind! {
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    i32 => "i32",
    i64 => "i64",
    isize => "isize",
    f64 => "f64",
}

/// Durations use humantime syntax: `10s`, `24h`, `1h 30m`.
impl Kind for Duration {
    const NAME: &'static str = "duration";

    fn zero() -> Self {
        Duration::ZERO
    }

    fn parse(text: &str) -> Result<Self, BoxError> {
        Ok(humantime::parse_duration(text)?)
    }

    fn render(&self) -> String {
        humantime::format_duration(*self).to_string()
    }
}

/// Type name used when a field's type has no kind.
pub(crate) fn kind_name<T: ?Sized>() -> &'static str {
    type_name::<T>()
}
