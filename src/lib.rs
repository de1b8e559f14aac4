//! Resolve one nested configuration struct from command-line flags,
//! environment variables and declared defaults.
//!
//! ```ignore
//! let mut config = Config::default();
//! let args = Clapenv::builder().name("cool").parse(&mut config)?;
//! ```
//!
//! Every terminal field gets three names derived from its position in the
//! struct: a flag (`-mongo-max-pool-size`), an environment variable
//! (`COOL_MONGO_MAX_POOL_SIZE`) and a usage line. Its value comes from the
//! first source that has one:
//!
//! 1. the flag, when given on the command line;
//! 2. the environment variable, when set (an empty value counts as set);
//! 3. the declared default;
//! 4. the zero value of the field's kind.
//!
//! # Declaring a record
//!
//! A config struct implements [`Record`] by listing its fields in order.
//! [`Field`] carries the name the other names derive from, plus optional
//! overrides for the flag, the environment variable, the help phrase and
//! the default text.
//!
//! ```
//! use std::time::Duration;
//! use clapenv::{ClapenvError, Field, Record, StringList, Walk};
//!
//! #[derive(Default)]
//! struct Config {
//!     port: u16,
//!     mongo: Mongo,
//! }
//!
//! #[derive(Default)]
//! struct Mongo {
//!     hosts: StringList,
//!     timeout: Duration,
//! }
//!
//! impl Record for Config {
//!     fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
//!         w.field(Field::new("Port").def("3000"), &mut self.port)?;
//!         w.nested(Field::new("Mongo"), &mut self.mongo)
//!     }
//! }
//!
//! impl Record for Mongo {
//!     fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
//!         w.field(Field::new("Hosts").def("mongo"), &mut self.hosts)?;
//!         w.field(Field::new("Timeout").def("10s"), &mut self.timeout)
//!     }
//! }
//! ```
//!
//! # Kinds
//!
//! A terminal field's type must have a [`Kind`]: booleans, strings, the
//! integer widths, `f64`, [`Duration`](std::time::Duration) (humantime
//! syntax) and the composite leaves [`StringList`], [`IntList`], [`Url`] and
//! [`Timestamp`]. Register your own with [`ClapenvBuilder::kind`]. A field
//! whose type has no kind fails the resolution with
//! [`ClapenvError::UnsupportedType`].
//!
//! # Errors and help
//!
//! `-help`, `--help`, `--h` and `-h` print usage with the declared defaults
//! (the environment is not read). What happens to errors and help requests
//! is set by [`ErrorHandling`]: return them, exit the process, or panic.

pub mod error;
pub mod types;

mod builder;
mod cli;
mod field;
mod kind;
mod naming;
mod policy;
mod resolve;
mod value;
mod walk;

#[cfg(test)]
mod fixtures;

pub use builder::{Clapenv, ClapenvBuilder};
pub use error::{BoxError, ClapenvError, KindError, Source};
pub use field::Field;
pub use kind::Kind;
pub use types::{EXIT_CODE, ErrorHandling};
pub use value::{IntList, StringList, Timestamp, Url};
pub use walk::{Record, Walk};
