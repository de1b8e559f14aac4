//! Composite leaf types: values with internal structure that still resolve
//! from a single flag or environment variable.
//!
//! Each type parses from and renders to text, so the same string works as a
//! declared default, an environment value and a command-line value:
//!
//! | Type          | Text                            |
//! |---------------|---------------------------------|
//! | [`StringList`]| `a,b,c`                         |
//! | [`IntList`]   | `1,-2,3`                        |
//! | [`Url`]       | `https://example.com/x`, `/x`   |
//! | [`Timestamp`] | `2002-10-02T10:00:00-05:00`     |
//!
//! Empty text is the empty list, the empty URL and the unset timestamp.

use std::convert::Infallible;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::error::BoxError;
use crate::kind::Kind;

/// Comma-separated list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringList(Vec<String>);

impl StringList {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl FromStr for StringList {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self(s.split(',').map(str::to_string).collect()))
    }
}

impl fmt::Display for StringList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl Deref for StringList {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for StringList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<S: Into<String>> FromIterator<S> for StringList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl Kind for StringList {
    const NAME: &'static str = "string list";

    fn zero() -> Self {
        Self::default()
    }

    fn parse(text: &str) -> Result<Self, BoxError> {
        Ok(text.parse()?)
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

/// Comma-separated list of signed integers. One bad element fails the
/// whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntList(Vec<i64>);

impl IntList {
    pub fn into_inner(self) -> Vec<i64> {
        self.0
    }
}

impl FromStr for IntList {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        s.split(',')
            .map(str::parse::<i64>)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for IntList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

impl Deref for IntList {
    type Target = Vec<i64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for IntList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<i64> for IntList {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<i64>> for IntList {
    fn from(items: Vec<i64>) -> Self {
        Self(items)
    }
}

impl Kind for IntList {
    const NAME: &'static str = "int list";

    fn zero() -> Self {
        Self::default()
    }

    fn parse(text: &str) -> Result<Self, BoxError> {
        Ok(text.parse()?)
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

/// An absolute URL or a relative reference, kept as written.
///
/// Relative references (`/api`, `../x`, `?q=1`) are checked for syntax but
/// have no [`url::Url`] form; [`as_url`](Self::as_url) is `None` for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Url {
    text: String,
    absolute: Option<url::Url>,
}

impl Url {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_url(&self) -> Option<&url::Url> {
        self.absolute.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_relative(&self) -> bool {
        !self.text.is_empty() && self.absolute.is_none()
    }
}

impl FromStr for Url {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        match url::Url::parse(s) {
            Ok(absolute) => Ok(Self {
                text: s.to_string(),
                absolute: Some(absolute),
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                // Syntax check only; the joined URL is discarded.
                url::Url::parse("http://localhost/")?.join(s)?;
                Ok(Self {
                    text: s.to_string(),
                    absolute: None,
                })
            }
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<url::Url> for Url {
    fn from(url: url::Url) -> Self {
        Self {
            text: url.as_str().to_string(),
            absolute: Some(url),
        }
    }
}

impl Kind for Url {
    const NAME: &'static str = "url";

    fn zero() -> Self {
        Self::default()
    }

    fn parse(text: &str) -> Result<Self, BoxError> {
        Ok(text.parse()?)
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

/// An RFC 3339 instant. The zero value is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamp(Option<DateTime<FixedOffset>>);

impl Timestamp {
    pub fn get(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        DateTime::parse_from_rfc3339(s).map(|t| Self(Some(t)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(t) => f.write_str(&t.to_rfc3339()),
            None => Ok(()),
        }
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Self(Some(t))
    }
}

impl Kind for Timestamp {
    const NAME: &'static str = "timestamp";

    fn zero() -> Self {
        Self::default()
    }

    fn parse(text: &str) -> Result<Self, BoxError> {
        Ok(text.parse()?)
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

/// Serde support through the textual form.
macro_rules! serde_via_str {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let text = String::deserialize(deserializer)?;
                    text.parse().map_err(de::Error::custom)
                }
            }
        )*
    };
}

serde_via_str!(StringList, IntList, Url, Timestamp);
