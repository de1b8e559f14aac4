//! Per-field metadata: the name a record declares a field under, plus the
//! optional overrides for flag name, environment variable, usage text and
//! default value.

/// Descriptor for one field of a [`Record`](crate::Record).
///
/// Built with `const` methods so records can keep their descriptors in
/// constants next to the struct definition:
///
/// ```
/// use clapenv::Field;
///
/// const PORT: Field = Field::new("Port").def("3000").help("listen port");
/// assert_eq!(PORT.name(), "Port");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    flag: Option<&'static str>,
    env: Option<&'static str>,
    help: Option<&'static str>,
    def: Option<&'static str>,
}

impl Field {
    /// A field with no overrides. `name` drives every derived name, in any
    /// casing (`MaxPoolSize` and `max_pool_size` derive the same names).
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            flag: None,
            env: None,
            help: None,
            def: None,
        }
    }

    /// Use `flag` verbatim as the command-line flag name.
    pub const fn flag(mut self, flag: &'static str) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Use `env` verbatim as the environment variable name.
    pub const fn env(mut self, env: &'static str) -> Self {
        self.env = Some(env);
        self
    }

    /// Usage text shown instead of the one derived from the field name.
    pub const fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Default value as text, parsed like an environment value would be.
    pub const fn def(mut self, def: &'static str) -> Self {
        self.def = Some(def);
        self
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn flag_override(&self) -> Option<&'static str> {
        self.flag.filter(|f| !f.is_empty())
    }

    pub(crate) fn env_override(&self) -> Option<&'static str> {
        self.env.filter(|e| !e.is_empty())
    }

    pub(crate) fn help_override(&self) -> Option<&'static str> {
        self.help.filter(|h| !h.is_empty())
    }

    /// The declared default; a missing default reads as empty text.
    pub(crate) fn default_text(&self) -> &'static str {
        self.def.unwrap_or("")
    }
}
