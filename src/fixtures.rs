#[cfg(test)]
pub mod test {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::io::{self, Write};
    use std::rc::Rc;
    use std::time::Duration;

    use crate::error::{BoxError, ClapenvError};
    use crate::field::Field;
    use crate::kind::Kind;
    use crate::value::{StringList, Timestamp, Url};
    use crate::walk::{Record, Walk};

    /// Environment stub built from literal pairs.
    pub fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + 'static {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    /// Environment stub that records how many lookups it served.
    pub fn counting_env(pairs: &[(&str, &str)]) -> (impl Fn(&str) -> Option<String>, Rc<Cell<usize>>) {
        let inner = env(pairs);
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let lookup = move |key: &str| {
            seen.set(seen.get() + 1);
            inner(key)
        };
        (lookup, count)
    }

    /// In-memory output stream that can be inspected after it was handed over.
    #[derive(Clone, Default)]
    pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

    impl SharedOutput {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // -- Single field ----------------------------------------------------------

    #[derive(Debug, Default, PartialEq)]
    pub struct PortConfig {
        pub port: isize,
    }

    impl Record for PortConfig {
        fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            w.field(Field::new("Port").def("3000"), &mut self.port)
        }
    }

    // -- Nested namespaces -----------------------------------------------------

    #[derive(Debug, Default)]
    pub struct BasicConfig {
        pub host: String,
        pub port: isize,
        pub db: DbConfig,
        pub start: Timestamp,
    }

    #[derive(Debug, Default)]
    pub struct DbConfig {
        pub kind: String,
        pub postgres: PostgresConfig,
        pub mongo: MongoHosts,
    }

    #[derive(Debug, Default)]
    pub struct PostgresConfig {
        pub host: String,
    }

    #[derive(Debug, Default)]
    pub struct MongoHosts {
        pub host: StringList,
    }

    impl Record for BasicConfig {
        fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            w.field(Field::new("Host"), &mut self.host)?;
            w.field(Field::new("Port"), &mut self.port)?;
            w.nested(Field::new("DB"), &mut self.db)?;
            w.field(Field::new("Start"), &mut self.start)
        }
    }

    impl Record for DbConfig {
        fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            w.field(Field::new("Kind"), &mut self.kind)?;
            w.nested(Field::new("Postgres"), &mut self.postgres)?;
            w.nested(Field::new("Mongo"), &mut self.mongo)
        }
    }

    impl Record for PostgresConfig {
        fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            w.field(Field::new("Host"), &mut self.host)
        }
    }

    impl Record for MongoHosts {
        fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            w.field(Field::new("Host"), &mut self.host)
        }
    }

    // -- Every built-in kind with a declared default ---------------------------

    #[derive(Debug, Default)]
    pub struct ServiceConfig {
        pub env: String,
        pub port: u32,
        pub mongo: MongoConfig,
        pub jwt: JwtConfig,
        pub api: Url,
        pub weights: crate::value::IntList,
        pub ratio: f64,
        pub offset: i64,
        pub start: Timestamp,
    }

    #[derive(Debug, Default)]
    pub struct MongoConfig {
        pub hosts: StringList,
        pub connection_timeout: Duration,
        pub replica_set: String,
        pub max_pool_size: u64,
        pub tls: bool,
        pub database: String,
    }

    #[derive(Debug, Default)]
    pub struct JwtConfig {
        pub secret: String,
        pub token_expiration: Duration,
    }

    impl Record for ServiceConfig {
        fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            w.field(
                Field::new("Env")
                    .help("environment [development|production]")
                    .def("development"),
                &mut self.env,
            )?;
            w.field(Field::new("Port").def("3000"), &mut self.port)?;
            w.nested(Field::new("Mongo"), &mut self.mongo)?;
            w.nested(Field::new("JWT"), &mut self.jwt)?;
            w.field(Field::new("API").def("https://api.example.com/v1"), &mut self.api)?;
            w.field(Field::new("Weights").def("1,-2,3"), &mut self.weights)?;
            w.field(Field::new("Ratio").def("0.5"), &mut self.ratio)?;
            w.field(Field::new("Offset").def("-7"), &mut self.offset)?;
            w.field(
                Field::new("Start").def("2002-10-02T10:00:00-05:00"),
                &mut self.start,
            )
        }
    }

    impl Record for MongoConfig {
        fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            w.field(Field::new("Hosts").def("mongo"), &mut self.hosts)?;
            w.field(
                Field::new("ConnectionTimeout").def("10s"),
                &mut self.connection_timeout,
            )?;
            w.field(Field::new("ReplicaSet"), &mut self.replica_set)?;
            w.field(Field::new("MaxPoolSize").def("100"), &mut self.max_pool_size)?;
            w.field(Field::new("TLS"), &mut self.tls)?;
            w.field(Field::new("Database").def("cool"), &mut self.database)
        }
    }

    impl Record for JwtConfig {
        fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            w.field(Field::new("Secret").env("JWT_SECRET"), &mut self.secret)?;
            w.field(
                Field::new("TokenExpiration").flag("ttl").def("24h"),
                &mut self.token_expiration,
            )
        }
    }

    // -- Failure cases ---------------------------------------------------------

    /// A map between two supported fields.
    #[derive(Debug, Default)]
    pub struct MapConfig {
        pub port: u16,
        pub labels: HashMap<String, String>,
        pub after: String,
    }

    impl Record for MapConfig {
        fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            w.field(Field::new("Port").def("3000"), &mut self.port)?;
            w.field(Field::new("Labels"), &mut self.labels)?;
            w.field(Field::new("After").def("x"), &mut self.after)
        }
    }

    /// Two namespaces whose fields derive the same flag name.
    #[derive(Debug, Default)]
    pub struct ClashConfig {
        pub db_host: String,
        pub db: PostgresConfig,
    }

    impl Record for ClashConfig {
        fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            w.field(Field::new("DBHost"), &mut self.db_host)?;
            w.nested(Field::new("DB"), &mut self.db)
        }
    }

    // -- Caller-defined kind ---------------------------------------------------

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub enum Level {
        #[default]
        Info,
        Debug,
    }

    impl Kind for Level {
        const NAME: &'static str = "level";

        fn zero() -> Self {
            Level::Info
        }

        fn parse(text: &str) -> Result<Self, BoxError> {
            match text.to_ascii_lowercase().as_str() {
                "info" => Ok(Level::Info),
                "debug" => Ok(Level::Debug),
                other => Err(format!("unknown level {other}").into()),
            }
        }

        fn render(&self) -> String {
            match self {
                Level::Info => "info".into(),
                Level::Debug => "debug".into(),
            }
        }
    }

    /// Treating a value kind as a record is a caller mistake the walker
    /// reports instead of recursing into.
    impl Record for Level {
        fn walk(&mut self, _w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    pub struct LevelConfig {
        pub level: Level,
        pub nested_level: Level,
    }

    impl Record for LevelConfig {
        fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
            w.field(Field::new("Level").def("debug"), &mut self.level)?;
            w.nested(Field::new("NestedLevel"), &mut self.nested_level)
        }
    }
}
