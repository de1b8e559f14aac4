//! Configuration record for the clapenv demo.
//!
//! With the command name `cool`, every field below gets a flag and an
//! environment variable derived from its path:
//!
//! | Field                       | Flag                          | Env var                          |
//! |-----------------------------|-------------------------------|----------------------------------|
//! | `env`                       | `-env`                        | `COOL_ENV`                       |
//! | `mongo.max_pool_size`       | `-mongo-max-pool-size`        | `COOL_MONGO_MAX_POOL_SIZE`       |
//! | `jwt.token_expiration`      | `-jwt-token-expiration`       | `COOL_JWT_TOKEN_EXPIRATION`      |
//! | `aws.region`                | `-aws-region`                 | `COOL_AWS_REGION`                |
//! | `start`                     | `-start`                      | `COOL_START`                     |

use std::time::Duration;

use clapenv::{ClapenvError, Field, Record, StringList, Timestamp, Walk};
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
pub struct DemoConfig {
    pub env: String,
    pub port: u32,
    pub mongo: MongoConfig,
    pub jwt: JwtConfig,
    pub aws: AwsConfig,
    pub start: Timestamp,
}

#[derive(Debug, Default, Serialize)]
pub struct MongoConfig {
    pub hosts: StringList,
    #[serde(with = "humantime_text")]
    pub connection_timeout: Duration,
    pub replica_set: String,
    pub max_pool_size: u64,
    pub tls: bool,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Default, Serialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(with = "humantime_text")]
    pub token_expiration: Duration,
    #[serde(with = "humantime_text")]
    pub refresh_token_expiration: Duration,
}

#[derive(Debug, Default, Serialize)]
pub struct AwsConfig {
    pub region: String,
}

impl Record for DemoConfig {
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
        w.nested(Field::new("AWS"), &mut self.aws)?;
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
        w.field(Field::new("Username"), &mut self.username)?;
        w.field(Field::new("Password"), &mut self.password)?;
        w.field(Field::new("Database").def("cool"), &mut self.database)
    }
}

impl Record for JwtConfig {
    fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
        w.field(Field::new("Secret"), &mut self.secret)?;
        w.field(
            Field::new("TokenExpiration").def("24h"),
            &mut self.token_expiration,
        )?;
        w.field(
            Field::new("RefreshTokenExpiration").def("168h"),
            &mut self.refresh_token_expiration,
        )
    }
}

impl Record for AwsConfig {
    fn walk(&mut self, w: &mut Walk<'_>) -> Result<(), ClapenvError> {
        w.field(Field::new("Region").def("eu-central-1"), &mut self.region)
    }
}

/// Durations print in the same syntax the flags accept.
mod humantime_text {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }
}
