//! # clapenv demo application
//!
//! Resolves the `cool` service configuration and prints it as JSON. It exists
//! to exercise clapenv by hand.
//!
//! ## Running
//!
//! | Feature                 | How to exercise it                                                        |
//! |-------------------------|---------------------------------------------------------------------------|
//! | Declared defaults       | `cargo run --example clapenv_demo`                                        |
//! | Env var override        | `COOL_PORT=8080 cargo run --example clapenv_demo`                         |
//! | Nested env var          | `COOL_MONGO_HOSTS=a,b cargo run --example clapenv_demo`                   |
//! | Flag over env           | `COOL_PORT=8080 cargo run --example clapenv_demo -- -port 9090`           |
//! | Bare boolean switch     | `cargo run --example clapenv_demo -- -mongo-tls`                          |
//! | Positional arguments    | `cargo run --example clapenv_demo -- -port 1 migrate up`                  |
//! | Usage text              | `cargo run --example clapenv_demo -- -help`                               |
//! | Resolution trace        | `RUST_LOG=clapenv=debug cargo run --example clapenv_demo`                 |

mod config;

use clapenv::Clapenv;
use tracing_subscriber::EnvFilter;

use config::DemoConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = DemoConfig::default();
    // The default Exit policy prints errors and usage itself.
    let args = match Clapenv::builder().name("cool").parse(&mut config) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("cool: {err}");
            std::process::exit(clapenv::EXIT_CODE);
        }
    };

    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("cool: {err}"),
    }
    if !args.is_empty() {
        println!("args: {}", args.join(" "));
    }
}
