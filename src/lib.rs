#![recursion_limit = "1024"]
#![allow(renamed_and_removed_lints)]
#![allow(non_snake_case)]

#[macro_use]
extern crate serde_derive;
extern crate serde;
extern crate serde_json;
extern crate serde_yaml;

#[macro_use]
extern crate log;

extern crate regex;

#[macro_use]
extern crate error_chain;
error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }
    links {}
    foreign_links {
        Fmt(::std::fmt::Error);
        Io(::std::io::Error) #[cfg(unix)];
        Float(::std::num::ParseFloatError);
        Int(::std::num::ParseIntError);
        SerdeY(serde_yaml::Error);
        SerdeJ(serde_json::Error);
    }
    errors {
        ValueError(key: String) {
            description("environment value missing or malformed")
            display("ENV '{}' must be set, non-empty and well-formed", &key)
        }
        InvalidConfig(kind: String, name: String) {
            description("config does not verify")
            display("{} config '{}' does not verify", &kind, &name)
        }
        InvalidLogLevel(level: String) {
            description("unknown log level")
            display("unknown log level '{}'", &level)
        }
        UnknownKind(kind: String) {
            description("unknown resource kind")
            display("unknown resource kind '{}'", &kind)
        }
        PasswordGeneration(reason: String) {
            description("password could not be generated")
            display("failed to generate password: {}", &reason)
        }
    }
}

/// Typed configuration inputs for every resource kind
pub mod structs;
pub use structs::{
    BackendPort, ConfigMapConfig, ExternalSecretConfig, ProbeSpec, PullPolicy, PushSecretConfig,
    RoutingConfig, SecretConfig, Verify, WorkloadConfig,
};

/// External secrets custom resources
pub mod crds;
pub use crds::{ExternalSecret, PushSecret};

/// The manifest builders
pub mod generate;
pub use generate::{
    build_config_map, build_external_secret, build_push_secret, build_route, build_secret,
    build_workload, build_workload_with, Kind, Manifest,
};

/// Strict environment variable getters
pub mod env;

/// Explicit structured logging handle
pub mod logging;
pub use logging::Logger;

/// Checksums and passwords
pub mod util;

use std::fs;
use std::path::Path;

/// Read a yaml config file into one of the config structs
pub fn load_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let data = fs::read_to_string(path)
        .chain_err(|| format!("failed to read config {}", path.display()))?;
    let res = serde_yaml::from_str(&data)
        .chain_err(|| format!("failed to parse config {}", path.display()))?;
    debug!("Loaded config from {}", path.display());
    Ok(res)
}
