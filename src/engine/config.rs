//! Contains the configuration of a shopgraph service: where the fixture data lives, how the
//! HTTP server is exposed, and the limits applied to incoming queries.

use crate::error::Error;
use log::trace;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::env::var_os;
use std::fs::File;
use std::io::BufReader;

/// Version of the configuration file format understood by this crate
pub const CONFIG_VERSION: i32 = 1;

/// Convenience function for setting serde default value
fn get_true() -> bool {
    true
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8081
}

fn default_graphql_path() -> String {
    "/graphql".to_string()
}

fn default_graphiql_path() -> String {
    "/graphiql".to_string()
}

fn default_max_depth() -> Option<usize> {
    Some(15)
}

/// Configuration item for a shopgraph service.
///
/// # Examples
///
/// ```rust
/// use shopgraph::engine::config::Configuration;
/// use std::convert::TryFrom;
///
/// let config = Configuration::try_from("
/// version: 1
/// fixtures:
///   products: data/products.json
///   shops: data/shops.json
///   orders: data/orders.json
///   line_items: data/line_items.json
/// ".to_string()).unwrap();
///
/// assert_eq!(8081, config.server.bind_port);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Configuration {
    /// Version of the configuration file format used
    pub version: i32,

    /// Locations of the four fixture collections
    pub fixtures: Fixtures,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Limits applied to queries before they are executed
    #[serde(default)]
    pub limits: Limits,
}

impl Configuration {
    pub fn new(fixtures: Fixtures) -> Configuration {
        Configuration {
            version: CONFIG_VERSION,
            fixtures,
            server: ServerConfig::default(),
            limits: Limits::default(),
        }
    }

    /// Creates a new [`Configuration`] data structure from the contents of the specified config
    /// file. Returns error if the config file could not be opened or deserialized.
    ///
    /// [`Configuration`]: struct.Configuration.html
    pub fn from_file(path: &str) -> Result<Configuration, Error> {
        trace!("Configuration::from_file called -- path: {}", path);

        let f = File::open(path).map_err(|e| Error::ConfigOpenFailed { source: e })?;
        let r = BufReader::new(f);
        Ok(serde_yaml::from_reader(r)?)
    }

    /// Validates the [`Configuration`] data structure. Returns a Result<(), Error> where the
    /// error could be one of:
    ///
    /// - [`ConfigVersionMismatched`] if the file declares an unsupported format version.
    /// - [`ConfigItemInvalid`] if a route doesn't start with a slash, the GraphQL and GraphiQL
    /// routes collide, or the maximum query depth is zero.
    ///
    /// [`Configuration`]: struct.Configuration.html
    /// [`ConfigVersionMismatched`]: ../../error/enum.Error.html#variant.ConfigVersionMismatched
    /// [`ConfigItemInvalid`]: ../../error/enum.Error.html#variant.ConfigItemInvalid
    pub fn validate(&self) -> Result<(), Error> {
        if self.version != CONFIG_VERSION {
            return Err(Error::ConfigVersionMismatched {
                expected: CONFIG_VERSION,
                found: self.version,
            });
        }

        for (name, path) in &[
            ("server.graphql_path", &self.server.graphql_path),
            ("server.graphiql_path", &self.server.graphiql_path),
        ] {
            if !path.starts_with('/') {
                return Err(Error::ConfigItemInvalid {
                    name: name.to_string(),
                    reason: format!("route {} must start with '/'", path),
                });
            }
        }

        if self.server.graphiql && self.server.graphql_path == self.server.graphiql_path {
            return Err(Error::ConfigItemInvalid {
                name: "server.graphiql_path".to_string(),
                reason: "must differ from server.graphql_path".to_string(),
            });
        }

        if self.limits.max_depth == Some(0) {
            return Err(Error::ConfigItemInvalid {
                name: "limits.max_depth".to_string(),
                reason: "must be greater than zero, or null to disable the limit".to_string(),
            });
        }

        Ok(())
    }
}

impl TryFrom<String> for Configuration {
    type Error = Error;

    fn try_from(yaml: String) -> Result<Configuration, Error> {
        Ok(serde_yaml::from_str(&yaml)?)
    }
}

/// Paths to the JSON fixture file for each collection. Relative paths resolve against the
/// working directory of the process.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Fixtures {
    pub products: String,
    pub shops: String,
    pub orders: String,
    pub line_items: String,
}

impl Fixtures {
    /// Returns the conventional fixture file names inside directory `dir`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shopgraph::engine::config::Fixtures;
    ///
    /// let f = Fixtures::in_dir("data");
    /// assert_eq!("data/line_items.json", f.line_items);
    /// ```
    pub fn in_dir(dir: &str) -> Fixtures {
        let dir = dir.trim_end_matches('/');
        Fixtures {
            products: format!("{}/products.json", dir),
            shops: format!("{}/shops.json", dir),
            orders: format!("{}/orders.json", dir),
            line_items: format!("{}/line_items.json", dir),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,

    /// Serves the GraphiQL explorer when set
    #[serde(default = "get_true")]
    pub graphiql: bool,

    #[serde(default = "default_graphiql_path")]
    pub graphiql_path: String,
}

impl ServerConfig {
    /// Applies the `SHOP_BIND_ADDR` and `SHOP_BIND_PORT` environment variables, when set, on top
    /// of the configured values. Returns an [`EnvironmentVariableNotParsed`] error if the port is
    /// not a valid number.
    ///
    /// [`EnvironmentVariableNotParsed`]: ../../error/enum.Error.html#variant.EnvironmentVariableNotParsed
    pub fn with_env_overrides(mut self) -> Result<ServerConfig, Error> {
        if let Some(addr) = var_os("SHOP_BIND_ADDR").and_then(|os| os.into_string().ok()) {
            self.bind_addr = addr;
        }

        if let Some(port) = var_os("SHOP_BIND_PORT").and_then(|os| os.into_string().ok()) {
            self.bind_port = port.parse::<u16>()?;
        }

        Ok(self)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.bind_port)
    }
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig {
            bind_addr: default_bind_addr(),
            bind_port: default_bind_port(),
            graphql_path: default_graphql_path(),
            graphiql: true,
            graphiql_path: default_graphiql_path(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Limits {
    /// Deepest selection nesting accepted, or `None` to accept any depth
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,
}

impl Default for Limits {
    fn default() -> Limits {
        Limits {
            max_depth: default_max_depth(),
        }
    }
}
