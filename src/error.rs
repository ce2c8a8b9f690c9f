//! Provides the [`Error`] type for shopgraph

use std::fmt::{Display, Formatter};
use std::num::ParseIntError;

/// Error type for shopgraph
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use shopgraph::Error;
///
/// let e = Error::PayloadNotFound { response: json!{"surprise"} };
/// ```
#[derive(Debug)]
pub enum Error {
    /// Returned if the server cannot bind to the configured address. The `addr` field contains
    /// the address that could not be bound.
    AddrNotAvailable {
        addr: String,
        source: std::io::Error,
    },

    /// Returned if a line item's total is requested, but no product carries the line item in its
    /// association list. The `line_item_id` field holds the ID of the orphaned line item. This
    /// error is confined to the field being resolved and does not abort the rest of the query.
    AssociatedProductNotFound { line_item_id: String },

    /// Returned if a [`Client`] is unable to submit a request to the server, such as due to a
    /// network or server error, or the response cannot be parsed as valid JSON. Inspect the
    /// [`reqwest::Error`] included as a source error for additional detail.
    ///
    /// [`Client`]: ./client/enum.Client.html
    ClientRequestFailed { source: reqwest::Error },

    /// Returned if a configuration item holds a value that cannot be used, such as a route path
    /// that doesn't start with a slash. The `name` field is the configuration item, and `reason`
    /// describes the problem.
    ConfigItemInvalid { name: String, reason: String },

    /// Returned if a `Configuration` file cannot be opened, typically because the configuration
    /// file cannot be found on disk
    ConfigOpenFailed { source: std::io::Error },

    /// Returned if a `Configuration` declares a format version other than the one supported. The
    /// field `expected` contains the supported version, and `found` the version in the file.
    ConfigVersionMismatched { expected: i32, found: i32 },

    /// Returned if a `Configuration` fails to deserialize because the provided data does not
    /// match the expected data structure
    DeserializationFailed { source: serde_yaml::Error },

    /// Returned if an environment variable for a port number cannot be parsed from the
    /// environment variable string into a number
    EnvironmentVariableNotParsed { source: ParseIntError },

    /// Returned if a fixture file fails to parse as an array of records of the expected shape.
    /// The `collection` field names the collection being loaded.
    FixtureDeserializationFailed {
        collection: String,
        source: serde_json::Error,
    },

    /// Returned if a fixture file cannot be opened. The `path` field contains the path that was
    /// tried.
    FixtureOpenFailed {
        path: String,
        source: std::io::Error,
    },

    /// Returned if two records within one fixture collection share the same identifier, once
    /// normalized to a string.
    IdDuplicated { collection: String, id: String },

    /// Returned if a [`Client`] is given a header name that is not valid for HTTP
    ///
    /// [`Client`]: ./client/enum.Client.html
    InvalidHeaderName {
        source: reqwest::header::InvalidHeaderName,
    },

    /// Returned if a [`Client`] is given a header value that is not valid for HTTP
    ///
    /// [`Client`]: ./client/enum.Client.html
    InvalidHeaderValue {
        source: reqwest::header::InvalidHeaderValue,
    },

    /// Returned if a [`Client`] receives a valid JSON response that does not contain the
    /// expected 'data' object, or the requested field beneath it.
    ///
    /// The `response` field contains the deserialized JSON response.
    ///
    /// [`Client`]: ./client/enum.Client.html
    PayloadNotFound { response: serde_json::Value },

    /// Returned if a query nests selections more deeply than the engine permits. The `depth`
    /// field holds the measured depth and `max_depth` the configured limit.
    QueryDepthExceeded { depth: usize, max_depth: usize },

    /// Returned if a query nests so deeply that the parser gives up before its depth can be
    /// measured. The `limit` field holds the parser's recursion limit.
    QueryNestingLimitReached { limit: usize },

    /// Returned if a GraphQL request or response cannot be converted to or from a
    /// serde_json::Value
    SerializationFailed { source: serde_json::Error },

    /// Returned if the HTTP server stops with an I/O error after it has been bound
    ServerFailed { source: std::io::Error },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Error::AddrNotAvailable { addr, source } => {
                write!(f, "Could not bind server to {}. Source error: {}", addr, source)
            }
            Error::AssociatedProductNotFound { line_item_id } => {
                write!(f, "No product is associated with line item {}", line_item_id)
            }
            Error::ClientRequestFailed { source } => {
                write!(f, "Client request failed. Source error: {}", source)
            }
            Error::ConfigItemInvalid { name, reason } => {
                write!(f, "Config item {} is invalid: {}", name, reason)
            }
            Error::ConfigOpenFailed { source } => {
                write!(f, "Config file could not be opened. Source error: {}", source)
            }
            Error::ConfigVersionMismatched { expected, found } => {
                write!(f, "Config version not supported: expected {} but found {}", expected, found)
            }
            Error::DeserializationFailed { source } => {
                write!(f, "Failed to deserialize configuration. Source error: {}", source)
            }
            Error::EnvironmentVariableNotParsed { source } => {
                write!(f, "Failed to parse environment variable to integer port number. Source error: {}", source)
            }
            Error::FixtureDeserializationFailed { collection, source } => {
                write!(f, "Failed to deserialize {} fixture. Source error: {}", collection, source)
            }
            Error::FixtureOpenFailed { path, source } => {
                write!(f, "Fixture file {} could not be opened. Source error: {}", path, source)
            }
            Error::IdDuplicated { collection, id } => {
                write!(f, "Fixture collection {} contains duplicate ID: {}", collection, id)
            }
            Error::InvalidHeaderName { source } => {
                write!(f, "Invalid HTTP header name. Source error: {}", source)
            }
            Error::InvalidHeaderValue { source } => {
                write!(f, "Invalid HTTP header value. Source error: {}", source)
            }
            Error::PayloadNotFound { response } => {
                write!(f, "Required data field is missing from the response: {}", response)
            }
            Error::QueryDepthExceeded { depth, max_depth } => {
                write!(f, "Query depth {} exceeds the maximum allowed depth of {}", depth, max_depth)
            }
            Error::QueryNestingLimitReached { limit } => {
                write!(f, "Query nesting exceeds the parser recursion limit of {}", limit)
            }
            Error::SerializationFailed { source } => {
                write!(f, "Serialization of the GraphQL request or response failed. Source error: {}", source)
            }
            Error::ServerFailed { source } => {
                write!(f, "Server stopped with an error. Source error: {}", source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::AddrNotAvailable { addr: _, source } => Some(source),
            Error::AssociatedProductNotFound { line_item_id: _ } => None,
            Error::ClientRequestFailed { source } => Some(source),
            Error::ConfigItemInvalid { name: _, reason: _ } => None,
            Error::ConfigOpenFailed { source } => Some(source),
            Error::ConfigVersionMismatched {
                expected: _,
                found: _,
            } => None,
            Error::DeserializationFailed { source } => Some(source),
            Error::EnvironmentVariableNotParsed { source } => Some(source),
            Error::FixtureDeserializationFailed {
                collection: _,
                source,
            } => Some(source),
            Error::FixtureOpenFailed { path: _, source } => Some(source),
            Error::IdDuplicated {
                collection: _,
                id: _,
            } => None,
            Error::InvalidHeaderName { source } => Some(source),
            Error::InvalidHeaderValue { source } => Some(source),
            Error::PayloadNotFound { response: _ } => None,
            Error::QueryDepthExceeded {
                depth: _,
                max_depth: _,
            } => None,
            Error::QueryNestingLimitReached { limit: _ } => None,
            Error::SerializationFailed { source } => Some(source),
            Error::ServerFailed { source } => Some(source),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::ClientRequestFailed { source: e }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::DeserializationFailed { source: e }
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        Error::EnvironmentVariableNotParsed { source: e }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationFailed { source: e }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    /// Passes if a new error with no wrapped source error is created
    #[test]
    fn new_error() {
        let e = Error::AssociatedProductNotFound {
            line_item_id: "L1".to_string(),
        };

        assert!(std::error::Error::source(&e).is_none());
    }

    /// Passes if an error prints a display string correctly
    #[test]
    fn display_fmt() {
        let s = std::io::Error::new(std::io::ErrorKind::Other, "oh no!");
        let e = Error::ConfigOpenFailed { source: s };

        assert_eq!(
            "Config file could not be opened. Source error: oh no!",
            &format!("{}", e)
        );
    }

    /// Passes if a fixture error carries its io source
    #[test]
    fn fixture_open_source() {
        let s = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e = Error::FixtureOpenFailed {
            path: "data/products.json".to_string(),
            source: s,
        };

        assert!(std::error::Error::source(&e).is_some());
        assert_eq!(
            "Fixture file data/products.json could not be opened. Source error: missing",
            &format!("{}", e)
        );
    }

    /// Passes if a depth violation names both the depth and the limit
    #[test]
    fn depth_display() {
        let e = Error::QueryDepthExceeded {
            depth: 9,
            max_depth: 4,
        };

        assert_eq!(
            "Query depth 9 exceeds the maximum allowed depth of 4",
            &e.to_string()
        );
    }

    /// Passes if Error implements the Send trait
    #[test]
    fn test_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Error>();
    }

    /// Passes if Error implements the Sync trait
    #[test]
    fn test_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<Error>();
    }
}
