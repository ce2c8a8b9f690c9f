//! This module provides the shopgraph client.

use crate::{Engine, Error};
use inflector::Inflector;
use log::{debug, trace};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// A shopgraph GraphQL client
///
/// The [`Client`] sends GraphQL queries either to a remote shopgraph server over HTTP or
/// directly to an in-process [`Engine`], and unwraps the `data` object of the response.
///
/// [`Client`]: ./enum.Client.html
/// [`Engine`]: ../engine/struct.Engine.html
///
/// # Examples
///
/// ```rust
/// # use shopgraph::Client;
///
/// let client = Client::new_with_http("http://localhost:8081/graphql", None).unwrap();
/// ```
#[derive(Clone, Debug)]
pub enum Client {
    Http { endpoint: String, headers: HeaderMap },
    Local { engine: Box<Engine> },
}

impl Client {
    /// Takes the URL of a shopgraph service endpoint and returns a new [`Client`] initialized to
    /// query that endpoint. Optional `headers` are sent with every request.
    ///
    /// [`Client`]: ./enum.Client.html
    ///
    /// # Errors
    ///
    /// * [`InvalidHeaderName`] - if a header name is not valid for HTTP
    /// * [`InvalidHeaderValue`] - if a header value is not valid for HTTP
    ///
    /// [`InvalidHeaderName`]: ../error/enum.Error.html#variant.InvalidHeaderName
    /// [`InvalidHeaderValue`]: ../error/enum.Error.html#variant.InvalidHeaderValue
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shopgraph::Client;
    /// # use std::collections::HashMap;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert("Authorization", "Bearer 1234");
    ///
    /// let client = Client::new_with_http("http://localhost:8081/graphql", Some(headers)).unwrap();
    /// ```
    pub fn new_with_http(
        endpoint: &str,
        headers_opt: Option<HashMap<&str, &str>>,
    ) -> Result<Client, Error> {
        trace!("Client::new_with_http called -- endpoint: {}", endpoint);

        let mut header_map = HeaderMap::new();
        if let Some(headers) = headers_opt {
            for (key, value) in headers {
                let header_name = HeaderName::from_str(key)
                    .map_err(|e| Error::InvalidHeaderName { source: e })?;
                let header_value = HeaderValue::from_str(value)
                    .map_err(|e| Error::InvalidHeaderValue { source: e })?;
                header_map.insert(header_name, header_value);
            }
        }

        Ok(Client::Http {
            endpoint: endpoint.to_string(),
            headers: header_map,
        })
    }

    /// Takes a shopgraph engine and returns a new [`Client`] that executes queries on it
    /// in-process, without a server.
    ///
    /// [`Client`]: ./enum.Client.html
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shopgraph::{Client, DataStore, Engine};
    ///
    /// let engine = Engine::new(DataStore::default()).build();
    /// let client = Client::new_with_engine(engine);
    /// ```
    pub fn new_with_engine(engine: Engine) -> Client {
        trace!("Client::new_with_engine called");
        Client::Local {
            engine: Box::new(engine),
        }
    }

    /// Executes a graphql query
    ///
    /// # Arguments
    ///
    /// * query - text of the query
    /// * variables - an optional [`serde_json::Value`], specifically a Value::Object, holding
    /// the values of the query's variables
    /// * result_field - an optional name of a field under 'data' that holds the GraphQL response.
    /// If present, the object with name `result_field` under `data` will be returned. If `None`,
    /// the `data` object will be returned.
    ///
    /// # Return
    ///
    /// A [`serde_json::Value`] containing the query response. Field errors reported alongside
    /// `data` are dropped; use [`graphql_response`] to inspect them.
    ///
    /// [`graphql_response`]: #method.graphql_response
    ///
    /// # Errors
    ///
    /// * [`ClientRequestFailed`] - if the HTTP response is a non-OK
    /// * [`PayloadNotFound`] - if the JSON response body is not a valid GraphQL
    /// response, or lacks the requested field
    ///
    /// [`ClientRequestFailed`]: ../error/enum.Error.html#variant.ClientRequestFailed
    /// [`PayloadNotFound`]: ../error/enum.Error.html#variant.PayloadNotFound
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use shopgraph::Client;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let client = Client::new_with_http("http://localhost:8081/graphql", None).unwrap();
    ///
    /// let shops = client.graphql("query { shops { ID Name } }", None, Some("shops")).await;
    /// # }
    /// ```
    pub async fn graphql(
        &self,
        query: &str,
        variables: Option<&Value>,
        result_field_opt: Option<&str>,
    ) -> Result<Value, Error> {
        trace!(
            "Client::graphql called -- query: {} | variables: {:#?} | result_field: {:#?}",
            query,
            variables,
            result_field_opt,
        );

        let mut body = self.graphql_response(query, variables).await?;

        if let Some(result_field) = result_field_opt {
            body.as_object_mut()
                .and_then(|m| m.remove("data"))
                .and_then(|mut d| d.as_object_mut().and_then(|dm| dm.remove(result_field)))
                .ok_or_else(|| Error::PayloadNotFound {
                    response: body.to_owned(),
                })
        } else {
            body.as_object_mut()
                .and_then(|m| m.remove("data"))
                .ok_or_else(|| Error::PayloadNotFound {
                    response: body.to_owned(),
                })
        }
    }

    /// Executes a graphql query and returns the whole response, holding `data` and `errors`
    ///
    /// # Errors
    ///
    /// * [`ClientRequestFailed`] - if the HTTP response is a non-OK
    ///
    /// [`ClientRequestFailed`]: ../error/enum.Error.html#variant.ClientRequestFailed
    pub async fn graphql_response(
        &self,
        query: &str,
        variables: Option<&Value>,
    ) -> Result<Value, Error> {
        let req_body = json!({
            "query": query.to_string(),
            "variables": variables
        });

        debug!("Client::graphql_response making request -- req_body: {}", req_body);
        let body = match self {
            Client::Http { endpoint, headers } => {
                let client = reqwest::Client::new();
                let response = client
                    .post(endpoint.as_str())
                    .headers(headers.clone())
                    .json(&req_body)
                    .send()
                    .await?
                    .error_for_status()?;
                response.json::<serde_json::Value>().await?
            }
            Client::Local { engine } => {
                engine
                    .execute(query.to_string(), variables.cloned(), None)
                    .await?
            }
        };
        debug!("Client::graphql_response -- response body: {:#?}", body);

        Ok(body)
    }

    /// Reads a whole collection
    ///
    /// # Arguments
    ///
    /// * type_name - the name of the GraphQL object type whose collection is read, such as
    /// `LineItem`
    /// * shape - the GraphQL query shape, meaning the selection of fields to be returned for each
    /// record
    ///
    /// # Return
    ///
    /// A [`serde_json::Value`] array holding the records
    ///
    /// # Errors
    ///
    /// * [`ClientRequestFailed`] - if the HTTP response is a non-OK
    /// * [`PayloadNotFound`] - if the JSON response body is not a valid GraphQL
    /// response
    ///
    /// [`ClientRequestFailed`]: ../error/enum.Error.html#variant.ClientRequestFailed
    /// [`PayloadNotFound`]: ../error/enum.Error.html#variant.PayloadNotFound
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use shopgraph::Client;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let client = Client::new_with_http("http://localhost:8081/graphql", None).unwrap();
    ///
    /// let line_items = client.read_collection("LineItem", "ID Quantity").await;
    /// # }
    /// ```
    pub async fn read_collection(&self, type_name: &str, shape: &str) -> Result<Value, Error> {
        trace!(
            "Client::read_collection called -- type_name: {} | shape: {}",
            type_name,
            shape
        );

        let query = Client::fmt_read_collection_query(type_name, shape);
        let result_field = Client::collection_field(type_name);
        self.graphql(&query, None, Some(&result_field)).await
    }

    fn collection_field(type_name: &str) -> String {
        type_name.to_camel_case().to_plural()
    }

    fn fmt_read_collection_query(type_name: &str, shape: &str) -> String {
        format!(
            "query Read {{ {field} {{ {shape} }} }}",
            field = Client::collection_field(type_name),
            shape = shape
        )
    }
}

impl Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::result::Result<(), std::fmt::Error> {
        match self {
            Self::Http { endpoint, headers } => {
                write!(f, "{}, headers = {:#?}", endpoint, headers)
            }
            Self::Local { engine } => write!(f, "{}", engine),
        }
    }
}
