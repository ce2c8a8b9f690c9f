//! This module provides the shopgraph engine, including supporting modules for configuration,
//! the fixture-backed data store, the resolvers that join the collections, and the GraphQL
//! schema served on top of them.

use crate::error::Error;
use context::GraphQLContext;
use juniper::http::GraphQLRequest;
use juniper::InputValue;
use log::{debug, trace, warn};
use schema::{create_root_node, RootRef};
use serde_json::json;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use store::DataStore;

pub mod config;
pub mod context;
pub mod limits;
pub mod objects;
pub mod resolvers;
pub mod schema;
pub mod store;

/// Builder for an [`Engine`], returned by [`Engine::new`]. Optional settings are added before
/// calling [`build`].
///
/// [`Engine`]: ./struct.Engine.html
/// [`Engine::new`]: ./struct.Engine.html#method.new
/// [`build`]: #method.build
#[derive(Clone, Debug)]
pub struct EngineBuilder {
    store: Arc<DataStore>,
    version: Option<String>,
    max_depth: Option<usize>,
}

impl EngineBuilder {
    /// Sets the version of the app, made available to resolvers through the context
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shopgraph::engine::Engine;
    /// use shopgraph::engine::store::DataStore;
    ///
    /// let engine = Engine::new(DataStore::default())
    ///     .with_version("1.0.0".to_string())
    ///     .build();
    ///
    /// assert_eq!(Some("1.0.0"), engine.version());
    /// ```
    pub fn with_version(mut self, version: String) -> EngineBuilder {
        self.version = Some(version);
        self
    }

    /// Sets the deepest selection nesting the engine accepts. `None` disables the check. The
    /// default is the same as the configuration file default.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shopgraph::engine::Engine;
    /// use shopgraph::engine::store::DataStore;
    ///
    /// let engine = Engine::new(DataStore::default())
    ///     .with_max_depth(None)
    ///     .build();
    ///
    /// assert_eq!(None, engine.max_depth());
    /// ```
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> EngineBuilder {
        self.max_depth = max_depth;
        self
    }

    /// Builds the [`Engine`], creating the GraphQL root node once for all requests.
    ///
    /// [`Engine`]: ./struct.Engine.html
    pub fn build(self) -> Engine {
        Engine {
            store: self.store,
            version: self.version,
            max_depth: self.max_depth,
            root_node: create_root_node(),
        }
    }
}

/// A shopgraph GraphQL engine.
///
/// The [`Engine`] serves the read-only shop schema over a shared [`DataStore`]. It is cheap to
/// clone; clones share the store and the schema.
///
/// [`DataStore`]: ./store/struct.DataStore.html
/// [`Engine`]: ./struct.Engine.html
///
/// # Examples
///
/// ```rust
/// use shopgraph::engine::Engine;
/// use shopgraph::engine::store::DataStore;
///
/// let engine = Engine::new(DataStore::default()).build();
/// ```
#[derive(Clone)]
pub struct Engine {
    store: Arc<DataStore>,
    version: Option<String>,
    max_depth: Option<usize>,
    root_node: RootRef,
}

impl Engine {
    /// Creates a new [`EngineBuilder`] over `store`. The store may be passed by value or already
    /// wrapped in an `Arc`.
    ///
    /// [`EngineBuilder`]: ./struct.EngineBuilder.html
    #[allow(clippy::new_ret_no_self)]
    pub fn new<S>(store: S) -> EngineBuilder
    where
        S: Into<Arc<DataStore>>,
    {
        EngineBuilder {
            store: store.into(),
            version: None,
            max_depth: config::Limits::default().max_depth,
        }
    }

    /// Executes a GraphQL `query`, with optional JSON `variables` and `operation_name`, and
    /// returns the GraphQL response, including any `errors`, as a `serde_json::Value`.
    ///
    /// A query nested deeper than the configured limit is not executed. Its response holds a
    /// single error describing the violation.
    ///
    /// # Errors
    ///
    /// Returns a [`SerializationFailed`] error if `variables` is not a JSON object of GraphQL
    /// input values, or if the response cannot be converted to JSON.
    ///
    /// [`SerializationFailed`]: ../error/enum.Error.html#variant.SerializationFailed
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use shopgraph::engine::Engine;
    /// use shopgraph::engine::store::DataStore;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), shopgraph::Error> {
    /// let engine = Engine::new(DataStore::default()).build();
    /// let res = engine.execute("{ shops { ID } }".to_string(), None, None).await?;
    ///
    /// assert_eq!(0, res["data"]["shops"].as_array().unwrap().len());
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(level = "info", name = "shop-execute", skip(self, variables))]
    pub async fn execute(
        &self,
        query: String,
        variables: Option<serde_json::Value>,
        operation_name: Option<String>,
    ) -> Result<serde_json::Value, Error> {
        trace!(
            "Engine::execute called -- query: {}, variables: {:#?}, operation_name: {:#?}",
            query,
            variables,
            operation_name
        );

        if let Err(e) = limits::check_depth(&query, operation_name.as_deref(), self.max_depth) {
            warn!("Engine::execute -- query rejected: {}", e);
            return Ok(json!({ "errors": [ { "message": e.to_string() } ] }));
        }

        let variables = match variables {
            Some(serde_json::Value::Null) | None => None,
            Some(v @ serde_json::Value::Object(_)) => Some(serde_json::from_value::<InputValue>(v)?),
            Some(_) => {
                return Err(Error::SerializationFailed {
                    source: serde::de::Error::custom("variables must be a JSON object"),
                })
            }
        };

        let req = GraphQLRequest::new(query, operation_name, variables);
        let ctx = GraphQLContext::new(self.store.clone(), self.version.clone());
        let res = req.execute(&*self.root_node, &ctx).await;

        let res_value = serde_json::to_value(&res)?;
        debug!("Engine::execute -- response: {}", res_value);

        Ok(res_value)
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

impl Debug for Engine {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("version", &self.version)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl Display for Engine {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine {{ version: {}, products: {}, shops: {}, orders: {}, line_items: {} }}",
            self.version.as_deref().unwrap_or("unversioned"),
            self.store.products().len(),
            self.store.shops().len(),
            self.store.orders().len(),
            self.store.line_items().len()
        )
    }
}
