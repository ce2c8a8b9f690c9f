//! This module provides a Juniper Context for shopgraph GraphQL queries. The context carries the
//! shared [`DataStore`] snapshot into the resolvers.
//!
//! [`DataStore`]: ../store/struct.DataStore.html

use crate::engine::resolvers::Resolver;
use crate::engine::store::DataStore;
use juniper::Context;
use std::sync::Arc;

/// Juniper Context for shopgraph's GraphQL queries. A [`GraphQLContext`] is created for each
/// request and hands the resolvers read access to the [`DataStore`].
///
/// [`DataStore`]: ../store/struct.DataStore.html
/// [`GraphQLContext`]: ./struct.GraphQLContext.html
#[derive(Clone, Debug)]
pub struct GraphQLContext {
    store: Arc<DataStore>,
    version: Option<String>,
}

impl GraphQLContext {
    /// Takes the shared [`DataStore`] and the optional application version and returns a
    /// [`GraphQLContext`].
    ///
    /// [`DataStore`]: ../store/struct.DataStore.html
    /// [`GraphQLContext`]: ./struct.GraphQLContext.html
    pub fn new(store: Arc<DataStore>, version: Option<String>) -> GraphQLContext {
        GraphQLContext { store, version }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Returns a [`Resolver`] over this context's store
    ///
    /// [`Resolver`]: ../resolvers/struct.Resolver.html
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.store)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl Context for GraphQLContext {}
