//! shopgraph serves a read-only GraphQL API over a small shop data set: products, the shops that
//! sell them, the orders those shops fulfil, and the line items that make up each order. The
//! data is loaded once from JSON fixture files into an immutable [`DataStore`], and the schema
//! joins the collections at query time, deriving line and order totals from product prices.
//!
//! [`DataStore`]: ./engine/store/struct.DataStore.html
//!
//! # Examples
//!
//! ```rust,no_run
//! use shopgraph::engine::config::Fixtures;
//! use shopgraph::{Client, DataStore, Engine};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), shopgraph::Error> {
//! let store = DataStore::from_fixtures(&Fixtures::in_dir("data"))?;
//! let engine = Engine::new(store).build();
//! let client = Client::new_with_engine(engine);
//!
//! let totals = client
//!     .graphql("query { orders { ID Order_Total } }", None, Some("orders"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/shopgraph/0.1.0")]

pub use client::Client;
pub use engine::config::Configuration;
pub use engine::store::DataStore;
pub use engine::Engine;
pub use error::Error;

pub mod client;
pub mod engine;
pub mod error;
pub mod server;
