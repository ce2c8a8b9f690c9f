//! Provides the [`DataStore`], the immutable in-memory snapshot of the four fixture collections.
//!
//! [`DataStore`]: ./struct.DataStore.html

use crate::engine::config::Fixtures;
use crate::engine::objects::{Id, LineItem, Order, Product, Shop};
use crate::error::Error;
use log::{info, trace};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};

/// Holds the products, shops, orders, and line items loaded at startup. A [`DataStore`] is never
/// modified after construction; share it across threads behind an `Arc`.
///
/// [`DataStore`]: ./struct.DataStore.html
///
/// # Examples
///
/// ```rust
/// use shopgraph::engine::store::DataStore;
///
/// let store = DataStore::new(Vec::new(), Vec::new(), Vec::new(), Vec::new()).unwrap();
/// assert!(store.products().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataStore {
    products: Vec<Product>,
    shops: Vec<Shop>,
    orders: Vec<Order>,
    line_items: Vec<LineItem>,
}

impl DataStore {
    /// Creates a [`DataStore`] from already deserialized collections. Returns an
    /// [`IdDuplicated`] error if any collection holds two records with the same identifier.
    ///
    /// [`DataStore`]: ./struct.DataStore.html
    /// [`IdDuplicated`]: ../../error/enum.Error.html#variant.IdDuplicated
    pub fn new(
        products: Vec<Product>,
        shops: Vec<Shop>,
        orders: Vec<Order>,
        line_items: Vec<LineItem>,
    ) -> Result<DataStore, Error> {
        check_unique("products", products.iter().map(|p| &p.id))?;
        check_unique("shops", shops.iter().map(|s| &s.id))?;
        check_unique("orders", orders.iter().map(|o| &o.id))?;
        check_unique("line_items", line_items.iter().map(|li| &li.id))?;

        Ok(DataStore {
            products,
            shops,
            orders,
            line_items,
        })
    }

    /// Loads each collection from the JSON file named in `fixtures`.
    ///
    /// # Errors
    ///
    /// * [`FixtureOpenFailed`] - if a fixture file cannot be opened
    /// * [`FixtureDeserializationFailed`] - if a fixture is not an array of the expected records
    /// * [`IdDuplicated`] - if a collection repeats an identifier
    ///
    /// [`FixtureOpenFailed`]: ../../error/enum.Error.html#variant.FixtureOpenFailed
    /// [`FixtureDeserializationFailed`]: ../../error/enum.Error.html#variant.FixtureDeserializationFailed
    /// [`IdDuplicated`]: ../../error/enum.Error.html#variant.IdDuplicated
    pub fn from_fixtures(fixtures: &Fixtures) -> Result<DataStore, Error> {
        trace!("DataStore::from_fixtures called -- fixtures: {:#?}", fixtures);

        let store = DataStore::new(
            read_fixture_file("products", &fixtures.products)?,
            read_fixture_file("shops", &fixtures.shops)?,
            read_fixture_file("orders", &fixtures.orders)?,
            read_fixture_file("line_items", &fixtures.line_items)?,
        )?;

        info!(
            "Loaded {} products, {} shops, {} orders, {} line items",
            store.products.len(),
            store.shops.len(),
            store.orders.len(),
            store.line_items.len()
        );

        Ok(store)
    }

    /// Loads each collection from a reader producing a JSON array, such as an in-memory string
    /// or an open file.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shopgraph::engine::store::DataStore;
    ///
    /// let store = DataStore::from_readers(
    ///     "[]".as_bytes(),
    ///     r#"[{"ID": 1, "Name": "Corner"}]"#.as_bytes(),
    ///     "[]".as_bytes(),
    ///     "[]".as_bytes(),
    /// ).unwrap();
    ///
    /// assert_eq!("1", store.shops()[0].id.as_str());
    /// ```
    pub fn from_readers<P, S, O, L>(
        products: P,
        shops: S,
        orders: O,
        line_items: L,
    ) -> Result<DataStore, Error>
    where
        P: Read,
        S: Read,
        O: Read,
        L: Read,
    {
        DataStore::new(
            read_fixture("products", products)?,
            read_fixture("shops", shops)?,
            read_fixture("orders", orders)?,
            read_fixture("line_items", line_items)?,
        )
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }
}

fn check_unique<'a>(collection: &str, ids: impl Iterator<Item = &'a Id>) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(Error::IdDuplicated {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
    }

    Ok(())
}

fn read_fixture<T, R>(collection: &str, reader: R) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
    R: Read,
{
    serde_json::from_reader(reader).map_err(|e| Error::FixtureDeserializationFailed {
        collection: collection.to_string(),
        source: e,
    })
}

fn read_fixture_file<T>(collection: &str, path: &str) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    let f = File::open(path).map_err(|e| Error::FixtureOpenFailed {
        path: path.to_string(),
        source: e,
    })?;

    read_fixture(collection, BufReader::new(f))
}
