//! Contains the relation and derived-value resolution used by the GraphQL object types.
//!
//! Every relation is resolved by scanning a collection of the [`DataStore`] for records whose
//! identifiers appear in an embedded reference list. Nothing is indexed or cached, so results
//! always reflect the store, and come back in the order of the scanned collection.
//!
//! [`DataStore`]: ../store/struct.DataStore.html

use crate::engine::objects::{Id, LineItem, LineItemRef, Order, Product, Shop};
use crate::engine::store::DataStore;
use crate::error::Error;
use log::trace;

/// Resolves relations and derived values against a [`DataStore`].
///
/// [`DataStore`]: ../store/struct.DataStore.html
///
/// # Examples
///
/// ```rust
/// use shopgraph::engine::resolvers::Resolver;
/// use shopgraph::engine::store::DataStore;
///
/// let store = DataStore::from_readers(
///     r#"[{"ID": "P1", "Brand": "B", "Name": "N", "Price": 2.5, "PPG": 0,
///          "Protein": 0, "Carbohydrates": 0, "Fat": 0, "Cholesterol": 0, "Sodium": 0,
///          "Potassium": 0, "SaturatedFats": 0, "TransFats": 0, "PolysaturatedFats": 0,
///          "Omega3": 0, "EPA": 0, "DHA": 0, "MonosaturatedFat": 0, "DietaryFiber": 0,
///          "Sugars": 0, "OtherCarbohydrates": 0, "FoodTypeUpper": "U", "FoodTypeLower": "L",
///          "Line_Items": [{"Line_Item_ID": "L1"}]}]"#.as_bytes(),
///     "[]".as_bytes(),
///     r#"[{"ID": "O1", "Customer_ID": "C1", "Line_Items": [{"Line_Item_ID": "L1"}]}]"#.as_bytes(),
///     r#"[{"ID": "L1", "Quantity": 4}]"#.as_bytes(),
/// ).unwrap();
///
/// let resolver = Resolver::new(&store);
/// assert_eq!(10.0, resolver.order_total(&store.orders()[0]).unwrap());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    store: &'a DataStore,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a DataStore) -> Resolver<'a> {
        Resolver { store }
    }

    /// Returns the products whose identifiers appear in the shop's product list
    pub fn products_of_shop(&self, shop: &Shop) -> Vec<&'a Product> {
        trace!("Resolver::products_of_shop called -- shop: {}", shop.id);

        let ids: Vec<&Id> = shop.products.iter().map(|r| &r.product_id).collect();
        self.store
            .products()
            .iter()
            .filter(|p| ids.contains(&&p.id))
            .collect()
    }

    /// Returns the orders whose identifiers appear in the shop's order list
    pub fn orders_of_shop(&self, shop: &Shop) -> Vec<&'a Order> {
        trace!("Resolver::orders_of_shop called -- shop: {}", shop.id);

        let ids: Vec<&Id> = shop.orders.iter().map(|r| &r.order_id).collect();
        self.store
            .orders()
            .iter()
            .filter(|o| ids.contains(&&o.id))
            .collect()
    }

    /// Returns the line items whose identifiers appear in the product's association list
    pub fn line_items_of_product(&self, product: &Product) -> Vec<&'a LineItem> {
        trace!(
            "Resolver::line_items_of_product called -- product: {}",
            product.id
        );

        self.line_items_in(&product.line_items)
    }

    /// Returns the line items whose identifiers appear in the order's line item list
    pub fn line_items_of_order(&self, order: &Order) -> Vec<&'a LineItem> {
        trace!("Resolver::line_items_of_order called -- order: {}", order.id);

        self.line_items_in(&order.line_items)
    }

    /// Returns the first product whose association list carries the line item, or `None` if no
    /// product does.
    pub fn product_of_line_item(&self, line_item: &LineItem) -> Option<&'a Product> {
        trace!(
            "Resolver::product_of_line_item called -- line_item: {}",
            line_item.id
        );

        self.store
            .products()
            .iter()
            .find(|p| p.is_associated_with(&line_item.id))
    }

    /// Returns the price of the associated product multiplied by the line item's quantity.
    ///
    /// # Errors
    ///
    /// Returns an [`AssociatedProductNotFound`] error if no product carries the line item.
    ///
    /// [`AssociatedProductNotFound`]: ../../error/enum.Error.html#variant.AssociatedProductNotFound
    pub fn line_total(&self, line_item: &LineItem) -> Result<f64, Error> {
        let product =
            self.product_of_line_item(line_item)
                .ok_or_else(|| Error::AssociatedProductNotFound {
                    line_item_id: line_item.id.to_string(),
                })?;

        Ok(product.price * line_item.quantity)
    }

    /// Returns the sum of the line totals of the order's line items. An order without line items
    /// totals zero. Referenced line items missing from the store are skipped, and the first
    /// line item without an associated product fails the whole total.
    pub fn order_total(&self, order: &Order) -> Result<f64, Error> {
        trace!("Resolver::order_total called -- order: {}", order.id);

        self.line_items_of_order(order)
            .into_iter()
            .map(|li| self.line_total(li))
            .sum()
    }

    fn line_items_in(&self, refs: &[LineItemRef]) -> Vec<&'a LineItem> {
        let ids: Vec<&Id> = refs.iter().map(|r| &r.line_item_id).collect();
        self.store
            .line_items()
            .iter()
            .filter(|li| ids.contains(&&li.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Resolver;
    use crate::engine::objects::{Id, LineItem, LineItemRef, Order, Product, Shop};
    use crate::engine::store::DataStore;
    use crate::error::Error;
    use std::collections::HashSet;

    fn product(id: &str, price: f64, line_items: &[&str]) -> Product {
        serde_json::from_value(serde_json::json!({
            "ID": id, "Brand": "Acme", "Name": format!("Product {}", id), "Price": price,
            "PPG": 0.1, "Protein": 1, "Carbohydrates": 1, "Fat": 1, "Cholesterol": 0,
            "Sodium": 0, "Potassium": 0, "SaturatedFats": 0, "TransFats": 0,
            "PolysaturatedFats": 0, "Omega3": 0, "EPA": 0, "DHA": 0, "MonosaturatedFat": 0,
            "DietaryFiber": 0, "Sugars": 0, "OtherCarbohydrates": 0,
            "FoodTypeUpper": "Pantry", "FoodTypeLower": "Dry Goods",
            "Line_Items": line_items.iter().map(|l| serde_json::json!({"Line_Item_ID": l}))
                .collect::<Vec<_>>()
        }))
        .unwrap()
    }

    fn line_item(id: &str, quantity: f64) -> LineItem {
        LineItem {
            id: Id::new(id),
            quantity,
        }
    }

    fn order(id: &str, line_items: &[&str]) -> Order {
        Order {
            id: Id::new(id),
            customer_id: Id::new("C1"),
            line_items: line_items
                .iter()
                .map(|l| LineItemRef {
                    line_item_id: Id::new(*l),
                })
                .collect(),
        }
    }

    fn shop(id: &str, products: &[&str], orders: &[&str]) -> Shop {
        serde_json::from_value(serde_json::json!({
            "ID": id,
            "Name": format!("Shop {}", id),
            "Products": products.iter().map(|p| serde_json::json!({"Product_ID": p}))
                .collect::<Vec<_>>(),
            "Orders": orders.iter().map(|o| serde_json::json!({"Order_ID": o}))
                .collect::<Vec<_>>(),
        }))
        .unwrap()
    }

    fn store() -> DataStore {
        DataStore::new(
            vec![
                product("P1", 2.5, &["L1", "L3"]),
                product("P2", 4.0, &["L2"]),
                product("P3", 1.25, &[]),
            ],
            vec![
                shop("S1", &["P1"], &["O1"]),
                shop("S2", &["P3", "P2", "P9"], &["O2", "O3"]),
            ],
            vec![
                order("O1", &["L1"]),
                order("O2", &["L2", "L3", "L9"]),
                order("O3", &[]),
                order("O4", &["L1", "L4"]),
            ],
            vec![
                line_item("L1", 4.0),
                line_item("L2", 1.5),
                line_item("L3", 2.0),
                line_item("L4", 7.0),
            ],
        )
        .unwrap()
    }

    fn ids<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, id: fn(&T) -> &Id) -> Vec<String> {
        items.into_iter().map(|i| id(i).to_string()).collect()
    }

    /// Passes if a shop's products are exactly those it references, in collection order, with
    /// dangling references filtered out
    #[test]
    fn products_of_shop() {
        let s = store();
        let r = Resolver::new(&s);

        assert_eq!(vec!["P1"], ids(r.products_of_shop(&s.shops()[0]), |p| &p.id));
        assert_eq!(
            vec!["P2", "P3"],
            ids(r.products_of_shop(&s.shops()[1]), |p| &p.id)
        );
    }

    /// Passes if numeric and string product identifiers match each other
    #[test]
    fn products_of_shop_mixed_id_types() {
        let s = DataStore::from_readers(
            serde_json::to_string(&vec![product("7", 1.0, &[])])
                .unwrap()
                .as_bytes(),
            r#"[{"ID": "S1", "Name": "Mixed", "Products": [{"Product_ID": 7}]}]"#.as_bytes(),
            "[]".as_bytes(),
            "[]".as_bytes(),
        )
        .unwrap();
        let r = Resolver::new(&s);

        assert_eq!(vec!["7"], ids(r.products_of_shop(&s.shops()[0]), |p| &p.id));
    }

    #[test]
    fn orders_of_shop() {
        let s = store();
        let r = Resolver::new(&s);

        assert_eq!(vec!["O1"], ids(r.orders_of_shop(&s.shops()[0]), |o| &o.id));
        assert_eq!(
            vec!["O2", "O3"],
            ids(r.orders_of_shop(&s.shops()[1]), |o| &o.id)
        );
    }

    /// Passes if every product's line items equal its association list as a set
    #[test]
    fn line_items_of_product() {
        let s = store();
        let r = Resolver::new(&s);

        for p in s.products() {
            let expected: HashSet<String> = p
                .line_items
                .iter()
                .map(|l| l.line_item_id.to_string())
                .filter(|id| s.line_items().iter().any(|li| li.id.as_str() == id.as_str()))
                .collect();
            let actual: HashSet<String> = ids(r.line_items_of_product(p), |li| &li.id)
                .into_iter()
                .collect();

            assert_eq!(expected, actual);
        }

        assert!(r.line_items_of_product(&s.products()[2]).is_empty());
    }

    #[test]
    fn line_items_of_order() {
        let s = store();
        let r = Resolver::new(&s);

        assert_eq!(
            vec!["L2", "L3"],
            ids(r.line_items_of_order(&s.orders()[1]), |li| &li.id)
        );
        assert!(r.line_items_of_order(&s.orders()[2]).is_empty());
    }

    #[test]
    fn product_of_line_item() {
        let s = store();
        let r = Resolver::new(&s);

        assert_eq!(
            "P1",
            r.product_of_line_item(&s.line_items()[2])
                .unwrap()
                .id
                .as_str()
        );
        assert!(r.product_of_line_item(&s.line_items()[3]).is_none());
    }

    /// Passes if the first product in collection order wins when two claim a line item
    #[test]
    fn product_of_line_item_first_match() {
        let s = DataStore::new(
            vec![product("PA", 1.0, &["L1"]), product("PB", 9.0, &["L1"])],
            vec![],
            vec![],
            vec![line_item("L1", 2.0)],
        )
        .unwrap();
        let r = Resolver::new(&s);

        assert_eq!(
            "PA",
            r.product_of_line_item(&s.line_items()[0])
                .unwrap()
                .id
                .as_str()
        );
        assert!((r.line_total(&s.line_items()[0]).unwrap() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn line_total() {
        let s = store();
        let r = Resolver::new(&s);

        assert!((r.line_total(&s.line_items()[0]).unwrap() - 10.0).abs() < f64::EPSILON);
        assert!((r.line_total(&s.line_items()[1]).unwrap() - 6.0).abs() < f64::EPSILON);
    }

    /// Passes if a line item without a product yields a resolution error naming it
    #[test]
    fn line_total_orphan() {
        let s = store();
        let r = Resolver::new(&s);

        match r.line_total(&s.line_items()[3]) {
            Err(Error::AssociatedProductNotFound { line_item_id }) => {
                assert_eq!("L4", line_item_id)
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    /// Passes if an order total is the sum of its line totals
    #[test]
    fn order_total() {
        let s = store();
        let r = Resolver::new(&s);

        for o in &s.orders()[0..3] {
            let expected: f64 = r
                .line_items_of_order(o)
                .into_iter()
                .map(|li| r.line_total(li).unwrap())
                .sum();
            assert!((r.order_total(o).unwrap() - expected).abs() < f64::EPSILON);
        }

        assert!((r.order_total(&s.orders()[1]).unwrap() - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn order_total_empty() {
        let s = store();
        let r = Resolver::new(&s);

        assert_eq!(0.0, r.order_total(&s.orders()[2]).unwrap());
    }

    #[test]
    fn order_total_orphan() {
        let s = store();
        let r = Resolver::new(&s);

        assert!(matches!(
            r.order_total(&s.orders()[3]),
            Err(Error::AssociatedProductNotFound { .. })
        ));
    }

    /// Passes if repeated resolution against the same store gives the same answers
    #[test]
    fn idempotent() {
        let s = store();
        let r = Resolver::new(&s);

        for shop in s.shops() {
            assert_eq!(r.products_of_shop(shop), r.products_of_shop(shop));
            assert_eq!(r.orders_of_shop(shop), r.orders_of_shop(shop));
        }
        for o in s.orders() {
            assert_eq!(r.line_items_of_order(o), r.line_items_of_order(o));
            assert_eq!(r.order_total(o).ok(), r.order_total(o).ok());
        }
    }
}
