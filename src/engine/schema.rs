//! Defines the GraphQL schema: the `ShopAppSchema` query root and the `Product`, `Shop`,
//! `Order`, and `LineItem` object types. Relation and total fields delegate to the
//! [`Resolver`], reading the [`DataStore`] carried in the request's [`GraphQLContext`].
//!
//! [`DataStore`]: ../store/struct.DataStore.html
//! [`GraphQLContext`]: ../context/struct.GraphQLContext.html
//! [`Resolver`]: ../resolvers/struct.Resolver.html

use crate::engine::context::GraphQLContext;
use crate::engine::objects::{LineItem, Order, Product, Shop};
use juniper::{graphql_object, EmptyMutation, EmptySubscription, FieldResult, RootNode};
use std::sync::Arc;

/// The read-only schema served by the engine
pub type Schema =
    RootNode<'static, Query, EmptyMutation<GraphQLContext>, EmptySubscription<GraphQLContext>>;

/// Shared handle to the [`Schema`], built once per engine
///
/// [`Schema`]: ./type.Schema.html
pub type RootRef = Arc<Schema>;

pub(crate) fn create_root_node() -> RootRef {
    Arc::new(Schema::new(
        Query,
        EmptyMutation::<GraphQLContext>::new(),
        EmptySubscription::<GraphQLContext>::new(),
    ))
}

/// The query root. Each field returns a whole collection, in fixture order.
pub struct Query;

#[graphql_object(
    name = "ShopAppSchema",
    context = GraphQLContext,
    description = "Shop Application Schema Query Root. Click me for the rest of the documentation."
)]
impl Query {
    /// List of all Products
    fn products(context: &GraphQLContext) -> Vec<Product> {
        context.store().products().to_vec()
    }

    /// List of all Shops
    fn shops(context: &GraphQLContext) -> Vec<Shop> {
        context.store().shops().to_vec()
    }

    /// List of all Orders
    fn orders(context: &GraphQLContext) -> Vec<Order> {
        context.store().orders().to_vec()
    }

    /// List of all Line Items
    fn line_items(context: &GraphQLContext) -> Vec<LineItem> {
        context.store().line_items().to_vec()
    }
}

#[graphql_object(context = GraphQLContext, description = "This represents a product.")]
impl Product {
    #[graphql(name = "ID", description = "ID of a product.")]
    fn id(&self) -> &str {
        self.id.as_str()
    }

    #[graphql(name = "Brand", description = "Brand of a product.")]
    fn brand(&self) -> &str {
        &self.brand
    }

    #[graphql(name = "Name", description = "Name of a product.")]
    fn name(&self) -> &str {
        &self.name
    }

    #[graphql(name = "Price", description = "Price of a product.")]
    fn price(&self) -> f64 {
        self.price
    }

    #[graphql(
        name = "PPG",
        description = "Price per 100 g of a product. Used to calculate nutritional value."
    )]
    fn ppg(&self) -> f64 {
        self.ppg
    }

    #[graphql(name = "Protein", description = "Amount of protein (g) per 100 g in a product.")]
    fn protein(&self) -> f64 {
        self.protein
    }

    #[graphql(
        name = "Carbohydrates",
        description = "Amount of carbohydrates (g) per 100 g in a product."
    )]
    fn carbohydrates(&self) -> f64 {
        self.carbohydrates
    }

    #[graphql(name = "Fat", description = "Amount of fat (g) per 100 g in a product.")]
    fn fat(&self) -> f64 {
        self.fat
    }

    #[graphql(
        name = "Cholesterol",
        description = "Amount of cholesterol (g) per 100 g in a product."
    )]
    fn cholesterol(&self) -> f64 {
        self.cholesterol
    }

    #[graphql(name = "Sodium", description = "Amount of sodium (g) per 100 g in a product.")]
    fn sodium(&self) -> f64 {
        self.sodium
    }

    #[graphql(
        name = "Potassium",
        description = "Amount of potassium (g) per 100 g in a product."
    )]
    fn potassium(&self) -> f64 {
        self.potassium
    }

    #[graphql(
        name = "SaturatedFats",
        description = "Amount of saturated fats (g) per 100 g in a product."
    )]
    fn saturated_fats(&self) -> f64 {
        self.saturated_fats
    }

    #[graphql(
        name = "TransFats",
        description = "Amount of transfats (g) per 100 g in a product."
    )]
    fn trans_fats(&self) -> f64 {
        self.trans_fats
    }

    #[graphql(
        name = "PolysaturatedFats",
        description = "Amount of polysaturated fats (g) per 100 g in a product."
    )]
    fn polysaturated_fats(&self) -> f64 {
        self.polysaturated_fats
    }

    #[graphql(name = "Omega3", description = "Amount of omega-3s (g) per 100 g in a product.")]
    fn omega3(&self) -> f64 {
        self.omega3
    }

    #[graphql(name = "EPA", description = "Amount of EPA (g) per 100 g in a product.")]
    fn epa(&self) -> f64 {
        self.epa
    }

    #[graphql(name = "DHA", description = "Amount of DHA (g) per 100 g in a product.")]
    fn dha(&self) -> f64 {
        self.dha
    }

    #[graphql(
        name = "MonosaturatedFat",
        description = "Amount of monosaturated fats (g) per 100 g in a product."
    )]
    fn monosaturated_fat(&self) -> f64 {
        self.monosaturated_fat
    }

    #[graphql(
        name = "DietaryFiber",
        description = "Amount of dietary fiber (g) per 100 g in a product."
    )]
    fn dietary_fiber(&self) -> f64 {
        self.dietary_fiber
    }

    #[graphql(name = "Sugars", description = "Amount of sugars (g) per 100 g in a product.")]
    fn sugars(&self) -> f64 {
        self.sugars
    }

    #[graphql(
        name = "OtherCarbohydrates",
        description = "Amount of other carbohydrates (g) per 100 g in a product."
    )]
    fn other_carbohydrates(&self) -> f64 {
        self.other_carbohydrates
    }

    #[graphql(name = "FoodTypeUpper", description = "High level food type of a product.")]
    fn food_type_upper(&self) -> &str {
        &self.food_type_upper
    }

    #[graphql(name = "FoodTypeLower", description = "Low level food type of a product.")]
    fn food_type_lower(&self) -> &str {
        &self.food_type_lower
    }

    #[graphql(
        name = "Line_Items",
        description = "List of line items associated with this product"
    )]
    fn line_items(&self, context: &GraphQLContext) -> Vec<LineItem> {
        context
            .resolver()
            .line_items_of_product(self)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[graphql_object(context = GraphQLContext, description = "This represents a shop.")]
impl Shop {
    #[graphql(name = "ID", description = "ID of a shop.")]
    fn id(&self) -> &str {
        self.id.as_str()
    }

    #[graphql(name = "Name", description = "Name of a shop.")]
    fn name(&self) -> &str {
        &self.name
    }

    #[graphql(name = "Description", description = "Description of a shop.")]
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[graphql(name = "Products", description = "List of products sold by a shop.")]
    fn products(&self, context: &GraphQLContext) -> Vec<Product> {
        context
            .resolver()
            .products_of_shop(self)
            .into_iter()
            .cloned()
            .collect()
    }

    #[graphql(name = "Orders", description = "List of orders fulfilled by a shop.")]
    fn orders(&self, context: &GraphQLContext) -> Vec<Order> {
        context
            .resolver()
            .orders_of_shop(self)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[graphql_object(context = GraphQLContext, description = "This represents an order.")]
impl Order {
    #[graphql(name = "ID", description = "ID of an order.")]
    fn id(&self) -> &str {
        self.id.as_str()
    }

    #[graphql(name = "Customer_ID", description = "ID of the customer who made the order.")]
    fn customer_id(&self) -> &str {
        self.customer_id.as_str()
    }

    #[graphql(name = "Line_Items", description = "List of line items for an order.")]
    fn line_items(&self, context: &GraphQLContext) -> Vec<LineItem> {
        context
            .resolver()
            .line_items_of_order(self)
            .into_iter()
            .cloned()
            .collect()
    }

    // Nullable so a line item without a product only nulls this field
    #[graphql(name = "Order_Total", description = "Total cost of an order.")]
    fn order_total(&self, context: &GraphQLContext) -> FieldResult<Option<f64>> {
        Ok(Some(context.resolver().order_total(self)?))
    }
}

#[graphql_object(context = GraphQLContext, description = "This represents a line item")]
impl LineItem {
    #[graphql(name = "ID", description = "ID of a line item.")]
    fn id(&self) -> &str {
        self.id.as_str()
    }

    #[graphql(
        name = "Associated_Product",
        description = "Product associated with a line item."
    )]
    fn associated_product(&self, context: &GraphQLContext) -> Option<Product> {
        context.resolver().product_of_line_item(self).cloned()
    }

    #[graphql(name = "Quantity", description = "Quantity sold of a given product.")]
    fn quantity(&self) -> f64 {
        self.quantity
    }

    #[graphql(
        name = "Line_Total",
        description = "Total cost of the line item. This will be the price of a product multiplied by the quantity of the product sold."
    )]
    fn line_total(&self, context: &GraphQLContext) -> FieldResult<Option<f64>> {
        Ok(Some(context.resolver().line_total(self)?))
    }
}
