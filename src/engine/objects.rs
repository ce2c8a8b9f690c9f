//! Contains the entity records held by the [`DataStore`]: products, shops, orders, and line
//! items, along with the identifier type used to join them.
//!
//! Fixture data is loosely typed. Identifiers show up as JSON strings in one collection and as
//! numbers in another, and numeric fields are sometimes quoted. Both are normalized while
//! deserializing so that every comparison made at query time is plain string equality over
//! [`Id`] values.
//!
//! [`DataStore`]: ../store/struct.DataStore.html

use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of an entity, normalized to its string form at load time.
///
/// # Examples
///
/// ```rust
/// use shopgraph::engine::objects::Id;
///
/// let from_number: Id = serde_json::from_str("3").unwrap();
/// let from_string: Id = serde_json::from_str("\"3\"").unwrap();
/// assert_eq!(from_number, from_string);
/// assert_eq!(from_number.as_str(), "3");
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(id: impl Into<String>) -> Id {
        Id(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::new(s)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // f64's Display drops a zero fraction, so 3.0 and 3 both normalize to "3"
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Id(s),
            RawId::Signed(i) => Id(i.to_string()),
            RawId::Unsigned(u) => Id(u.to_string()),
            RawId::Float(f) => Id(f.to_string()),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFloat {
    Number(f64),
    Text(String),
}

/// Accepts a JSON number or a string holding one. NaN and infinities are rejected.
fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let f = match RawFloat::deserialize(deserializer)? {
        RawFloat::Number(f) => f,
        RawFloat::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, found \"{}\"", s)))?,
    };

    if f.is_finite() {
        Ok(f)
    } else {
        Err(D::Error::custom(format!("expected a finite number, found {}", f)))
    }
}

/// Reference from one entity to a line item, as embedded in products and orders
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LineItemRef {
    #[serde(rename = "Line_Item_ID")]
    pub line_item_id: Id,
}

/// Reference from a shop to a product
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ProductRef {
    #[serde(rename = "Product_ID")]
    pub product_id: Id,
}

/// Reference from a shop to an order
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct OrderRef {
    #[serde(rename = "Order_ID")]
    pub order_id: Id,
}

/// A product offered by one or more shops, with nutritional values given per 100 g.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: Id,
    pub brand: String,
    pub name: String,
    #[serde(deserialize_with = "float")]
    pub price: f64,
    #[serde(rename = "PPG", deserialize_with = "float")]
    pub ppg: f64,
    #[serde(deserialize_with = "float")]
    pub protein: f64,
    #[serde(deserialize_with = "float")]
    pub carbohydrates: f64,
    #[serde(deserialize_with = "float")]
    pub fat: f64,
    #[serde(deserialize_with = "float")]
    pub cholesterol: f64,
    #[serde(deserialize_with = "float")]
    pub sodium: f64,
    #[serde(deserialize_with = "float")]
    pub potassium: f64,
    #[serde(deserialize_with = "float")]
    pub saturated_fats: f64,
    #[serde(deserialize_with = "float")]
    pub trans_fats: f64,
    #[serde(deserialize_with = "float")]
    pub polysaturated_fats: f64,
    #[serde(deserialize_with = "float")]
    pub omega3: f64,
    #[serde(rename = "EPA", deserialize_with = "float")]
    pub epa: f64,
    #[serde(rename = "DHA", deserialize_with = "float")]
    pub dha: f64,
    #[serde(deserialize_with = "float")]
    pub monosaturated_fat: f64,
    #[serde(deserialize_with = "float")]
    pub dietary_fiber: f64,
    #[serde(deserialize_with = "float")]
    pub sugars: f64,
    #[serde(deserialize_with = "float")]
    pub other_carbohydrates: f64,
    pub food_type_upper: String,
    pub food_type_lower: String,
    #[serde(rename = "Line_Items", default)]
    pub line_items: Vec<LineItemRef>,
}

impl Product {
    /// Returns true if the line item `id` appears in this product's association list
    pub fn is_associated_with(&self, id: &Id) -> bool {
        self.line_items.iter().any(|r| &r.line_item_id == id)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Shop {
    #[serde(rename = "ID")]
    pub id: Id,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Products", default)]
    pub products: Vec<ProductRef>,
    #[serde(rename = "Orders", default)]
    pub orders: Vec<OrderRef>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Order {
    #[serde(rename = "ID")]
    pub id: Id,
    #[serde(rename = "Customer_ID")]
    pub customer_id: Id,
    #[serde(rename = "Line_Items", default)]
    pub line_items: Vec<LineItemRef>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LineItem {
    #[serde(rename = "ID")]
    pub id: Id,
    #[serde(rename = "Quantity", deserialize_with = "float")]
    pub quantity: f64,
}
