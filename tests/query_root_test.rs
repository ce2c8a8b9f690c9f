mod setup;

use assert_approx_eq::assert_approx_eq;
use serde_json::json;
use shopgraph::Client;
use shopgraph_macros::shop_test;

/// Passes if each root field returns its whole collection in fixture order
#[shop_test]
async fn read_collections(client: Client) {
    let products = client.read_collection("Product", "ID").await.unwrap();
    assert_eq!(json!([{"ID": "P1"}, {"ID": "P2"}, {"ID": "3"}]), products);

    let shops = client.read_collection("Shop", "ID").await.unwrap();
    assert_eq!(json!([{"ID": "S1"}, {"ID": "2"}]), shops);

    let orders = client.read_collection("Order", "ID").await.unwrap();
    assert_eq!(
        json!([{"ID": "O1"}, {"ID": "O2"}, {"ID": "O3"}, {"ID": "O4"}]),
        orders
    );

    let line_items = client.read_collection("LineItem", "ID").await.unwrap();
    assert_eq!(
        json!([{"ID": "L1"}, {"ID": "L2"}, {"ID": "L3"}, {"ID": "4"}, {"ID": "L5"}]),
        line_items
    );
}

/// Passes if stored fields are returned as loaded, with identifiers and numbers normalized
#[shop_test]
async fn stored_fields(client: Client) {
    let products = client
        .read_collection("Product", "ID Brand Name Price FoodTypeUpper FoodTypeLower")
        .await
        .unwrap();

    assert_eq!("Wild Catch", products[2]["Brand"]);
    assert_eq!("Salmon Fillet", products[2]["Name"]);
    assert_approx_eq!(12.0, products[2]["Price"].as_f64().unwrap());
    assert_eq!("Seafood", products[2]["FoodTypeUpper"]);

    let orders = client
        .read_collection("Order", "ID Customer_ID")
        .await
        .unwrap();
    assert_eq!("42", orders[1]["Customer_ID"]);

    let line_items = client
        .read_collection("LineItem", "ID Quantity")
        .await
        .unwrap();
    assert_approx_eq!(1.5, line_items[1]["Quantity"].as_f64().unwrap());
}

/// Passes if a shop without a description reports null
#[shop_test]
async fn optional_description(client: Client) {
    let shops = client
        .graphql("query { shops { ID Description } }", None, Some("shops"))
        .await
        .unwrap();

    assert_eq!(
        "Neighbourhood shop with a small dairy aisle.",
        shops[0]["Description"]
    );
    assert!(shops[1]["Description"].is_null());
}

/// Passes if several root fields can be selected in one query
#[shop_test]
async fn multiple_roots(client: Client) {
    let data = client
        .graphql("query { shops { ID } lineItems { ID } }", None, None)
        .await
        .unwrap();

    assert_eq!(2, data["shops"].as_array().unwrap().len());
    assert_eq!(5, data["lineItems"].as_array().unwrap().len());
}

/// Passes if a field that does not exist yields errors and no data
#[shop_test]
async fn unknown_field(client: Client) {
    let res = client
        .graphql_response("query { products { Colour } }", None)
        .await
        .unwrap();

    assert!(res.get("data").map(|d| d.is_null()).unwrap_or(true));
    assert!(!res["errors"].as_array().unwrap().is_empty());

    assert!(client
        .graphql("query { products { Colour } }", None, Some("products"))
        .await
        .is_err());
}

/// Passes if query variables reach the executor
#[shop_test]
async fn variables(client: Client) {
    let shops = client
        .graphql(
            "query Shops($withName: Boolean!) { shops { ID Name @include(if: $withName) } }",
            Some(&json!({ "withName": true })),
            Some("shops"),
        )
        .await
        .unwrap();

    assert_eq!("Corner Grocer", shops[0]["Name"]);
}
