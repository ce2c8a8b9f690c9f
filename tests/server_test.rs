mod setup;

use serde_json::json;
use setup::{init, test_engine, test_store, TestServer};
use shopgraph::engine::config::ServerConfig;
use shopgraph::Engine;

/// Passes if the GraphiQL page is served and points at the GraphQL route
#[tokio::test]
async fn graphiql_enabled() {
    init();

    let server = TestServer::start();
    let res = reqwest::get(&server.url("/graphiql")).await.unwrap();

    assert_eq!(200, res.status().as_u16());
    assert!(res.text().await.unwrap().contains("/graphql"));

    server.stop().await;
}

/// Passes if GraphiQL can be switched off
#[tokio::test]
async fn graphiql_disabled() {
    init();

    let mut config = ServerConfig::default();
    config.graphiql = false;
    let server = TestServer::start_with(test_engine(), config);

    let res = reqwest::get(&server.url("/graphiql")).await.unwrap();
    assert_eq!(404, res.status().as_u16());

    server.stop().await;
}

/// Passes if the GraphQL route can be moved
#[tokio::test]
async fn custom_graphql_path() {
    init();

    let mut config = ServerConfig::default();
    config.graphql_path = "/".to_string();
    let server = TestServer::start_with(test_engine(), config);

    let res: serde_json::Value = reqwest::Client::new()
        .post(&server.url("/"))
        .json(&json!({ "query": "{ shops { ID } }" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!("S1", res["data"]["shops"][0]["ID"]);

    server.stop().await;
}

/// Passes if a query deeper than the configured limit is rejected without data
#[tokio::test]
async fn depth_limit() {
    init();

    let engine = Engine::new(test_store()).with_max_depth(Some(3)).build();
    let server = TestServer::start_with(engine, ServerConfig::default());
    let client = server.client();

    let res = client
        .graphql_response("query { shops { Orders { Line_Items { ID } } } }", None)
        .await
        .unwrap();
    assert!(res.get("data").is_none());
    assert_eq!(
        "Query depth 4 exceeds the maximum allowed depth of 3",
        res["errors"][0]["message"]
    );

    let orders = client
        .graphql("query { shops { Orders { ID } } }", None, Some("shops"))
        .await
        .unwrap();
    assert_eq!(2, orders.as_array().unwrap().len());

    server.stop().await;
}

/// Passes if a request body that is not JSON is refused
#[tokio::test]
async fn malformed_body() {
    init();

    let server = TestServer::start();
    let res = reqwest::Client::new()
        .post(&server.url("/graphql"))
        .header("content-type", "application/json")
        .body("{ shops")
        .send()
        .await
        .unwrap();

    assert_eq!(400, res.status().as_u16());

    server.stop().await;
}

/// Passes if the server reports the ephemeral port it bound
#[tokio::test]
async fn ephemeral_port() {
    init();

    let server = TestServer::start();
    assert_ne!(0, server.addr().port());

    server.stop().await;
}
