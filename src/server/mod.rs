//! This module provides the actix-web HTTP server that exposes an [`Engine`] over HTTP, with an
//! optional GraphiQL explorer.
//!
//! [`Engine`]: ../engine/struct.Engine.html

use crate::engine::config::ServerConfig;
use crate::engine::Engine;
use crate::error::Error;
use actix_cors::Cors;
use actix_web::dev;
use actix_web::middleware::Logger;
use actix_web::web::{self, Data, Json};
use actix_web::{App, HttpResponse, HttpServer};
use juniper::http::graphiql::graphiql_source;
use log::{debug, error, info, trace};
use serde::Deserialize;
use std::net::SocketAddr;

/// Body of a GraphQL request as posted by GraphiQL and by the [`Client`]
///
/// [`Client`]: ../client/enum.Client.html
#[derive(Clone, Debug, Deserialize)]
struct GraphQLBody {
    query: String,
    #[serde(rename = "operationName", default)]
    operation_name: Option<String>,
    #[serde(default)]
    variables: Option<serde_json::Value>,
}

#[derive(Clone)]
struct AppData {
    engine: Engine,
    graphql_path: String,
}

impl AppData {
    fn new(engine: Engine, graphql_path: String) -> AppData {
        AppData {
            engine,
            graphql_path,
        }
    }
}

async fn graphql(data: Data<AppData>, req: Json<GraphQLBody>) -> HttpResponse {
    let body = req.into_inner();
    debug!("graphql -- request: {:#?}", body);

    match data
        .engine
        .execute(body.query, body.variables, body.operation_name)
        .await
    {
        Ok(res) => HttpResponse::Ok().json(res),
        Err(e) => {
            error!("graphql -- request failed: {}", e);
            HttpResponse::InternalServerError()
                .content_type("application/json")
                .body(e.to_string())
        }
    }
}

async fn graphiql(data: Data<AppData>) -> HttpResponse {
    let html = graphiql_source(&data.graphql_path, None);

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

fn configure(cfg: &mut web::ServiceConfig, app_data: AppData, server_config: &ServerConfig) {
    cfg.app_data(Data::new(app_data))
        .route(&server_config.graphql_path, web::post().to(graphql));

    if server_config.graphiql {
        cfg.route(&server_config.graphiql_path, web::get().to(graphiql));
    }
}

/// HTTP front end for an [`Engine`]
///
/// [`Engine`]: ../engine/struct.Engine.html
///
/// # Examples
///
/// ```rust,no_run
/// use shopgraph::engine::config::ServerConfig;
/// use shopgraph::engine::store::DataStore;
/// use shopgraph::engine::Engine;
/// use shopgraph::server::Server;
///
/// #[actix_web::main]
/// async fn main() -> Result<(), shopgraph::Error> {
///     let engine = Engine::new(DataStore::default()).build();
///     let server = Server::new(engine, ServerConfig::default()).bind()?;
///     server.run().await
/// }
/// ```
pub struct Server {
    engine: Engine,
    config: ServerConfig,
    workers: usize,
}

impl Server {
    /// Creates a server for `engine` with one worker per CPU
    pub fn new(engine: Engine, config: ServerConfig) -> Server {
        Server {
            engine,
            config,
            workers: num_cpus::get(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Server {
        self.workers = workers;
        self
    }

    /// Binds the configured address and starts the server. The returned [`BoundServer`] must be
    /// awaited, or spawned onto the runtime, for requests to be served.
    ///
    /// # Errors
    ///
    /// Returns an [`AddrNotAvailable`] error if the address cannot be bound.
    ///
    /// [`AddrNotAvailable`]: ../error/enum.Error.html#variant.AddrNotAvailable
    /// [`BoundServer`]: ./struct.BoundServer.html
    pub fn bind(self) -> Result<BoundServer, Error> {
        trace!(
            "Server::bind called -- config: {:#?}, workers: {}",
            self.config,
            self.workers
        );

        let addr = self.config.addr();
        let app_data = AppData::new(self.engine, self.config.graphql_path.clone());
        let server_config = self.config;

        let http = HttpServer::new(move || {
            let app_data = app_data.clone();
            let server_config = server_config.clone();

            App::new()
                .wrap(Logger::default())
                .wrap(Cors::default())
                .configure(move |cfg| configure(cfg, app_data, &server_config))
        })
        .workers(self.workers)
        .bind(&addr)
        .map_err(|e| Error::AddrNotAvailable {
            addr: addr.clone(),
            source: e,
        })?;

        let addrs = http.addrs();
        for a in &addrs {
            info!("Server listening on {}", a);
        }

        Ok(BoundServer {
            server: http.run(),
            addrs,
        })
    }
}

/// A server that has bound its listening sockets
pub struct BoundServer {
    server: dev::Server,
    addrs: Vec<SocketAddr>,
}

impl BoundServer {
    /// Addresses the server is listening on. When bound to port 0 these carry the port chosen by
    /// the operating system.
    pub fn addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    /// Handle used to stop the server from another task
    pub fn handle(&self) -> dev::ServerHandle {
        self.server.handle()
    }

    /// Serves requests until the server is stopped
    pub async fn run(self) -> Result<(), Error> {
        self.server
            .await
            .map_err(|e| Error::ServerFailed { source: e })
    }
}
