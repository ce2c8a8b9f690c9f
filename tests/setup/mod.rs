use actix_web::dev::ServerHandle;
use actix_web::rt::System;
use shopgraph::engine::config::{Fixtures, ServerConfig};
use shopgraph::server::Server;
use shopgraph::{Client, DataStore, Engine, Error};
use std::net::SocketAddr;
use std::sync::mpsc;
use std::thread::{spawn, JoinHandle};

#[allow(dead_code)]
pub(crate) fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub(crate) fn test_fixtures() -> Fixtures {
    Fixtures::in_dir("./tests/fixtures")
}

#[allow(dead_code)]
pub(crate) fn test_store() -> DataStore {
    DataStore::from_fixtures(&test_fixtures()).expect("Could not load test fixtures.")
}

#[allow(dead_code)]
pub(crate) fn test_engine() -> Engine {
    Engine::new(test_store())
        .with_version("1.0".to_string())
        .build()
}

#[allow(dead_code)]
pub(crate) fn local_test_client() -> Client {
    Client::new_with_engine(test_engine())
}

/// A shopgraph server running on its own actix system thread, bound to an ephemeral port
#[allow(dead_code)]
pub(crate) struct TestServer {
    addr: SocketAddr,
    handle: ServerHandle,
    thread: JoinHandle<()>,
}

#[allow(dead_code)]
impl TestServer {
    pub(crate) fn start() -> TestServer {
        TestServer::start_with(test_engine(), ServerConfig::default())
    }

    pub(crate) fn start_with(engine: Engine, mut config: ServerConfig) -> TestServer {
        config.bind_addr = "127.0.0.1".to_string();
        config.bind_port = 0;

        let (tx, rx) = mpsc::channel::<Result<(SocketAddr, ServerHandle), Error>>();

        let thread = spawn(move || {
            System::new().block_on(async move {
                match Server::new(engine, config).with_workers(1).bind() {
                    Ok(server) => {
                        let _ = tx.send(Ok((server.addrs()[0], server.handle())));
                        let _ = server.run().await;
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e));
                    }
                }
            })
        });

        let (addr, handle) = rx
            .recv()
            .expect("Test server thread exited before binding.")
            .expect("Test server failed to bind.");

        TestServer {
            addr,
            handle,
            thread,
        }
    }

    pub(crate) fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub(crate) fn client(&self) -> Client {
        Client::new_with_http(&self.url("/graphql"), None).expect("Could not create client.")
    }

    pub(crate) async fn stop(self) {
        self.handle.stop(true).await;
        let _ = self.thread.join();
    }
}
