use log::{error, info};
use shopgraph::server::Server;
use shopgraph::{Configuration, DataStore, Engine, Error};
use std::process::exit;

async fn serve(config_path: &str) -> Result<(), Error> {
    let config = Configuration::from_file(config_path)?;
    config.validate()?;

    let server_config = config.server.clone().with_env_overrides()?;
    let store = DataStore::from_fixtures(&config.fixtures)?;

    let engine = Engine::new(store)
        .with_version(env!("CARGO_PKG_VERSION").to_string())
        .with_max_depth(config.limits.max_depth)
        .build();
    info!("Starting {}", engine);

    Server::new(engine, server_config).bind()?.run().await
}

#[actix_web::main]
async fn main() {
    env_logger::init();

    let matches = clap::App::new("shopgraph")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read-only GraphQL service over shop fixture data")
        .arg(
            clap::Arg::with_name("CONFIG")
                .help("Path to configuration file to use")
                .required(true),
        )
        .get_matches();

    let config_path = matches.value_of("CONFIG").unwrap_or_default();

    if let Err(e) = serve(config_path).await {
        error!("{}", e);
        eprintln!("shopgraph: {}", e);
        exit(1);
    }
}
