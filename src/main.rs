use httpfromtcp::config::{ServerConfig, set_config};
use httpfromtcp::net::server::Server;

#[async_std::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_file(&path),
        None => ServerConfig::default(),
    };
    set_config(config);

    Server.run().await
}
