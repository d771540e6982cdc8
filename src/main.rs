use sonarcloud_mcp::constants::env;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            std::env::var(env::LOG_LEVEL)
                .map_err(|_| ())
                .and_then(|level| EnvFilter::try_new(level.trim()).map_err(|_| ()))
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries protocol frames only.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = sonarcloud_mcp::mcp::server::run_stdio().await {
        tracing::error!("server stopped: {}", err);
        eprintln!("sonarcloud-mcp: {}", err);
        std::process::exit(1);
    }
}
