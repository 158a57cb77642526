use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tunescout::server::{self, config::ServerConfig};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tunescout=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    server::serve(ServerConfig::from_env()).await
}
