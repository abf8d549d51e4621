use anyhow::Context;
use tokio::net::TcpListener;
use todo_server::store::{self, postgres};
use todo_server::{AppState, PgStore, ServerConfig};
use tracing::info;

const DEFAULT_LOG_FILTER: &str = "todo_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("todo-server error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    init_tracing()?;

    let config = ServerConfig::load_with_dotenv().context("failed to load configuration")?;
    let addr = config.socket_addr()?;

    let pool = store::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    info!(
        max_connections = postgres::MAX_OPEN_CONNECTIONS,
        max_lifetime_secs = postgres::MAX_CONNECTION_LIFETIME.as_secs(),
        "connected to database"
    );

    let pg = PgStore::new(pool);
    if config.run_migrations {
        pg.migrate().await.context("failed to run migrations")?;
        info!("migrations applied");
    }

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    todo_server::run(listener, AppState::new(pg)).await?;
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
