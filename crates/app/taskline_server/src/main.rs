//! Taskline HTTP server binary.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "taskline_server", about = "Taskline API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3100")]
    bind_addr: String,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/taskline"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,taskline_api=debug,taskline_core=debug".parse().unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    info!(database_url = %args.database_url, bind_addr = %args.bind_addr, "starting taskline_server");

    // The signing secret is required; refusing to start beats issuing
    // tokens nobody can verify after a restart.
    let config = taskline_api::config::ApiConfig {
        bind_addr: args.bind_addr,
        pg_connection_url: args.database_url.clone(),
        jwt_secret: taskline_api::config::require_jwt_secret()?,
        secure_cookies: taskline_api::config::secure_cookies_from_env(),
    };

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    info!("running database migrations");
    taskline_api::migrate(&pool).await?;

    let bind_addr = config.bind_addr.clone();
    let state = taskline_api::AppState { pool, config };
    let app = taskline_api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
