//! Backend entry-point: wires the REST endpoints and OpenAPI docs.

use std::net::SocketAddr;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DbPool, PoolConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Command line options, each with an environment fallback.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "Recipe service REST API")]
struct Cli {
    /// Address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// PostgreSQL connection URL. Without one the server keeps all state in
    /// memory, which only suits local development.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

fn run_migrations(database_url: &str) -> std::io::Result<()> {
    // Migrations run once at startup over a plain synchronous connection;
    // the async pool takes over afterwards.
    let mut conn = PgConnection::establish(database_url)
        .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
    for migration in applied {
        info!(%migration, "applied migration");
    }
    Ok(())
}

async fn build_state(database_url: Option<&str>) -> std::io::Result<HttpState> {
    let Some(url) = database_url else {
        warn!("no database configured; using in-memory storage (dev only)");
        return Ok(HttpState::in_memory());
    };

    let url_owned = url.to_owned();
    actix_web::rt::task::spawn_blocking(move || run_migrations(&url_owned))
        .await
        .map_err(std::io::Error::other)??;

    let pool = DbPool::build(PoolConfig::new(url))
        .await
        .map_err(|e| std::io::Error::other(format!("pool setup failed: {e}")))?;
    Ok(HttpState::with_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let state = web::Data::new(build_state(cli.database_url.as_deref()).await?);

    info!(bind = %cli.bind, "starting server");
    HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(http::configure));

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(cli.bind)?
    .run()
    .await
}
