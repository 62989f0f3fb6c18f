use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::{quotes::QuoteClient, utils::logging::init_logging_from_env};
use configs::{AppConfig, QuoteConfig, ServerConfig};
use dotenvy::dotenv;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes::{self, greeting::GreetingCounter, ServerState};
use service::customer::{repo::seaorm::SeaOrmCustomerRepository, CustomerService};
use service::demo;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Everything `run` needs to serve, built without binding a socket.
pub struct App {
    pub router: Router,
    pub state: ServerState,
    pub customers: CustomerService<SeaOrmCustomerRepository>,
}

/// Connect the store, run the enabled startup tasks and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> Result<App, StartupError> {
    let db = models::db::connect_and_migrate(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    let customers = CustomerService::new(Arc::new(SeaOrmCustomerRepository::new(db)));

    if cfg.startup.seed_customers {
        demo::run_customer_demo(&customers).await?;
    }

    let state = ServerState::new(Arc::new(GreetingCounter::new()));
    let router = routes::build_router(state.clone(), build_cors());
    Ok(App { router, state, customers })
}

/// Fetch one quote in the background. A failure is logged and ends only this task.
pub fn spawn_quote_task(cfg: &QuoteConfig) -> Result<JoinHandle<()>, StartupError> {
    let client = QuoteClient::new(cfg.url.clone(), cfg.timeout())
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(tokio::spawn(async move {
        if let Err(e) = demo::run_quote_demo(&client).await {
            error!(url = %client.url(), error = %e, "quote startup task failed");
        }
    }))
}

/// Bind the configured listener address.
pub async fn bind(cfg: &ServerConfig) -> Result<tokio::net::TcpListener, StartupError> {
    let addr: SocketAddr = cfg
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;
    info!(%addr, "starting server crate");
    Ok(tokio::net::TcpListener::bind(addr).await?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> Result<(), StartupError> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_or_default().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let app = build_app(&cfg).await?;

    if cfg.startup.fetch_quote {
        spawn_quote_task(&cfg.quote)?;
    }

    let listener = bind(&cfg.server).await?;
    axum::serve(listener, app.router).await?;
    Ok(())
}
