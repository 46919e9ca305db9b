use std::sync::Arc;

use auth::StaticKeyProvider;
use chrono::Duration;
use reimbursement_service::access::ports::AccessPolicyPort;
use reimbursement_service::access::service::AccessService;
use reimbursement_service::config::Config;
use reimbursement_service::identity::tokens::TokenService;
use reimbursement_service::inbound::http::router::create_router;
use reimbursement_service::repositories::InMemoryTicketRepository;
use reimbursement_service::repositories::InMemoryUserRepository;
use reimbursement_service::repositories::PostgresTicketRepository;
use reimbursement_service::repositories::PostgresUserRepository;
use reimbursement_service::ticket::ports::TicketServicePort;
use reimbursement_service::ticket::service::TicketService;
use reimbursement_service::user::ports::UserServicePort;
use reimbursement_service::user::service::UserService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type Services = (
    Arc<dyn UserServicePort>,
    Arc<dyn TicketServicePort>,
    Arc<dyn AccessPolicyPort>,
);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reimbursement_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "reimbursement-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistence = if config.database.url.is_some() { "postgresql" } else { "memory" },
        token_lifetime_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    let (user_service, ticket_service, access_policy) = match &config.database.url {
        Some(url) => postgres_services(url, config.database.max_connections).await?,
        None => in_memory_services(),
    };

    let token_service = Arc::new(TokenService::new(
        &StaticKeyProvider::new(&config.jwt.secret),
        Duration::minutes(config.jwt.expiration_minutes),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, ticket_service, access_policy, token_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

async fn postgres_services(url: &str, max_connections: u32) -> Result<Services, anyhow::Error> {
    let pg_pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;
    tracing::info!(
        max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let ticket_repository = Arc::new(PostgresTicketRepository::new(pg_pool));

    let user_service: Arc<dyn UserServicePort> =
        Arc::new(UserService::new(Arc::clone(&user_repository)));
    let ticket_service: Arc<dyn TicketServicePort> =
        Arc::new(TicketService::new(ticket_repository));
    let access_policy: Arc<dyn AccessPolicyPort> = Arc::new(AccessService::new(user_repository));

    Ok((user_service, ticket_service, access_policy))
}

fn in_memory_services() -> Services {
    tracing::warn!("No database configured, data will not survive a restart");

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let ticket_repository = Arc::new(InMemoryTicketRepository::new());

    let user_service: Arc<dyn UserServicePort> =
        Arc::new(UserService::new(Arc::clone(&user_repository)));
    let ticket_service: Arc<dyn TicketServicePort> =
        Arc::new(TicketService::new(ticket_repository));
    let access_policy: Arc<dyn AccessPolicyPort> = Arc::new(AccessService::new(user_repository));

    (user_service, ticket_service, access_policy)
}
