mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use axum::{Router, routing::get};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    infrastructure::{
        account_registration_repository::SqlAccountRegistrationRepository,
        account_repository::SqlAccountRepository, argon2_password_hasher::Argon2PasswordHasher,
        schema,
    },
    presentation::handlers::account_handler::create_account_router,
    usecase::{
        get_account_usecase::GetAccountUsecase, register_account_usecase::RegisterAccountUsecase,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_registry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .sqlx_logging(config.db_sql_logging);

    let db = Database::connect(opt).await?;
    schema::create_tables(&db).await?;
    tracing::info!("database ready");

    let account_repository = SqlAccountRepository::new(db.clone());
    let registration_repository = SqlAccountRegistrationRepository::new(db.clone());
    let password_hasher = Argon2PasswordHasher::new();
    let register_account_usecase = RegisterAccountUsecase::new(
        account_repository.clone(),
        registration_repository,
        password_hasher,
    );
    let get_account_usecase = GetAccountUsecase::new(account_repository);

    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .merge(create_account_router(
            register_account_usecase,
            get_account_usecase,
        ))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
