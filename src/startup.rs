use crate::configuration::{get_environment, Settings};
use crate::hashing::CredentialHasher;
use crate::routes;
use crate::service::UserRecordService;
use crate::store::SqliteUserStore;
use crate::utils::get_connection_pool;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::SqlitePool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Wire the store, hasher and HTTP server together.
    ///
    /// Tests hand in their own `pool`; otherwise one is opened from `configuration.database`.
    pub async fn build(
        configuration: Settings,
        pool: Option<SqlitePool>,
    ) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database, pool);
        tracing::info!(
            environment = get_environment().as_str(),
            "Running migrations..."
        );
        run_migration(&connection_pool).await?;

        let hasher = CredentialHasher::new(&configuration.hashing)?;
        let service = UserRecordService::new(SqliteUserStore::new(connection_pool), hasher);

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {}", address))?;
        let port = listener.local_addr()?.port();
        let server = run(listener, service, configuration.application.hmac_secret)?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    service: UserRecordService,
    hmac_secret: Secret<String>,
) -> Result<Server, std::io::Error> {
    let service = web::Data::new(service);
    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store)
        .minimum_level(Level::Debug)
        .build();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(TracingLogger::default())
            .route(
                "/health_check",
                web::get().to(routes::health_check::health_check),
            )
            .route("/", web::get().to(routes::health_check::home))
            .service(web::scope("/users").configure(routes::users::configure))
            .app_data(service.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub async fn run_migration(db_pool: &SqlitePool) -> Result<(), anyhow::Error> {
    sqlx::migrate!("./migrations")
        .run(db_pool)
        .await
        .context("Failed to migrate database")
}
