use actix_web::{http::header::LOCATION, HttpResponse};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::configuration::DatabaseSettings;

pub fn get_connection_pool(
    database_configuration: &DatabaseSettings,
    pool: Option<SqlitePool>,
) -> SqlitePool {
    match pool {
        Some(p) => p,
        None => SqlitePoolOptions::new().connect_lazy_with(database_configuration.connect_options()),
    }
}

///
/// Return an opaque 500 while preserving the error's root cause for logging.
pub fn e500<T>(e: T) -> actix_web::Error
where
    T: std::fmt::Debug + std::fmt::Display + 'static,
{
    actix_web::error::ErrorInternalServerError(e)
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
