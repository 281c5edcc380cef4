use actix_web::HttpResponse;

use crate::utils::see_other;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn home() -> HttpResponse {
    see_other("/users")
}
