use actix_web::{http::header::ContentType, web, HttpResponse};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};

use super::pages::index_page;
use crate::domain::NewUserForm;
use crate::service::{CreateUserError, UserRecordService};
use crate::utils::{e500, see_other};

pub async fn list_users(
    service: web::Data<UserRecordService>,
    flash_messages: IncomingFlashMessages,
) -> Result<HttpResponse, actix_web::Error> {
    let users = service.list_users().await.map_err(e500)?;
    let notices: Vec<String> = flash_messages
        .iter()
        .map(|m| m.content().to_owned())
        .collect();
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(index_page(&users, &[], &notices)))
}

pub async fn create_user(
    form: web::Form<NewUserForm>,
    service: web::Data<UserRecordService>,
) -> Result<HttpResponse, CreateUserError> {
    match service.create_user(form.into_inner()).await {
        Ok(_) => {
            FlashMessage::info("Usuario creado").send();
            Ok(see_other("/users"))
        }
        Err(CreateUserError::Validation { errors, users }) => Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(index_page(&users, &errors.messages(), &[]))),
        Err(e) => Err(e),
    }
}
