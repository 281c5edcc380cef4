use actix_web::{http::header::ContentType, web, HttpResponse};
use actix_web_flash_messages::FlashMessage;

use super::pages::edit_page;
use crate::domain::{UserId, UserUpdateForm};
use crate::service::{UpdateUserError, UserRecordService};
use crate::utils::see_other;

#[tracing::instrument(name = "Submitting a user update", skip(form, service))]
pub async fn update_user(
    path: web::Path<String>,
    form: web::Form<UserUpdateForm>,
    service: web::Data<UserRecordService>,
) -> Result<HttpResponse, UpdateUserError> {
    let id = UserId::from(path.into_inner());
    match service.update_user(&id, form.into_inner()).await {
        Ok(()) => {
            FlashMessage::info("Usuario actualizado").send();
            Ok(see_other("/users"))
        }
        Err(UpdateUserError::Validation { errors, draft }) => Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(edit_page(Some(&draft), &errors.messages()))),
        Err(e) => Err(e),
    }
}
