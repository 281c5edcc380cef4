use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;

use crate::domain::UserId;
use crate::service::UserRecordService;
use crate::utils::{e500, see_other};

pub async fn delete_user(
    path: web::Path<String>,
    service: web::Data<UserRecordService>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = UserId::from(path.into_inner());
    service.delete_user(&id).await.map_err(e500)?;
    FlashMessage::info("Usuario eliminado").send();
    Ok(see_other("/users"))
}
