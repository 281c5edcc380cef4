use actix_web::{http::header::ContentType, web, HttpResponse};

use super::pages::edit_page;
use crate::domain::{UserDraft, UserId};
use crate::service::UserRecordService;
use crate::utils::e500;

pub async fn edit_user_form(
    path: web::Path<String>,
    service: web::Data<UserRecordService>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = UserId::from(path.into_inner());
    let user = service.get_user_for_edit(&id).await.map_err(e500)?;
    let draft = user.as_ref().map(UserDraft::from);
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(edit_page(draft.as_ref(), &[])))
}
