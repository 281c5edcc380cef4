mod delete;
mod edit;
mod list;
mod pages;
mod update;

pub use delete::delete_user;
pub use edit::edit_user_form;
pub use list::{create_user, list_users};
pub use update::update_user;

use actix_web::web;

/// Every route of the user-management scope, relative to where it is mounted.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_users))
        .route("", web::post().to(create_user))
        .route("/", web::get().to(list_users))
        .route("/", web::post().to(create_user))
        .route("/edit/{id}", web::get().to(edit_user_form))
        .route("/update/{id}", web::post().to(update_user))
        .route("/delete/{id}", web::get().to(delete_user));
}
