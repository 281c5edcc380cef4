use sqlx::SqlitePool;

use crate::helpers::{assert_is_redirect_to, spawn_app};

#[sqlx::test]
async fn the_user_list_renders_with_the_create_form(pool: SqlitePool) {
    let app = spawn_app(pool).await;

    let response = app.get_users().await;
    assert_eq!(response.status().as_u16(), 200);

    let html_page = response.text().await.unwrap();
    assert!(html_page.contains(r#"<form action="/users" method="post">"#));
}

#[sqlx::test]
async fn a_valid_user_is_stored_with_a_hashed_password(pool: SqlitePool) {
    let app = spawn_app(pool).await;

    let response = app
        .post_users("name=Abc&email=a%40b.com&password=secret1")
        .await;
    assert_is_redirect_to(&response, "/users");

    let saved = app.stored_users().await;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name, "Abc");
    assert_eq!(saved[0].email, "a@b.com");
    assert_ne!(saved[0].password_hash, "secret1");
    assert!(saved[0].password_hash.starts_with("$argon2id$"));

    // Follow the redirect
    let html_page = app.get_users_html().await;
    assert!(html_page.contains("<p><i>Usuario creado</i></p>"));
    assert!(html_page.contains("<td>Abc</td>"));
    assert!(!html_page.contains(&saved[0].password_hash));
}

#[sqlx::test]
async fn an_invalid_user_is_rejected_and_nothing_is_stored(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    app.create_user("Existing", "existing@example.com", "secret1")
        .await;

    let test_cases = vec![
        (
            "name=Ab&email=a%40b.com&password=secret1",
            "El nombre es demasiado corto",
        ),
        (
            "name=Abc&email=not-an-email&password=secret1",
            "El correo electrónico no es válido",
        ),
        (
            "name=Abc&email=a%40b.com&password=12345",
            "La contraseña debe tener al menos 6 caracteres",
        ),
        ("", "El nombre es demasiado corto"),
    ];

    for (body, expected_message) in test_cases {
        let response = app.post_users(body).await;

        assert_eq!(
            200,
            response.status().as_u16(),
            "The list was not re-rendered when the payload was {}.",
            body
        );
        let html_page = response.text().await.unwrap();
        assert!(
            html_page.contains(&format!("<li>{}</li>", expected_message)),
            "Missing `{}` when the payload was {}.",
            expected_message,
            body
        );
        // The current list is shown again alongside the errors.
        assert!(html_page.contains("<td>Existing</td>"));
    }

    assert_eq!(app.stored_users().await.len(), 1);
}

#[sqlx::test]
async fn an_empty_submission_reports_every_failed_rule(pool: SqlitePool) {
    let app = spawn_app(pool).await;

    let html_page = app.post_users("").await.text().await.unwrap();

    assert_eq!(html_page.matches("<li>").count(), 3);
}

#[sqlx::test]
async fn the_edit_form_is_prefilled(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let user = app.create_user("Abc", "a@b.com", "secret1").await;

    let html_page = app.get_edit_html(&user.id).await;

    assert!(html_page.contains(&format!(r#"action="/users/update/{}""#, user.id)));
    assert!(html_page.contains(r#"value="Abc""#));
}

#[sqlx::test]
async fn editing_an_unknown_user_renders_an_empty_state(pool: SqlitePool) {
    let app = spawn_app(pool).await;

    let response = app
        .api_client
        .get(&format!("{}/users/edit/does-not-exist", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Usuario no encontrado."));
}

#[sqlx::test]
async fn a_short_password_update_is_rejected_and_the_record_is_unchanged(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let user = app.create_user("Abc", "a@b.com", "secret1").await;

    let response = app
        .post_update(&user.id, "name=Changed&password=shrt")
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains("<li>La contraseña debe tener al menos 6 caracteres</li>"));
    // The submitted values are echoed back, not the stored ones.
    assert!(html_page.contains(r#"value="Changed""#));

    let saved = app.stored_users().await;
    assert_eq!(saved[0].name, "Abc");
    assert_eq!(saved[0].password_hash, user.password_hash);
}

#[sqlx::test]
async fn an_update_without_password_only_changes_the_submitted_fields(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let user = app.create_user("Abc", "a@b.com", "secret1").await;

    let response = app.post_update(&user.id, "name=NewName").await;
    assert_is_redirect_to(&response, "/users");

    let saved = app.stored_users().await;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name, "NewName");
    assert_eq!(saved[0].email, "a@b.com");
    assert_eq!(saved[0].password_hash, user.password_hash);

    let html_page = app.get_users_html().await;
    assert!(html_page.contains("<p><i>Usuario actualizado</i></p>"));
}

#[sqlx::test]
async fn an_updated_password_is_never_stored_in_plaintext(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let user = app.create_user("Abc", "a@b.com", "secret1").await;

    let response = app.post_update(&user.id, "password=another-secret").await;
    assert_is_redirect_to(&response, "/users");

    let saved = app.stored_users().await;
    assert_ne!(saved[0].password_hash, "another-secret");
    assert_ne!(saved[0].password_hash, user.password_hash);
    assert!(saved[0].password_hash.starts_with("$argon2id$"));
}

#[sqlx::test]
async fn fields_outside_the_allow_list_are_ignored_on_update(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let user = app.create_user("Abc", "a@b.com", "secret1").await;

    let response = app
        .post_update(&user.id, "id=hijacked&password_hash=plain&name=Abcd")
        .await;
    assert_is_redirect_to(&response, "/users");

    let saved = app.stored_users().await;
    assert_eq!(saved[0].id, user.id);
    assert_eq!(saved[0].name, "Abcd");
    assert_eq!(saved[0].password_hash, user.password_hash);
}

#[sqlx::test]
async fn updating_an_unknown_user_is_a_no_op(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    app.create_user("Abc", "a@b.com", "secret1").await;

    let response = app.post_update("does-not-exist", "name=Ghost").await;
    assert_is_redirect_to(&response, "/users");

    let saved = app.stored_users().await;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name, "Abc");
}

#[sqlx::test]
async fn a_deleted_user_disappears_from_the_list(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let user = app.create_user("Abc", "a@b.com", "secret1").await;

    let response = app.get_delete(&user.id).await;
    assert_is_redirect_to(&response, "/users");

    assert!(app.stored_users().await.is_empty());
    let html_page = app.get_users_html().await;
    assert!(html_page.contains("<p><i>Usuario eliminado</i></p>"));
    assert!(!html_page.contains("<td>Abc</td>"));
}

#[sqlx::test]
async fn deleting_an_unknown_user_is_idempotent(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    app.create_user("Abc", "a@b.com", "secret1").await;

    for _ in 0..2 {
        let response = app.get_delete("does-not-exist").await;
        assert_is_redirect_to(&response, "/users");
    }

    assert_eq!(app.stored_users().await.len(), 1);
}

#[sqlx::test]
async fn users_are_listed_in_insertion_order(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    app.create_user("Zed", "z@example.com", "secret1").await;
    app.create_user("Amy", "a@example.com", "secret1").await;

    let html_page = app.get_users_html().await;

    let zed = html_page.find("<td>Zed</td>").unwrap();
    let amy = html_page.find("<td>Amy</td>").unwrap();
    assert!(zed < amy);
}

#[sqlx::test]
async fn store_failures_are_reported_as_a_500(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let user = app.create_user("Abc", "a@b.com", "secret1").await;

    sqlx::query("DROP TABLE users")
        .execute(&app.db_pool)
        .await
        .expect("Failed to drop the users table.");

    let response = app.get_users().await;
    assert_eq!(response.status().as_u16(), 500);

    let response = app
        .post_users("name=Abc&email=a%40b.com&password=secret1")
        .await;
    assert_eq!(response.status().as_u16(), 500);

    let response = app.post_update(&user.id, "name=NewName").await;
    assert_eq!(response.status().as_u16(), 500);

    let response = app.get_delete(&user.id).await;
    assert_eq!(response.status().as_u16(), 500);
}
