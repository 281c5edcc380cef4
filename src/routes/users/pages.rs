use htmlescape::{encode_attribute, encode_minimal};
use std::fmt::Write;

use crate::domain::{UserDraft, UserRecord};

fn error_list(errors: &[&str]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut html = String::from("<ul class=\"errors\">\n");
    for e in errors {
        writeln!(html, "        <li>{}</li>", encode_minimal(e)).unwrap();
    }
    html.push_str("    </ul>");
    html
}

/// The list view with the create form underneath.
pub fn index_page(users: &[UserRecord], errors: &[&str], notices: &[String]) -> String {
    let mut notice_html = String::new();
    for n in notices {
        writeln!(notice_html, "<p><i>{}</i></p>", encode_minimal(n)).unwrap();
    }

    let mut rows = String::new();
    for user in users {
        let id = encode_attribute(user.id.as_ref());
        writeln!(
            rows,
            r#"        <tr>
            <td>{name}</td>
            <td>{email}</td>
            <td>{created}</td>
            <td><a href="/users/edit/{id}">Editar</a> <a href="/users/delete/{id}">Eliminar</a></td>
        </tr>"#,
            name = encode_minimal(&user.name),
            email = encode_minimal(&user.email),
            created = user.created_at.format("%Y-%m-%d %H:%M"),
        )
        .unwrap();
    }
    let errors = error_list(errors);

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>Usuarios</title>
</head>
<body>
    {notice_html}
    <h1>Usuarios</h1>
    <table>
        <tr><th>Nombre</th><th>Correo</th><th>Creado</th><th></th></tr>
{rows}    </table>
    {errors}
    <form action="/users" method="post">
        <label>Nombre <input type="text" name="name"></label>
        <label>Correo <input type="email" name="email"></label>
        <label>Contraseña <input type="password" name="password"></label>
        <button type="submit">Crear usuario</button>
    </form>
</body>
</html>"#
    )
}

/// The edit form, or an empty state when there is nothing to edit.
pub fn edit_page(user: Option<&UserDraft>, errors: &[&str]) -> String {
    let body = match user {
        None => r#"<p>Usuario no encontrado.</p>"#.to_string(),
        Some(user) => format!(
            r#"{errors}
    <form action="/users/update/{id}" method="post">
        <label>Nombre <input type="text" name="name" value="{name}"></label>
        <label>Correo <input type="email" name="email" value="{email}"></label>
        <label>Nueva contraseña <input type="password" name="password"></label>
        <button type="submit">Guardar</button>
    </form>"#,
            errors = error_list(errors),
            id = encode_attribute(user.id.as_ref()),
            name = encode_attribute(&user.name),
            email = encode_attribute(&user.email),
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>Editar usuario</title>
</head>
<body>
    <h1>Editar usuario</h1>
    {body}
    <p><a href="/users">&lt;- Volver</a></p>
</body>
</html>"#
    )
}
