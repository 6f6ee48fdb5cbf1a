use home_listing::listings::{HomeFormView, InputType, Notification, Route, SIGN_IN_FIELDS};
use std::fmt::Write;

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

pub(crate) fn landing() -> String {
    let body = format!(
        "<main>\n<h1>Homes</h1>\n<nav>\n<a href=\"{}\">Sign in</a>\n<a href=\"{}\">List your home</a>\n</nav>\n</main>",
        Route::SignIn.path(),
        Route::CreateHome.path()
    );
    layout("Homes", &body)
}

/// Sign-in form; credentials are posted straight to the listing backend.
pub(crate) fn sign_in(api_url: &str) -> String {
    let mut inputs = String::new();
    for field in SIGN_IN_FIELDS {
        let _ = write!(
            inputs,
            "<label>{label}<input type=\"{kind}\" name=\"{name}\" data-testid=\"{test_id}\"></label>\n",
            label = escape(field.label_name),
            kind = field.input_type,
            name = field.name,
            test_id = field.test_id,
        );
    }

    let body = format!(
        "<main>\n<h1>Sign in</h1>\n<form method=\"post\" action=\"{}/signin\">\n{}<button type=\"submit\">Sign in</button>\n</form>\n</main>",
        escape(api_url),
        inputs
    );
    layout("Sign in", &body)
}

fn alerts(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return String::new();
    }
    let mut out = String::from("<ul class=\"alerts\">\n");
    for notification in notifications {
        let auto_close = notification
            .options
            .auto_close
            .map(|duration| duration.as_millis().to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "<li role=\"alert\" data-auto-close=\"{}\">{}</li>",
            auto_close,
            escape(&notification.message)
        );
    }
    out.push_str("</ul>\n");
    out
}

fn field_error(error: Option<&str>) -> String {
    error
        .map(|message| format!("<span class=\"error\">{}</span>", escape(message)))
        .unwrap_or_default()
}

pub(crate) fn create_home(view: &HomeFormView, notifications: &[Notification]) -> String {
    let mut rows = String::new();
    for row in &view.rows {
        let kind = match row.input_type {
            InputType::TextArea => InputType::Text,
            other => other,
        };
        let _ = writeln!(
            rows,
            "<label>{label}<input type=\"{kind}\" name=\"{name}\" value=\"{value}\" data-testid=\"{test_id}\">{error}</label>",
            label = escape(row.label_name),
            name = row.name,
            value = escape(&row.value),
            test_id = row.test_id,
            error = field_error(row.error.as_deref()),
        );
    }

    let photo_state = if view.has_photo {
        "<p class=\"photo-attached\">Photo attached</p>\n"
    } else {
        ""
    };

    let body = format!(
        "<main>\n<h1>List your home</h1>\n{alerts}<form method=\"post\" enctype=\"multipart/form-data\" data-testid=\"{form_id}\">\n{rows}<label>Photo<input type=\"file\" accept=\"image/*\" name=\"{photo_name}\" data-testid=\"{photo_id}\"></label>\n{photo_state}<label>Description<textarea name=\"description\" data-testid=\"{description_id}\">{description}</textarea>{description_error}</label>\n<button type=\"submit\">Create listing</button>\n</form>\n</main>",
        alerts = alerts(notifications),
        form_id = view.form_test_id,
        rows = rows,
        photo_name = view.photo_field,
        photo_id = view.photo_test_id,
        photo_state = photo_state,
        description_id = view.description_test_id,
        description = escape(&view.description),
        description_error = field_error(view.description_error.as_deref()),
    );
    layout("List your home", &body)
}

pub(crate) fn edit_home(home_id: &str) -> String {
    let body = format!(
        "<main>\n<h1>Edit home</h1>\n<p data-testid=\"home-id\">{}</p>\n</main>",
        escape(home_id)
    );
    layout("Edit home", &body)
}
