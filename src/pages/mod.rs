//! Server-rendered pages for the browser surface.
//!
//! The only page is the home page. It is assembled from a constant template
//! with placeholder substitution; identity-derived values are HTML-escaped
//! before they reach the page.

use crate::session::Session;

/// Page renderer, configured once at startup.
#[derive(Debug)]
pub struct Pages {
    home_text: String,
}

impl Pages {
    #[must_use]
    pub fn new(home_text: String) -> Self {
        Self { home_text }
    }

    #[must_use]
    pub fn home_text(&self) -> &str {
        &self.home_text
    }

    #[must_use]
    pub fn render_home(&self, session: &Session) -> String {
        HOME_TEMPLATE
            .replace("{HOME_TEXT}", &escape_html(&self.home_text))
            .replace("{USER_EMAIL}", &escape_html(&session.user_email))
            .replace("{USER_NAME}", &escape_html(&session.user_name))
            .replace("{USER_ID}", &escape_html(&session.user_id))
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const HOME_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{HOME_TEXT}</title>
    <style>
        body { font-family: sans-serif; max-width: 40rem; margin: 3rem auto; padding: 0 1rem; }
        .identity { background: #f0fff4; border: 1px solid #9c9; border-radius: 4px; padding: 1rem; }
        .actions a { display: inline-block; margin-right: 1rem; }
    </style>
</head>
<body>
    <h1>{HOME_TEXT}</h1>
    <div class="identity">
        <h2>Authentication successful</h2>
        <p><strong>Email:</strong> {USER_EMAIL}</p>
        <p><strong>Name:</strong> {USER_NAME}</p>
        <p><strong>User ID:</strong> {USER_ID}</p>
    </div>
    <p class="actions">
        <a href="/protected">Protected endpoint</a>
        <a href="/logout">Logout</a>
    </p>
</body>
</html>
"#;
