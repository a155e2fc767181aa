//! Minimal HTML views.
//!
//! Pages are assembled from strings; every interpolated value goes through
//! [`escape`]. The layout takes the navigation list, the caller's session and
//! an optional notice so each handler only renders its own content.

pub mod account;
pub mod inventory;

use cse_core::models::{Classification, Identity};
use cse_core::validation::FieldError;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `28045` → `28,045`.
pub fn group_digits(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Site navigation: home plus one link per classification.
pub fn nav(classifications: &[Classification]) -> String {
    let mut list = String::from(r#"<ul><li><a href="/" title="Home page">Home</a></li>"#);
    for c in classifications {
        let name = escape(&c.name);
        list.push_str(&format!(
            r#"<li><a href="/inventory/type/{}" title="See our inventory of {name} vehicles">{name}</a></li>"#,
            c.id
        ));
    }
    list.push_str("</ul>");
    list
}

/// Ordered validation messages.
pub fn error_list(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut list = String::from(r#"<ul class="notice errors">"#);
    for e in errors {
        list.push_str(&format!(
            r#"<li data-field="{}">{}</li>"#,
            e.field,
            escape(&e.message)
        ));
    }
    list.push_str("</ul>");
    list
}

/// `<select>` of classifications with `selected` pre-chosen.
pub fn classification_select(classifications: &[Classification], selected: Option<i32>) -> String {
    let mut select = String::from(
        r#"<select name="classification_id" id="classificationList" required><option value="">Choose a Classification</option>"#,
    );
    for c in classifications {
        let marker = if Some(c.id) == selected { " selected" } else { "" };
        select.push_str(&format!(
            r#"<option value="{}"{marker}>{}</option>"#,
            c.id,
            escape(&c.name)
        ));
    }
    select.push_str("</select>");
    select
}

fn account_header(identity: Option<&Identity>) -> String {
    match identity {
        Some(identity) => format!(
            r#"<a href="/account/" title="Manage your account">Welcome {}</a> <a href="/account/logout" title="Log out">Logout</a>"#,
            escape(&identity.firstname)
        ),
        None => r#"<a href="/account/login" title="Click to log in">My Account</a>"#.to_string(),
    }
}

/// Full page around `content`.
pub fn layout(
    title: &str,
    nav: &str,
    identity: Option<&Identity>,
    notices: &[String],
    content: &str,
) -> String {
    let notices: String = notices
        .iter()
        .map(|n| format!(r#"<p class="notice">{}</p>"#, escape(n)))
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} | CSE Motors</title></head>
<body>
<header><span class="siteName"><a href="/" title="Return to home page">CSE Motors</a></span>
<div id="tools">{account}</div>
<form action="/search/results" method="get" class="search"><input type="search" name="search_term" aria-label="Search inventory"><button type="submit">Search</button></form>
</header>
<nav>{nav}</nav>
<main>
<h1>{title}</h1>
{notices}
{content}
</main>
</body>
</html>"#,
        title = escape(title),
        account = account_header(identity),
    )
}

/// Standalone error page; carries no request or storage detail.
pub fn error_page(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} | CSE Motors</title></head>
<body>
<main>
<h1>{title}</h1>
<p class="notice">{message}</p>
<p><a href="/">Return home</a></p>
</main>
</body>
</html>"#,
        title = escape(title),
        message = escape(message),
    )
}
