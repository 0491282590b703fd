//! HTML templates for the web front
//!
//! Simple inline HTML templates without a template engine. Every value that
//! came from a backend or a form goes through [`html_escape`].

mod admin;
mod banking;
mod cards;
mod loans;
mod lockers;

pub use admin::{
    PendingCounts, admin_accounts_page, admin_credit_cards_page, admin_dashboard_page,
    admin_loans_page,
};
pub use banking::{accounts_page, dashboard_page, transactions_page};
pub use cards::{credit_cards_page, gift_cards_page};
pub use loans::loans_page;
pub use lockers::lockers_page;

use chrono::{NaiveDate, NaiveDateTime};
use pragyan::{
    Identity,
    routing::{Chrome, Route},
};

use crate::web::{Flash, FlashKind};

/// Common CSS styles for all pages
const COMMON_STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        margin: 0;
        background: #f3f5f9;
        color: #222;
    }
    header {
        display: flex;
        justify-content: space-between;
        align-items: center;
        background: #123c69;
        color: white;
        padding: 12px 24px;
    }
    header .brand {
        font-size: 20px;
        font-weight: bold;
    }
    header .user {
        display: flex;
        align-items: center;
        gap: 12px;
    }
    .avatar {
        display: inline-block;
        width: 32px;
        height: 32px;
        line-height: 32px;
        text-align: center;
        border-radius: 50%;
        background: #ac3b61;
        font-weight: bold;
    }
    .shell {
        display: flex;
        min-height: calc(100vh - 56px);
    }
    nav {
        width: 220px;
        background: white;
        border-right: 1px solid #dde2ea;
        padding: 16px 0;
    }
    nav a {
        display: block;
        padding: 10px 24px;
        color: #333;
        text-decoration: none;
    }
    nav a.active {
        background: #e8eef7;
        color: #123c69;
        font-weight: bold;
        border-left: 3px solid #123c69;
    }
    main {
        flex: 1;
        padding: 24px 32px;
    }
    .container {
        max-width: 420px;
        margin: 60px auto;
        background: white;
        padding: 30px;
        border-radius: 8px;
        box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    .card {
        background: white;
        padding: 20px;
        margin-bottom: 20px;
        border-radius: 8px;
        box-shadow: 0 1px 3px rgba(0,0,0,0.08);
    }
    .stats {
        display: flex;
        gap: 16px;
        flex-wrap: wrap;
    }
    .stat {
        flex: 1;
        min-width: 160px;
    }
    .stat .value {
        font-size: 24px;
        color: #123c69;
        font-weight: bold;
    }
    h1 {
        color: #123c69;
        margin-top: 0;
    }
    h2 {
        color: #444;
        font-size: 18px;
        margin-top: 0;
    }
    .form-group {
        margin: 12px 0;
    }
    .form-row {
        display: flex;
        gap: 12px;
        flex-wrap: wrap;
    }
    .form-row .form-group {
        flex: 1;
        min-width: 160px;
    }
    label {
        display: block;
        font-weight: bold;
        margin-bottom: 4px;
        color: #333;
    }
    input, select {
        width: 100%;
        padding: 9px;
        border: 1px solid #ccd3dd;
        border-radius: 4px;
        font-size: 14px;
        box-sizing: border-box;
    }
    button {
        background: #123c69;
        color: white;
        padding: 9px 18px;
        border: none;
        border-radius: 4px;
        cursor: pointer;
        font-size: 14px;
        font-weight: bold;
    }
    button.secondary {
        background: #888;
    }
    button.danger {
        background: #b33a3a;
    }
    form.inline {
        display: inline;
        margin: 0 4px 0 0;
    }
    table {
        width: 100%;
        border-collapse: collapse;
    }
    th, td {
        text-align: left;
        padding: 10px;
        border-bottom: 1px solid #e3e7ee;
        vertical-align: top;
    }
    th {
        background: #f0f3f8;
        color: #333;
    }
    .badge {
        display: inline-block;
        padding: 2px 8px;
        border-radius: 10px;
        font-size: 12px;
        font-weight: bold;
        background: #e3e7ee;
    }
    .badge.approved, .badge.active, .badge.completed, .badge.allocated, .badge.disbursed {
        background: #dff0d8;
        color: #2d672d;
    }
    .badge.rejected, .badge.blocked, .badge.failed, .badge.closed {
        background: #f2dede;
        color: #a33;
    }
    .badge.pending, .badge.under_review {
        background: #fcf3d9;
        color: #8a6d3b;
    }
    .notice {
        padding: 10px 14px;
        border-radius: 4px;
        margin-bottom: 16px;
    }
    .notice.error {
        color: #a33;
        background: #f2dede;
    }
    .notice.success {
        color: #2d672d;
        background: #dff0d8;
    }
    .empty {
        color: #777;
        font-style: italic;
    }
    .code {
        font-family: monospace;
    }
"#;

const STANDARD_NAV: [(Route, &str); 7] = [
    (Route::Dashboard, "Dashboard"),
    (Route::Accounts, "Accounts"),
    (Route::Transactions, "Transactions"),
    (Route::CreditCards, "Credit Cards"),
    (Route::GiftCards, "Gift Cards"),
    (Route::Loans, "Loans"),
    (Route::Lockers, "Lockers"),
];

const ADMIN_NAV: [(Route, &str); 4] = [
    (Route::AdminDashboard, "Admin Dashboard"),
    (Route::AdminAccounts, "Account Applications"),
    (Route::AdminCreditCards, "Credit Card Applications"),
    (Route::AdminLoans, "Loan Applications"),
];

/// Everything the authenticated layout needs besides the page body.
pub struct Frame<'a> {
    pub identity: &'a Identity,
    pub chrome: Chrome,
    pub route: Route,
    pub flash: Option<&'a Flash>,
}

/// Wrap `body` in the header and the role's sidebar.
fn layout(frame: &Frame<'_>, title: &str, body: &str) -> String {
    let nav: &[(Route, &str)] = match frame.chrome {
        Chrome::Standard => &STANDARD_NAV,
        Chrome::Administrator => &ADMIN_NAV,
    };
    let links: String = nav
        .iter()
        .map(|(route, label)| {
            let class = if *route == frame.route { r#" class="active""# } else { "" };
            format!(r#"<a href="{}"{class}>{label}</a>"#, route.path())
        })
        .collect();
    let identity = frame.identity;

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Pragyan - {title}</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <header>
        <span class="brand">Pragyan Bank</span>
        <span class="user">
            <span class="avatar">{initial}</span>
            <span>{name}</span>
            <form method="POST" action="/logout" class="inline">
                <button type="submit" class="secondary">Logout</button>
            </form>
        </span>
    </header>
    <div class="shell">
        <nav>{links}</nav>
        <main>
            <h1>{title}</h1>
            {flash}
            {body}
        </main>
    </div>
</body>
</html>"#,
        initial = html_escape(&identity.initial().to_string()),
        name = html_escape(&identity.display_name()),
        flash = notice_html(frame.flash),
    )
}

/// A standalone page without header or sidebar, for the public screens.
fn bare(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Pragyan - {title}</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <div class="container">
        <h1>Pragyan Bank</h1>
        {body}
    </div>
</body>
</html>"#
    )
}

/// Render the login page
pub fn login_page(flash: Option<&Flash>, username: &str) -> String {
    let body = format!(
        r#"<h2>Sign in</h2>
        {notice}
        <form method="POST" action="/login">
            <div class="form-group">
                <label for="username">Username</label>
                <input type="text" id="username" name="username" value="{username}" required autofocus>
            </div>
            <div class="form-group">
                <label for="password">Password</label>
                <input type="password" id="password" name="password" required>
            </div>
            <button type="submit">Sign in</button>
        </form>
        <p>Don't have an account? <a href="/signup">Sign up</a></p>"#,
        notice = notice_html(flash),
        username = html_escape(username),
    );
    bare("Login", &body)
}

/// Render the signup page, keeping whatever was already typed except passwords
pub fn signup_page(flash: Option<&Flash>, form: &pragyan::auth::SignupForm) -> String {
    let body = format!(
        r#"<h2>Create an account</h2>
        {notice}
        <form method="POST" action="/signup">
            <div class="form-row">
                <div class="form-group">
                    <label for="first_name">First name</label>
                    <input type="text" id="first_name" name="first_name" value="{first_name}" required>
                </div>
                <div class="form-group">
                    <label for="last_name">Last name</label>
                    <input type="text" id="last_name" name="last_name" value="{last_name}" required>
                </div>
            </div>
            <div class="form-group">
                <label for="username">Username</label>
                <input type="text" id="username" name="username" value="{username}" required>
            </div>
            <div class="form-group">
                <label for="email">Email</label>
                <input type="email" id="email" name="email" value="{email}" required>
            </div>
            <div class="form-group">
                <label for="phone_number">Phone number (optional)</label>
                <input type="text" id="phone_number" name="phone_number" value="{phone}">
            </div>
            <div class="form-group">
                <label for="password">Password</label>
                <input type="password" id="password" name="password" required>
            </div>
            <div class="form-group">
                <label for="confirm_password">Confirm password</label>
                <input type="password" id="confirm_password" name="confirm_password" required>
            </div>
            <button type="submit">Sign up</button>
        </form>
        <p>Already registered? <a href="/login">Sign in</a></p>"#,
        notice = notice_html(flash),
        first_name = html_escape(&form.first_name),
        last_name = html_escape(&form.last_name),
        username = html_escape(&form.username),
        email = html_escape(&form.email),
        phone = html_escape(form.phone_number.as_deref().unwrap_or("")),
    );
    bare("Sign up", &body)
}

/// Neutral placeholder shown while a persisted session is being checked.
pub fn loading_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta http-equiv="refresh" content="1">
    <title>Pragyan</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <div class="container">
        <p class="empty">Loading&hellip;</p>
    </div>
</body>
</html>"#
    )
}

pub fn not_found_page(path: &str) -> String {
    let body = format!(
        r#"<h2>Page not found</h2>
        <p>Nothing lives at <span class="code">{}</span>.</p>
        <p><a href="/">Go home</a></p>"#,
        html_escape(path)
    );
    bare("Not found", &body)
}

fn notice_html(flash: Option<&Flash>) -> String {
    flash.map_or(String::new(), |flash| {
        let class = match flash.kind {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        };
        format!(
            r#"<div class="notice {class}">{}</div>"#,
            html_escape(&flash.message)
        )
    })
}

/// A titled white panel.
fn card(title: &str, content: &str) -> String {
    format!(r#"<section class="card"><h2>{title}</h2>{content}</section>"#)
}

/// A table whose cells are already HTML, or `empty` when there are no rows.
fn table(headers: &[&str], rows: &[Vec<String>], empty: &str) -> String {
    if rows.is_empty() {
        return format!(r#"<p class="empty">{empty}</p>"#);
    }
    let head: String = headers.iter().map(|h| format!("<th>{h}</th>")).collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row.iter().map(|c| format!("<td>{c}</td>")).collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();
    format!("<table><tr>{head}</tr>{body}</table>")
}

/// A `<select>` over backend enum values, labelled in title case.
fn select(name: &str, choices: &[&str], placeholder: Option<&str>) -> String {
    let mut options = String::new();
    if let Some(placeholder) = placeholder {
        options.push_str(&format!(r#"<option value="">{placeholder}</option>"#));
    }
    for choice in choices {
        options.push_str(&format!(
            r#"<option value="{}">{}</option>"#,
            html_escape(choice),
            html_escape(&humanize(choice))
        ));
    }
    let required = if placeholder.is_none() { " required" } else { "" };
    format!(r#"<select id="{name}" name="{name}"{required}>{options}</select>"#)
}

/// One-button form posting hidden fields to `action`.
fn action_button(action: &str, label: &str, class: &str, fields: &[(&str, &str)]) -> String {
    let hidden: String = fields
        .iter()
        .map(|(name, value)| {
            format!(
                r#"<input type="hidden" name="{name}" value="{}">"#,
                html_escape(value)
            )
        })
        .collect();
    format!(
        r#"<form method="POST" action="{action}" class="inline">{hidden}<button type="submit" class="{class}">{label}</button></form>"#
    )
}

fn badge(status: &str) -> String {
    format!(
        r#"<span class="badge {}">{}</span>"#,
        html_escape(&status.to_ascii_lowercase()),
        html_escape(&humanize(status))
    )
}

/// `FIXED_DEPOSIT` -> `Fixed Deposit`
pub fn humanize(value: &str) -> String {
    value
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${amount:.2}")
    }
}

fn optional_money(amount: Option<f64>) -> String {
    amount.map_or_else(|| "-".to_string(), money)
}

fn text(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => html_escape(v),
        _ => "-".to_string(),
    }
}

fn date(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn datetime(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |d| d.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
