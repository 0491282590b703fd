//! Locker screen.

use pragyan::api::lockers::{DEFAULT_BRANCH, LOCKER_SIZES, Locker};

use super::{
    Frame, action_button, badge, card, date, html_escape, layout, optional_money, select, table,
    text,
};

pub fn lockers_page(frame: &Frame<'_>, mine: &[Locker], available: &[Locker]) -> String {
    let my_rows: Vec<Vec<String>> = mine
        .iter()
        .map(|locker| {
            let number = [("locker_number", locker.locker_number.as_str())];
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(&locker.locker_number)),
                text(locker.locker_size.as_deref()),
                text(locker.branch_location.as_deref()),
                optional_money(locker.annual_fee),
                date(locker.allocation_date),
                date(locker.expiry_date),
                badge(locker.locker_status.as_deref().unwrap_or("ALLOCATED")),
                [
                    action_button("/lockers/renew", "Renew", "secondary", &number),
                    action_button("/lockers/release", "Release", "danger", &number),
                ]
                .concat(),
            ]
        })
        .collect();

    let available_rows: Vec<Vec<String>> = available
        .iter()
        .map(|locker| {
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(&locker.locker_number)),
                text(locker.locker_size.as_deref()),
                text(locker.branch_location.as_deref()),
                optional_money(locker.annual_fee),
            ]
        })
        .collect();

    let form = format!(
        r#"<form method="POST" action="/lockers/rent">
            <div class="form-row">
                <div class="form-group">
                    <label for="locker_size">Size</label>
                    {size}
                </div>
                <div class="form-group">
                    <label for="branch_location">Branch</label>
                    <input type="text" id="branch_location" name="branch_location" value="{branch}">
                </div>
            </div>
            <button type="submit">Rent a locker</button>
        </form>"#,
        size = select("locker_size", &LOCKER_SIZES, None),
        branch = html_escape(DEFAULT_BRANCH),
    );

    let body = [
        card(
            "Your lockers",
            &table(
                &["Locker", "Size", "Branch", "Annual fee", "Allocated", "Expires", "Status", ""],
                &my_rows,
                "You have no lockers.",
            ),
        ),
        card("Rent a locker", &form),
        card(
            "Available lockers",
            &table(
                &["Locker", "Size", "Branch", "Annual fee"],
                &available_rows,
                "No lockers are available right now.",
            ),
        ),
    ]
    .concat();
    layout(frame, "Lockers", &body)
}
