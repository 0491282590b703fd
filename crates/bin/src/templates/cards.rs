//! Credit card and gift card screens.

use pragyan::api::{
    accounts::{Account, EMPLOYMENT_STATUSES},
    credit_cards::{CARD_TYPES, CreditCard, CreditCardApplication},
    gift_cards::GiftCard,
};

use super::{
    Frame, action_button, badge, card, date, datetime, html_escape, layout, money,
    optional_money, select, table, text,
};

pub fn credit_cards_page(
    frame: &Frame<'_>,
    cards: &[CreditCard],
    applications: &[CreditCardApplication],
) -> String {
    let card_rows: Vec<Vec<String>> = cards
        .iter()
        .map(|c| {
            let number = [("card_number", c.card_number.as_str())];
            let toggle = if c.is_blocked() {
                action_button("/credit-cards/unblock", "Unblock", "secondary", &number)
            } else {
                action_button("/credit-cards/block", "Block", "danger", &number)
            };
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(&c.masked_number())),
                text(c.card_type.as_deref()),
                money(c.credit_limit),
                money(c.available_credit),
                money(c.outstanding_balance),
                date(c.expiry_date),
                badge(if c.is_blocked() { "BLOCKED" } else { "ACTIVE" }),
                toggle,
            ]
        })
        .collect();

    let usable: String = cards
        .iter()
        .filter(|c| !c.is_blocked())
        .map(|c| {
            format!(
                r#"<option value="{}">{}</option>"#,
                html_escape(&c.card_number),
                html_escape(&c.masked_number())
            )
        })
        .collect();
    let card_select = format!(r#"<select name="card_number" required>{usable}</select>"#);
    let transactions = if usable.is_empty() {
        r#"<p class="empty">Purchases and payments need an active card.</p>"#.to_string()
    } else {
        format!(
            r#"<div class="form-row">
            <form method="POST" action="/credit-cards/purchase" class="form-group">
                <h2>Purchase</h2>
                <label>Card</label>{card_select}
                <label>Amount</label><input type="number" step="0.01" min="0.01" name="amount" required>
                <label>Merchant</label><input type="text" name="merchant_name">
                <label>Description</label><input type="text" name="description">
                <p><button type="submit">Record purchase</button></p>
            </form>
            <form method="POST" action="/credit-cards/payment" class="form-group">
                <h2>Payment</h2>
                <label>Card</label>{card_select}
                <label>Amount</label><input type="number" step="0.01" min="0.01" name="amount" required>
                <label>Description</label><input type="text" name="description">
                <p><button type="submit">Make payment</button></p>
            </form>
        </div>"#
        )
    };

    let application_rows: Vec<Vec<String>> = applications
        .iter()
        .map(|app| {
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(&app.application_number)),
                text(app.card_type.as_deref()),
                optional_money(app.approved_credit_limit),
                badge(app.status()),
                text(app.rejection_reason.as_deref()),
                datetime(app.created_at),
            ]
        })
        .collect();

    let name = html_escape(&frame.identity.display_name());
    let email = html_escape(frame.identity.email.as_deref().unwrap_or(""));
    let phone = html_escape(frame.identity.phone_number.as_deref().unwrap_or(""));
    let form = format!(
        r#"<form method="POST" action="/credit-cards/apply">
            <div class="form-row">
                <div class="form-group">
                    <label for="card_holder_name">Name on card</label>
                    <input type="text" id="card_holder_name" name="card_holder_name" value="{name}" required>
                </div>
                <div class="form-group">
                    <label for="card_type">Card type</label>
                    {card_type}
                </div>
                <div class="form-group">
                    <label for="annual_income">Annual income</label>
                    <input type="number" step="0.01" min="0.01" id="annual_income" name="annual_income" required>
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="email">Email</label>
                    <input type="email" id="email" name="email" value="{email}">
                </div>
                <div class="form-group">
                    <label for="phone_number">Phone number</label>
                    <input type="text" id="phone_number" name="phone_number" value="{phone}">
                </div>
                <div class="form-group">
                    <label for="date_of_birth">Date of birth</label>
                    <input type="date" id="date_of_birth" name="date_of_birth">
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="address_line1">Address</label>
                    <input type="text" id="address_line1" name="address_line1">
                </div>
                <div class="form-group">
                    <label for="city">City</label>
                    <input type="text" id="city" name="city">
                </div>
                <div class="form-group">
                    <label for="state">State</label>
                    <input type="text" id="state" name="state">
                </div>
                <div class="form-group">
                    <label for="zip_code">ZIP code</label>
                    <input type="text" id="zip_code" name="zip_code">
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="employment_status">Employment status</label>
                    {employment}
                </div>
                <div class="form-group">
                    <label for="employer_name">Employer</label>
                    <input type="text" id="employer_name" name="employer_name">
                </div>
            </div>
            <button type="submit">Apply</button>
        </form>"#,
        card_type = select("card_type", &CARD_TYPES, None),
        employment = select("employment_status", &EMPLOYMENT_STATUSES, Some("Select a status")),
    );

    let body = [
        card(
            "Your cards",
            &table(
                &["Card", "Type", "Limit", "Available", "Balance", "Expires", "Status", ""],
                &card_rows,
                "No credit cards yet.",
            ),
        ),
        card("Purchases and payments", &transactions),
        card("Apply for a credit card", &form),
        card(
            "Your applications",
            &table(
                &["Application", "Type", "Approved limit", "Status", "Reason", "Submitted"],
                &application_rows,
                "No applications yet.",
            ),
        ),
    ]
    .concat();
    layout(frame, "Credit Cards", &body)
}

pub fn gift_cards_page(frame: &Frame<'_>, cards: &[GiftCard], accounts: &[Account]) -> String {
    let rows: Vec<Vec<String>> = cards
        .iter()
        .map(|c| {
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(&c.card_code)),
                money(c.initial_balance),
                money(c.current_balance),
                date(c.expiry_date),
                badge(if c.is_redeemed() { "REDEEMED" } else { "ACTIVE" }),
            ]
        })
        .collect();

    let account_options: String = accounts
        .iter()
        .filter(|a| a.is_active())
        .map(|a| {
            let number = html_escape(&a.account_number);
            format!(r#"<option value="{number}">{number}</option>"#)
        })
        .collect();
    let redeem = if account_options.is_empty() {
        r#"<p class="empty">Gift cards are redeemed into an account. Open one first.</p>"#.to_string()
    } else {
        format!(
            r#"<form method="POST" action="/gift-cards/redeem">
            <div class="form-row">
                <div class="form-group">
                    <label for="card_code">Gift card code</label>
                    <input type="text" id="card_code" name="card_code" required>
                </div>
                <div class="form-group">
                    <label for="account">Deposit into</label>
                    <select id="account" name="account" required>{account_options}</select>
                </div>
            </div>
            <button type="submit">Redeem</button>
        </form>"#
        )
    };

    let buy = r#"<form method="POST" action="/gift-cards/buy">
            <div class="form-group">
                <label for="amount">Amount</label>
                <input type="number" step="0.01" min="0.01" id="amount" name="amount" required>
            </div>
            <button type="submit">Buy gift card</button>
        </form>"#;

    let body = [
        card(
            "Your gift cards",
            &table(
                &["Code", "Value", "Balance", "Expires", "Status"],
                &rows,
                "No gift cards yet.",
            ),
        ),
        card("Buy a gift card", buy),
        card("Redeem a gift card", &redeem),
    ]
    .concat();
    layout(frame, "Gift Cards", &body)
}
