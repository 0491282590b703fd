//! Dashboard, accounts and transactions screens.

use pragyan::api::accounts::{
    ACCOUNT_PURPOSES, ACCOUNT_TYPES, Account, AccountApplication, EMPLOYMENT_STATUSES,
    Transaction, total_balance,
};
use url::form_urlencoded;

use super::{Frame, badge, card, datetime, html_escape, layout, money, select, table, text};

pub fn dashboard_page(frame: &Frame<'_>, accounts: &[Account]) -> String {
    let active = accounts.iter().filter(|a| a.is_active()).count();
    let stats = format!(
        r#"<div class="stats">
            <section class="card stat"><h2>Total balance</h2><div class="value">{total}</div></section>
            <section class="card stat"><h2>Active accounts</h2><div class="value">{active}</div></section>
        </div>"#,
        total = money(total_balance(accounts)),
    );

    let body = format!(
        r#"<p>Welcome back, {name}.</p>
        {stats}
        {accounts}
        <section class="card">
            <h2>Quick actions</h2>
            <p>
                <a href="/transactions">Move money</a> &middot;
                <a href="/accounts">Open an account</a> &middot;
                <a href="/credit-cards">Apply for a card</a> &middot;
                <a href="/loans">Apply for a loan</a>
            </p>
        </section>"#,
        name = html_escape(frame.identity.greeting_name()),
        accounts = card("Your accounts", &accounts_table(accounts)),
    );
    layout(frame, "Dashboard", &body)
}

pub fn accounts_page(
    frame: &Frame<'_>,
    accounts: &[Account],
    applications: &[AccountApplication],
) -> String {
    let application_rows: Vec<Vec<String>> = applications
        .iter()
        .map(|app| {
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(&app.application_number)),
                text(app.account_type.as_deref()),
                badge(app.status()),
                text(app.rejection_reason.as_deref()),
                datetime(app.created_at),
            ]
        })
        .collect();

    let form = format!(
        r#"<form method="POST" action="/accounts/apply">
            <div class="form-row">
                <div class="form-group">
                    <label for="account_type">Account type</label>
                    {account_type}
                </div>
                <div class="form-group">
                    <label for="initial_deposit">Initial deposit</label>
                    <input type="number" step="0.01" min="0" id="initial_deposit" name="initial_deposit">
                </div>
                <div class="form-group">
                    <label for="currency">Currency</label>
                    <input type="text" id="currency" name="currency" value="USD">
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="purpose">Purpose</label>
                    {purpose}
                </div>
                <div class="form-group">
                    <label for="employment_status">Employment status</label>
                    {employment}
                </div>
                <div class="form-group">
                    <label for="monthly_income">Monthly income</label>
                    <input type="number" step="0.01" min="0" id="monthly_income" name="monthly_income">
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="address">Address</label>
                    <input type="text" id="address" name="address">
                </div>
                <div class="form-group">
                    <label for="phone_number">Phone number</label>
                    <input type="text" id="phone_number" name="phone_number">
                </div>
            </div>
            <button type="submit">Submit application</button>
        </form>"#,
        account_type = select("account_type", &ACCOUNT_TYPES, None),
        purpose = select("purpose", &ACCOUNT_PURPOSES, Some("Select a purpose")),
        employment = select("employment_status", &EMPLOYMENT_STATUSES, Some("Select a status")),
    );

    let body = [
        card("Your accounts", &accounts_table(accounts)),
        card("Open a new account", &form),
        card(
            "Your applications",
            &table(
                &["Application", "Type", "Status", "Reason", "Submitted"],
                &application_rows,
                "No applications yet.",
            ),
        ),
    ]
    .concat();
    layout(frame, "Accounts", &body)
}

pub fn transactions_page(
    frame: &Frame<'_>,
    accounts: &[Account],
    selected: Option<&str>,
    history: &[Transaction],
) -> String {
    if accounts.is_empty() {
        let body = card(
            "No accounts",
            r#"<p class="empty">Open an account before moving money. <a href="/accounts">Apply now</a></p>"#,
        );
        return layout(frame, "Transactions", &body);
    }

    let options: String = accounts
        .iter()
        .filter(|a| a.is_active())
        .map(|a| {
            let number = html_escape(&a.account_number);
            let chosen = if Some(a.account_number.as_str()) == selected { " selected" } else { "" };
            format!(
                r#"<option value="{number}"{chosen}>{number} ({})</option>"#,
                money(a.balance)
            )
        })
        .collect();
    let account_select = |name: &str| format!(r#"<select name="{name}" required>{options}</select>"#);

    let forms = format!(
        r#"<div class="form-row">
            <form method="POST" action="/transactions/deposit" class="form-group">
                <h2>Deposit</h2>
                <label>To account</label>{deposit_account}
                <label>Amount</label><input type="number" step="0.01" min="0.01" name="amount" required>
                <label>Description</label><input type="text" name="description" placeholder="Deposit to account">
                <p><button type="submit">Deposit</button></p>
            </form>
            <form method="POST" action="/transactions/withdraw" class="form-group">
                <h2>Withdraw</h2>
                <label>From account</label>{withdraw_account}
                <label>Amount</label><input type="number" step="0.01" min="0.01" name="amount" required>
                <label>Description</label><input type="text" name="description" placeholder="Withdrawal from account">
                <p><button type="submit">Withdraw</button></p>
            </form>
            <form method="POST" action="/transactions/transfer" class="form-group">
                <h2>Transfer</h2>
                <label>From account</label>{transfer_account}
                <label>To account number</label><input type="text" name="to_account" required>
                <label>Amount</label><input type="number" step="0.01" min="0.01" name="amount" required>
                <label>Description</label><input type="text" name="description" placeholder="Transfer between accounts">
                <p><button type="submit">Transfer</button></p>
            </form>
        </div>"#,
        deposit_account = account_select("account"),
        withdraw_account = account_select("account"),
        transfer_account = account_select("account"),
    );

    let rows: Vec<Vec<String>> = history
        .iter()
        .map(|txn| {
            vec![
                datetime(txn.created_at),
                text(txn.transaction_type.as_deref()),
                text(txn.from_account.as_deref()),
                text(txn.to_account.as_deref()),
                money(txn.amount),
                text(txn.description.as_deref()),
                badge(txn.transaction_status.as_deref().unwrap_or("COMPLETED")),
            ]
        })
        .collect();
    let picker: String = accounts
        .iter()
        .map(|a| {
            let query: String = form_urlencoded::byte_serialize(a.account_number.as_bytes()).collect();
            format!(
                r#"<a href="/transactions?account={query}">{}</a> "#,
                html_escape(&a.account_number)
            )
        })
        .collect();
    let title = match selected {
        Some(account) => format!("History of {}", html_escape(account)),
        None => "History".to_string(),
    };
    let history_html = format!(
        "<p>{picker}</p>{}",
        table(
            &["Date", "Type", "From", "To", "Amount", "Description", "Status"],
            &rows,
            "No transactions on this account yet.",
        )
    );

    let body = [card("Move money", &forms), card(&title, &history_html)].concat();
    layout(frame, "Transactions", &body)
}

fn accounts_table(accounts: &[Account]) -> String {
    let rows: Vec<Vec<String>> = accounts
        .iter()
        .map(|account| {
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(&account.account_number)),
                text(account.account_type.as_deref()),
                format!(
                    "{} {}",
                    money(account.balance),
                    text(account.currency.as_deref())
                ),
                badge(if account.is_active() { "ACTIVE" } else { "CLOSED" }),
                datetime(account.created_at),
            ]
        })
        .collect();
    table(
        &["Account", "Type", "Balance", "Status", "Opened"],
        &rows,
        "No accounts yet.",
    )
}
