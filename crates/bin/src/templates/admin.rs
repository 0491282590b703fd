//! Administrator screens.

use pragyan::api::{
    ReviewDecision, accounts::AccountApplication, credit_cards::CreditCardApplication,
    loans::LoanApplication,
};

use super::{
    Frame, action_button, badge, card, datetime, html_escape, humanize, layout, money,
    optional_money, table, text,
};

/// Applications waiting for a first review, per service.
#[derive(Debug, Default)]
pub struct PendingCounts {
    pub accounts: usize,
    pub credit_cards: usize,
    pub loans: usize,
}

/// Which approval terms a review form asks for.
#[derive(Clone, Copy)]
enum Terms {
    None,
    CreditLimit,
    Loan,
}

pub fn admin_dashboard_page(frame: &Frame<'_>, counts: &PendingCounts) -> String {
    let stat = |label: &str, count: usize, href: &str| {
        format!(
            r#"<section class="card stat"><h2>{label}</h2><div class="value">{count}</div><a href="{href}">Review</a></section>"#
        )
    };
    let body = format!(
        r#"<p>Signed in as administrator {name}.</p>
        <div class="stats">{accounts}{cards}{loans}</div>"#,
        name = html_escape(&frame.identity.username),
        accounts = stat("Pending account applications", counts.accounts, "/admin/accounts"),
        cards = stat("Pending card applications", counts.credit_cards, "/admin/credit-cards"),
        loans = stat("Pending loan applications", counts.loans, "/admin/loans"),
    );
    layout(frame, "Admin Dashboard", &body)
}

pub fn admin_accounts_page(frame: &Frame<'_>, applications: &[AccountApplication]) -> String {
    let rows: Vec<Vec<String>> = applications
        .iter()
        .map(|app| {
            let number = app.application_number.as_str();
            let follow_up = if app.awaits_account() {
                action_button(
                    "/admin/accounts/create",
                    "Create account",
                    "",
                    &[("application_number", number)],
                )
            } else {
                review_form("/admin/accounts/review", number, app.status(), Terms::None)
            };
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(number)),
                app.user_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
                text(app.account_type.as_deref()),
                optional_money(app.initial_deposit),
                optional_money(app.monthly_income),
                badge(app.status()),
                datetime(app.created_at),
                follow_up,
            ]
        })
        .collect();

    let body = card(
        "All account applications",
        &table(
            &["Application", "User", "Type", "Deposit", "Income", "Status", "Submitted", "Action"],
            &rows,
            "No account applications.",
        ),
    );
    layout(frame, "Account Applications", &body)
}

pub fn admin_credit_cards_page(frame: &Frame<'_>, applications: &[CreditCardApplication]) -> String {
    let rows: Vec<Vec<String>> = applications
        .iter()
        .map(|app| {
            let number = app.application_number.as_str();
            let follow_up = if app.status() == ReviewDecision::Approved.as_str() {
                action_button(
                    "/admin/credit-cards/issue",
                    "Issue card",
                    "",
                    &[("application_number", number)],
                )
            } else {
                review_form("/admin/credit-cards/review", number, app.status(), Terms::CreditLimit)
            };
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(number)),
                text(app.card_holder_name.as_deref()),
                text(app.card_type.as_deref()),
                optional_money(app.annual_income),
                app.credit_score
                    .map_or_else(|| "-".to_string(), |score| score.to_string()),
                optional_money(app.approved_credit_limit),
                badge(app.status()),
                follow_up,
            ]
        })
        .collect();

    let body = card(
        "Credit card applications",
        &table(
            &["Application", "Applicant", "Type", "Income", "Score", "Limit", "Status", "Action"],
            &rows,
            "No credit card applications.",
        ),
    );
    layout(frame, "Credit Card Applications", &body)
}

pub fn admin_loans_page(frame: &Frame<'_>, applications: &[LoanApplication]) -> String {
    let rows: Vec<Vec<String>> = applications
        .iter()
        .map(|app| {
            let number = app.application_number.as_str();
            let follow_up = if app.status() == ReviewDecision::Approved.as_str() {
                action_button(
                    "/admin/loans/disburse",
                    "Disburse",
                    "",
                    &[("application_number", number)],
                )
            } else {
                review_form("/admin/loans/review", number, app.status(), Terms::Loan)
            };
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(number)),
                text(app.applicant_name.as_deref()),
                text(app.loan_type.as_deref()),
                money(app.loan_amount),
                app.tenure_months
                    .map_or_else(|| "-".to_string(), |months| format!("{months} months")),
                optional_money(app.monthly_income),
                badge(app.status()),
                follow_up,
            ]
        })
        .collect();

    let body = card(
        "All loan applications",
        &table(
            &["Application", "Applicant", "Type", "Amount", "Tenure", "Income", "Status", "Action"],
            &rows,
            "No loan applications.",
        ),
    );
    layout(frame, "Loan Applications", &body)
}

/// Inline review form. Decided applications show nothing to do.
fn review_form(action: &str, application_number: &str, status: &str, terms: Terms) -> String {
    if matches!(status, "REJECTED" | "COMPLETED" | "DISBURSED") {
        return String::new();
    }
    let options: String = ReviewDecision::ALL
        .iter()
        .map(|decision| {
            format!(
                r#"<option value="{}">{}</option>"#,
                decision.as_str(),
                humanize(decision.as_str())
            )
        })
        .collect();
    let terms_html = match terms {
        Terms::None => String::new(),
        Terms::CreditLimit => r#"<input type="number" step="0.01" min="0" name="approved_credit_limit" placeholder="Credit limit">"#.to_string(),
        Terms::Loan => [
            r#"<input type="number" step="0.01" min="0" name="approved_amount" placeholder="Approved amount">"#,
            r#"<input type="number" step="0.01" min="0" name="approved_interest_rate" placeholder="Interest rate %">"#,
        ]
        .concat(),
    };

    format!(
        r#"<form method="POST" action="{action}">
            <input type="hidden" name="application_number" value="{number}">
            <select name="status" required>{options}</select>
            {terms_html}
            <input type="text" name="rejection_reason" placeholder="Rejection reason">
            <button type="submit">Save</button>
        </form>"#,
        number = html_escape(application_number),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decided_applications_have_no_review_form() {
        assert_eq!(review_form("/x", "APP1", "REJECTED", Terms::None), "");
    }

    #[test]
    fn loan_review_asks_for_terms() {
        let html = review_form("/admin/loans/review", "LAPP1", "PENDING", Terms::Loan);
        assert!(html.contains(r#"name="approved_amount""#));
        assert!(html.contains(r#"name="approved_interest_rate""#));
        assert!(html.contains(r#"<option value="UNDER_REVIEW">Under Review</option>"#));
    }
}
