//! Loan screen.

use pragyan::api::loans::{LOAN_TYPES, Loan, LoanApplication, TENURE_MONTHS};

use super::{
    Frame, badge, card, date, datetime, html_escape, layout, money, optional_money, select, table,
    text,
};

pub fn loans_page(frame: &Frame<'_>, loans: &[Loan], applications: &[LoanApplication]) -> String {
    let loan_rows: Vec<Vec<String>> = loans
        .iter()
        .map(|loan| {
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(&loan.loan_number)),
                text(loan.loan_type.as_deref()),
                money(loan.loan_amount),
                loan.interest_rate
                    .map_or_else(|| "-".to_string(), |rate| format!("{rate:.2}%")),
                optional_money(loan.monthly_emi),
                money(loan.outstanding_amount),
                badge(loan.loan_status.as_deref().unwrap_or("PENDING")),
                date(loan.disbursement_date),
            ]
        })
        .collect();

    let payable: String = loans
        .iter()
        .filter(|loan| loan.is_payable())
        .map(|loan| {
            format!(
                r#"<option value="{}">{} (outstanding {})</option>"#,
                html_escape(&loan.loan_number),
                html_escape(&loan.loan_number),
                money(loan.outstanding_amount)
            )
        })
        .collect();
    let payment = if payable.is_empty() {
        r#"<p class="empty">No loans awaiting payment.</p>"#.to_string()
    } else {
        format!(
            r#"<form method="POST" action="/loans/pay">
            <div class="form-row">
                <div class="form-group">
                    <label for="loan_number">Loan</label>
                    <select id="loan_number" name="loan_number" required>{payable}</select>
                </div>
                <div class="form-group">
                    <label for="amount">Amount</label>
                    <input type="number" step="0.01" min="0.01" id="amount" name="amount" required>
                </div>
                <div class="form-group">
                    <label for="description">Description</label>
                    <input type="text" id="description" name="description" placeholder="EMI Payment">
                </div>
            </div>
            <button type="submit">Pay</button>
        </form>"#
        )
    };

    let tenures: String = TENURE_MONTHS
        .iter()
        .map(|months| format!(r#"<option value="{months}">{months} months</option>"#))
        .collect();
    let form = format!(
        r#"<form method="POST" action="/loans/apply">
            <div class="form-row">
                <div class="form-group">
                    <label for="applicant_name">Applicant name</label>
                    <input type="text" id="applicant_name" name="applicant_name" value="{name}" required>
                </div>
                <div class="form-group">
                    <label for="loan_type">Loan type</label>
                    {loan_type}
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="loan_amount">Amount</label>
                    <input type="number" step="0.01" min="0.01" id="loan_amount" name="loan_amount" required>
                </div>
                <div class="form-group">
                    <label for="tenure_months">Tenure</label>
                    <select id="tenure_months" name="tenure_months" required>{tenures}</select>
                </div>
                <div class="form-group">
                    <label for="monthly_income">Monthly income</label>
                    <input type="number" step="0.01" min="0" id="monthly_income" name="monthly_income">
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="purpose">Purpose</label>
                    <input type="text" id="purpose" name="purpose">
                </div>
                <div class="form-group">
                    <label for="employment_type">Employment type</label>
                    <input type="text" id="employment_type" name="employment_type">
                </div>
                <div class="form-group">
                    <label for="employer_name">Employer</label>
                    <input type="text" id="employer_name" name="employer_name">
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
            </div>
            <button type="submit">Apply</button>
        </form>"#,
        name = html_escape(&frame.identity.display_name()),
        email = html_escape(frame.identity.email.as_deref().unwrap_or("")),
        phone = html_escape(frame.identity.phone_number.as_deref().unwrap_or("")),
        loan_type = select("loan_type", &LOAN_TYPES, None),
    );

    let application_rows: Vec<Vec<String>> = applications
        .iter()
        .map(|app| {
            vec![
                format!(r#"<span class="code">{}</span>"#, html_escape(&app.application_number)),
                text(app.loan_type.as_deref()),
                money(app.loan_amount),
                optional_money(app.approved_amount),
                badge(app.status()),
                text(app.rejection_reason.as_deref()),
                datetime(app.created_at),
            ]
        })
        .collect();

    let body = [
        card(
            "Your loans",
            &table(
                &["Loan", "Type", "Amount", "Rate", "EMI", "Outstanding", "Status", "Disbursed"],
                &loan_rows,
                "No loans yet.",
            ),
        ),
        card("Make a payment", &payment),
        card("Apply for a loan", &form),
        card(
            "Your applications",
            &table(
                &["Application", "Type", "Requested", "Approved", "Status", "Reason", "Submitted"],
                &application_rows,
                "No applications yet.",
            ),
        ),
    ]
    .concat();
    layout(frame, "Loans", &body)
}
