use crate::core::forms::{ExpenseForm, RegistrationForm};
use crate::domain::ports::ExpenseApi;
use crate::domain::session::Session;
use crate::utils::error::Result;

/// 驗證表單後送出新支出，驗證失敗時不會發出請求
pub async fn submit_expense<A: ExpenseApi>(
    api: &A,
    session: &Session,
    form: &ExpenseForm,
) -> Result<serde_json::Value> {
    let creds = session.credentials()?;
    let expense = form.validate(creds.user_id)?;

    tracing::info!(
        "📤 Submitting {} expense '{}' ({})",
        if expense.is_gas_expense { "gas" } else { "regular" },
        expense.category,
        expense.cost
    );
    api.add_expense(session, &expense).await
}

pub async fn register_account<A: ExpenseApi>(
    api: &A,
    form: &RegistrationForm,
) -> Result<serde_json::Value> {
    let registration = form.validate()?;
    tracing::info!("📝 Registering '{}'", registration.username);
    api.register(&registration).await
}
