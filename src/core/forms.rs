use crate::domain::model::{NewExpense, Registration};
use crate::utils::error::{Result, TrackerError};
use regex::Regex;
use std::sync::LazyLock;

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("category pattern"));
// 最多兩位小數
static COST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").expect("cost pattern"));
static WHOLE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("whole number pattern"));
// MM/DD/YY
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/(0[1-9]|[12][0-9]|3[01])/[0-9]{2}$").expect("date pattern")
});
static GALLONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]{1,3})?$").expect("gallons pattern"));
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]{3,23}$").expect("username pattern"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

const PASSWORD_SPECIALS: &str = "!@#$%";

pub fn is_valid_category(value: &str) -> bool {
    CATEGORY_RE.is_match(value)
}

pub fn is_valid_cost(value: &str) -> bool {
    COST_RE.is_match(value)
}

pub fn is_valid_mileage(value: &str) -> bool {
    WHOLE_NUMBER_RE.is_match(value)
}

/// 只檢查格式，`02/31/24` 也會通過
pub fn is_valid_date(value: &str) -> bool {
    DATE_RE.is_match(value)
}

pub fn is_valid_miles_traveled_for_gas(value: &str) -> bool {
    WHOLE_NUMBER_RE.is_match(value)
}

pub fn is_valid_gas_gallons(value: &str) -> bool {
    GALLONS_RE.is_match(value)
}

pub fn is_valid_username(value: &str) -> bool {
    USERNAME_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// 8 到 24 個字元，需包含小寫、大寫、數字及 `!@#$%` 其中之一
pub fn is_valid_password(value: &str) -> bool {
    let len = value.chars().count();
    (8..=24).contains(&len)
        && !value.contains(|c: char| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    pub category: String,
    pub cost: String,
    pub mileage: String,
    pub date: String,
    pub notes: String,
    pub is_gas_expense: bool,
    pub miles_traveled_for_gas: String,
    pub gas_gallons: String,
}

impl ExpenseForm {
    pub fn invalid_required_fields(&self) -> Vec<String> {
        let checks: [(&str, bool); 4] = [
            ("category", is_valid_category(&self.category)),
            ("cost", is_valid_cost(&self.cost)),
            ("mileage", is_valid_mileage(&self.mileage)),
            ("date", is_valid_date(&self.date)),
        ];
        failed(&checks)
    }

    pub fn invalid_gas_fields(&self) -> Vec<String> {
        if !self.is_gas_expense {
            return Vec::new();
        }
        let checks: [(&str, bool); 2] = [
            (
                "milesTraveledForGas",
                is_valid_miles_traveled_for_gas(&self.miles_traveled_for_gas),
            ),
            ("gasGallons", is_valid_gas_gallons(&self.gas_gallons)),
        ];
        failed(&checks)
    }

    /// 先檢查必填欄位，再檢查加油欄位
    pub fn validate(&self, user_id: &str) -> Result<NewExpense> {
        let required = self.invalid_required_fields();
        if !required.is_empty() {
            return Err(TrackerError::form("Invalid Entry in required fields", required));
        }

        let gas = self.invalid_gas_fields();
        if !gas.is_empty() {
            return Err(TrackerError::form("Invalid Entry in gas-related fields", gas));
        }

        Ok(NewExpense {
            user_id: user_id.to_string(),
            category: self.category.clone(),
            cost: self.cost.clone(),
            mileage: self.mileage.clone(),
            date: self.date.clone(),
            notes: self.notes.clone(),
            is_gas_expense: self.is_gas_expense,
            miles_traveled_for_gas: self.miles_traveled_for_gas.clone(),
            gas_gallons: self.gas_gallons.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
}

impl RegistrationForm {
    pub fn invalid_fields(&self) -> Vec<String> {
        let checks: [(&str, bool); 4] = [
            ("username", is_valid_username(&self.username)),
            ("password", is_valid_password(&self.password)),
            ("confirmPassword", self.password == self.confirm_password),
            ("email", is_valid_email(&self.email)),
        ];
        failed(&checks)
    }

    pub fn validate(&self) -> Result<Registration> {
        let invalid = self.invalid_fields();
        if !invalid.is_empty() {
            return Err(TrackerError::form("Invalid Entry", invalid));
        }

        Ok(Registration {
            username: self.username.clone(),
            password: self.password.clone(),
            email: self.email.clone(),
        })
    }
}

fn failed(checks: &[(&str, bool)]) -> Vec<String> {
    checks
        .iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name.to_string())
        .collect()
}
