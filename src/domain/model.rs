use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// 一筆由遠端 API 回傳的支出紀錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(deserialize_with = "de::number")]
    pub cost: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub mileage: Option<u64>,
    #[serde(deserialize_with = "de::calendar_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_gas_expense: bool,
    #[serde(
        default,
        deserialize_with = "de::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub miles_traveled_for_gas: Option<u64>,
    #[serde(
        default,
        deserialize_with = "de::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_gallons: Option<f64>,
    #[serde(
        default,
        deserialize_with = "de::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub miles_per_gallon: Option<f64>,
}

impl ExpenseRecord {
    pub fn regular(id: &str, category: &str, cost: f64, date: NaiveDate) -> Self {
        Self {
            id: id.to_string(),
            category: category.to_string(),
            cost,
            mileage: None,
            date,
            notes: None,
            is_gas_expense: false,
            miles_traveled_for_gas: None,
            gas_gallons: None,
            miles_per_gallon: None,
        }
    }

    pub fn gas(
        id: &str,
        cost: f64,
        date: NaiveDate,
        gas_gallons: f64,
        miles_traveled_for_gas: u64,
        miles_per_gallon: Option<f64>,
    ) -> Self {
        Self {
            id: id.to_string(),
            category: "Gas".to_string(),
            cost,
            mileage: None,
            date,
            notes: None,
            is_gas_expense: true,
            miles_traveled_for_gas: Some(miles_traveled_for_gas),
            gas_gallons: Some(gas_gallons),
            miles_per_gallon,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn with_mileage(mut self, mileage: u64) -> Self {
        self.mileage = Some(mileage);
        self
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }
}

/// 日曆年月，月份從 1 開始 (1 = 一月)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got '{}'", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in '{}'", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("invalid month in '{}'", s))?;
        YearMonth::new(year, month).ok_or_else(|| format!("month out of range in '{}'", s))
    }
}

/// POST /expenses 的請求內容，欄位維持表單輸入的原始字串
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub user_id: String,
    pub category: String,
    pub cost: String,
    pub mileage: String,
    pub date: String,
    pub notes: String,
    pub is_gas_expense: bool,
    pub miles_traveled_for_gas: String,
    pub gas_gallons: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
}

mod de {
    use super::*;
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString<T> {
        Number(T),
        Text(String),
    }

    pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
    {
        match NumberOrString::<T>::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid number '{}'", s))),
        }
    }

    pub fn opt_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
    {
        match Option::<NumberOrString<T>>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Number(n)) => Ok(Some(n)),
            Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(NumberOrString::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid number '{}'", s))),
        }
    }

    /// 接受 `YYYY-MM-DD`、RFC 3339 時間戳或 `MM/DD/YY`
    pub fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date '{}'", raw)))
    }

    pub(super) fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        // 依時間戳自身的時區取日期，不換算成 UTC
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        NaiveDate::parse_from_str(raw, "%m/%d/%y").ok()
    }
}
