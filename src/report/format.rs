use chrono::NaiveDate;

pub fn currency(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn dollars(value: f64) -> String {
    format!("${:.2}", value)
}

pub fn mpg(value: f64) -> String {
    format!("{:.1}", value)
}

/// 時間區間表的平均 MPG 顯示兩位小數
pub fn summary_mpg(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn miles(value: u64) -> String {
    format!("{:.1}", value as f64)
}

pub fn gallons(value: f64) -> String {
    format!("{}", value)
}

/// MPG 缺少或為 0 時顯示 `N/A`
pub fn record_mpg(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => mpg(v),
        _ => "N/A".to_string(),
    }
}

pub fn date(value: NaiveDate) -> String {
    value.format("%m/%d/%Y").to_string()
}
