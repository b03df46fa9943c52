use chrono::{Months, NaiveDate};
use serde::Serialize;
use std::fmt;

/// 固定的回顧時間區間，每個區間都從完整紀錄重新計算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    AllTime,
    LastMonth,
    LastYear,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [
        TimeWindow::AllTime,
        TimeWindow::LastMonth,
        TimeWindow::LastYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::AllTime => "All Time",
            TimeWindow::LastMonth => "Last Month",
            TimeWindow::LastYear => "Last Year",
        }
    }

    /// 區間起點；月份相減落在月底時取該月最後一天 (2024-03-31 減一個月為 2024-02-29)
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeWindow::AllTime => None,
            TimeWindow::LastMonth => Some(
                today
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(NaiveDate::MIN),
            ),
            TimeWindow::LastYear => Some(
                today
                    .checked_sub_months(Months::new(12))
                    .unwrap_or(NaiveDate::MIN),
            ),
        }
    }

    /// LastMonth 不含起點當天，LastYear 包含
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match (self, self.cutoff(today)) {
            (_, None) => true,
            (TimeWindow::LastMonth, Some(cutoff)) => date > cutoff,
            (_, Some(cutoff)) => date >= cutoff,
        }
    }

    /// LastYear 不提供平均 MPG
    pub fn reports_average_mpg(&self) -> bool {
        !matches!(self, TimeWindow::LastYear)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
