use crate::core::window::TimeWindow;
use crate::domain::model::{ExpenseRecord, YearMonth};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// 加油與一般支出，各自維持輸入順序
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Partition<'a> {
    pub gas: Vec<&'a ExpenseRecord>,
    pub regular: Vec<&'a ExpenseRecord>,
}

impl<'a> Partition<'a> {
    pub fn len(&self) -> usize {
        self.gas.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gas.is_empty() && self.regular.is_empty()
    }

    pub fn totals(&self) -> Totals {
        Totals::from_partition(self)
    }
}

pub fn partition<'a, I>(records: I) -> Partition<'a>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let (gas, regular): (Vec<_>, Vec<_>) = records.into_iter().partition(|r| r.is_gas_expense);
    Partition { gas, regular }
}

/// `None` 保留全部；否則只留下同年同月的紀錄
pub fn filter_by_month<'a, I>(records: I, selected: Option<YearMonth>) -> Vec<&'a ExpenseRecord>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    match selected {
        None => records.into_iter().collect(),
        Some(month) => records
            .into_iter()
            .filter(|r| month.contains(r.date))
            .collect(),
    }
}

pub fn total_cost<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records.into_iter().map(|r| r.cost).sum()
}

pub fn total_gas_gallons<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records.into_iter().map(|r| r.gas_gallons.unwrap_or(0.0)).sum()
}

pub fn total_miles_traveled_for_gas<'a, I>(records: I) -> u64
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records
        .into_iter()
        .map(|r| r.miles_traveled_for_gas.unwrap_or(0))
        .sum()
}

/// 平均 MPG，缺少的值算 0；沒有紀錄時回傳 0.0
pub fn average_mpg<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let (sum, count) = records
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), r| {
            (sum + r.miles_per_gallon.unwrap_or(0.0), count + 1)
        });

    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub gas_cost: f64,
    pub other_cost: f64,
    pub total_cost: f64,
    pub gas_gallons: f64,
    pub miles_traveled_for_gas: u64,
    pub average_mpg: f64,
    pub gas_count: usize,
    pub regular_count: usize,
}

impl Totals {
    pub fn from_partition(partition: &Partition<'_>) -> Self {
        let gas_cost = total_cost(partition.gas.iter().copied());
        let other_cost = total_cost(partition.regular.iter().copied());

        Self {
            gas_cost,
            other_cost,
            total_cost: gas_cost + other_cost,
            gas_gallons: total_gas_gallons(partition.gas.iter().copied()),
            miles_traveled_for_gas: total_miles_traveled_for_gas(partition.gas.iter().copied()),
            average_mpg: average_mpg(partition.gas.iter().copied()),
            gas_count: partition.gas.len(),
            regular_count: partition.regular.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowTotals {
    pub window: TimeWindow,
    pub cutoff: Option<NaiveDate>,
    pub gas_cost: f64,
    pub other_cost: f64,
    pub total_cost: f64,
    pub average_mpg: Option<f64>,
}

pub fn window_totals(records: &[ExpenseRecord], window: TimeWindow, today: NaiveDate) -> WindowTotals {
    let split = partition(records.iter().filter(|r| window.contains(r.date, today)));
    let totals = split.totals();

    WindowTotals {
        window,
        cutoff: window.cutoff(today),
        gas_cost: totals.gas_cost,
        other_cost: totals.other_cost,
        total_cost: totals.total_cost,
        average_mpg: window.reports_average_mpg().then_some(totals.average_mpg),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub month: YearMonth,
    pub totals: Totals,
}

/// 依年月分組的小計，按月份由舊到新排序
pub fn monthly_breakdown<'a, I>(records: I) -> Vec<MonthlyTotals>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut groups: BTreeMap<YearMonth, Vec<&'a ExpenseRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.year_month()).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(month, records)| MonthlyTotals {
            month,
            totals: partition(records).totals(),
        })
        .collect()
}

/// 儀表板與列表畫面需要的所有數字
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSummary<'a> {
    pub selected_month: Option<YearMonth>,
    pub today: NaiveDate,
    #[serde(flatten)]
    pub expenses: Partition<'a>,
    pub totals: Totals,
    pub windows: Vec<WindowTotals>,
    pub monthly: Vec<MonthlyTotals>,
}

pub fn summarize(
    records: &[ExpenseRecord],
    selected_month: Option<YearMonth>,
    today: NaiveDate,
) -> ExpenseSummary<'_> {
    let expenses = partition(filter_by_month(records, selected_month));
    let totals = expenses.totals();
    let windows = TimeWindow::ALL
        .iter()
        .map(|w| window_totals(records, *w, today))
        .collect();

    ExpenseSummary {
        selected_month,
        today,
        expenses,
        totals,
        windows,
        monthly: monthly_breakdown(records),
    }
}

impl ExpenseSummary<'_> {
    pub fn window(&self, window: TimeWindow) -> Option<&WindowTotals> {
        self.windows.iter().find(|w| w.window == window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january_records() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::gas("g1", 40.0, date(2024, 1, 15), 10.0, 300, Some(30.0)),
            ExpenseRecord::regular("r1", "Car Wash", 25.0, date(2024, 1, 20)),
        ]
    }

    fn mixed_records() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::regular("r1", "Insurance", 120.0, date(2023, 11, 2)),
            ExpenseRecord::gas("g1", 38.5, date(2023, 12, 1), 11.2, 310, Some(27.7)),
            ExpenseRecord::regular("r2", "Tires", 480.0, date(2024, 1, 9)),
            ExpenseRecord::gas("g2", 41.0, date(2024, 1, 22), 12.0, 330, None),
            ExpenseRecord::gas("g3", 39.99, date(2024, 2, 3), 10.5, 305, Some(29.0)),
            ExpenseRecord::regular("r3", "Oil Change", 65.25, date(2024, 2, 17)),
        ]
    }

    #[test]
    fn test_partition_is_total_disjoint_and_stable() {
        let records = mixed_records();
        let split = partition(&records);

        assert_eq!(split.len(), records.len());
        let gas_ids: Vec<&str> = split.gas.iter().map(|r| r.id.as_str()).collect();
        let regular_ids: Vec<&str> = split.regular.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(gas_ids, vec!["g1", "g2", "g3"]);
        assert_eq!(regular_ids, vec!["r1", "r2", "r3"]);
        assert!(gas_ids.iter().all(|id| !regular_ids.contains(id)));
    }

    #[test]
    fn test_partition_of_empty_input() {
        let split = partition(&[]);
        assert!(split.is_empty());
        assert_eq!(split.totals(), Totals::default());
    }

    #[test]
    fn test_scenario_single_month_totals() {
        let records = january_records();
        let totals = partition(&records).totals();

        assert_eq!(totals.gas_cost, 40.0);
        assert_eq!(totals.other_cost, 25.0);
        assert_eq!(totals.total_cost, 65.0);
        assert_eq!(totals.gas_gallons, 10.0);
        assert_eq!(totals.miles_traveled_for_gas, 300);
        assert_eq!(totals.average_mpg, 30.0);
    }

    #[test]
    fn test_total_is_sum_of_gas_and_other() {
        let records = mixed_records();
        for n in 0..=records.len() {
            let slice = &records[..n];
            let totals = partition(slice).totals();
            assert!((totals.total_cost - total_cost(slice)).abs() < 1e-9);
            assert_eq!(totals.total_cost, totals.gas_cost + totals.other_cost);
        }
    }

    #[test]
    fn test_average_mpg_of_empty_set_is_zero() {
        let avg = average_mpg(&[]);
        assert_eq!(avg, 0.0);
        assert!(!avg.is_nan());
    }

    #[test]
    fn test_absent_mpg_counts_toward_denominator() {
        let records = vec![
            ExpenseRecord::gas("g1", 40.0, date(2024, 1, 1), 10.0, 300, Some(30.0)),
            ExpenseRecord::gas("g2", 40.0, date(2024, 1, 8), 10.0, 280, None),
        ];
        assert_eq!(average_mpg(&records), 15.0);
    }

    #[test]
    fn test_missing_gas_fields_sum_as_zero() {
        let mut odd = ExpenseRecord::regular("g", "Gas", 30.0, date(2024, 1, 1));
        odd.is_gas_expense = true;
        let records = vec![odd];
        let totals = partition(&records).totals();

        assert_eq!(totals.gas_cost, 30.0);
        assert_eq!(totals.gas_gallons, 0.0);
        assert_eq!(totals.miles_traveled_for_gas, 0);
        assert_eq!(totals.average_mpg, 0.0);
    }

    #[test]
    fn test_filter_by_month_none_is_identity() {
        let records = mixed_records();
        let filtered = filter_by_month(&records, None);
        assert_eq!(filtered.len(), records.len());
        assert!(filtered.iter().zip(records.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_filter_by_month_selects_matching_month_and_is_idempotent() {
        let records = mixed_records();
        let january = YearMonth::new(2024, 1);
        let once = filter_by_month(&records, january);
        let ids: Vec<&str> = once.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r2", "g2"]);

        let twice = filter_by_month(once.iter().copied(), january);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_by_month_requires_matching_year() {
        let records = vec![
            ExpenseRecord::regular("a", "Parking", 5.0, date(2023, 1, 10)),
            ExpenseRecord::regular("b", "Parking", 6.0, date(2024, 1, 10)),
        ];
        let filtered = filter_by_month(&records, YearMonth::new(2023, 1));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }

    #[test]
    fn test_two_month_scenario_through_summary() {
        let records = vec![
            ExpenseRecord::gas("g1", 40.0, date(2024, 1, 15), 10.0, 300, Some(30.0)),
            ExpenseRecord::regular("r1", "Wipers", 25.0, date(2024, 2, 20)),
        ];
        let summary = summarize(&records, YearMonth::new(2024, 2), date(2024, 3, 1));

        assert!(summary.expenses.gas.is_empty());
        assert_eq!(summary.expenses.regular.len(), 1);
        assert_eq!(summary.expenses.regular[0].id, "r1");
        assert_eq!(summary.totals.gas_cost, 0.0);
        assert_eq!(summary.totals.other_cost, 25.0);
        assert_eq!(summary.totals.total_cost, 25.0);
        assert_eq!(summary.totals.average_mpg, 0.0);
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = summarize(&[], None, date(2024, 3, 1));
        assert_eq!(summary.totals, Totals::default());
        assert_eq!(summary.windows.len(), 3);
        for w in &summary.windows {
            assert_eq!(w.total_cost, 0.0);
            assert_eq!(w.gas_cost, 0.0);
            assert_eq!(w.other_cost, 0.0);
            assert!(w.average_mpg.is_none() || w.average_mpg == Some(0.0));
        }
        assert!(summary.monthly.is_empty());
    }

    #[test]
    fn test_windows_ignore_month_filter() {
        let records = mixed_records();
        let today = date(2024, 2, 20);
        let summary = summarize(&records, YearMonth::new(2023, 11), today);

        assert_eq!(summary.totals.total_cost, 120.0);

        let all_time = summary.window(TimeWindow::AllTime).unwrap();
        assert!((all_time.total_cost - total_cost(&records)).abs() < 1e-9);
        assert!(all_time.average_mpg.is_some());

        // 2024-01-20 之後：g2, g3, r3
        let last_month = summary.window(TimeWindow::LastMonth).unwrap();
        assert!((last_month.gas_cost - 80.99).abs() < 1e-9);
        assert!((last_month.other_cost - 65.25).abs() < 1e-9);
        assert_eq!(last_month.average_mpg, Some(14.5));

        let last_year = summary.window(TimeWindow::LastYear).unwrap();
        assert!((last_year.total_cost - all_time.total_cost).abs() < 1e-9);
        assert_eq!(last_year.average_mpg, None);
    }

    #[test]
    fn test_window_boundaries_are_asymmetric() {
        let today = date(2024, 6, 15);
        let records = vec![
            ExpenseRecord::regular("month-edge", "Toll", 3.0, date(2024, 5, 15)),
            ExpenseRecord::regular("year-edge", "Toll", 4.0, date(2023, 6, 15)),
        ];

        let last_month = window_totals(&records, TimeWindow::LastMonth, today);
        assert_eq!(last_month.total_cost, 0.0);

        let last_year = window_totals(&records, TimeWindow::LastYear, today);
        assert_eq!(last_year.total_cost, 7.0);
    }

    #[test]
    fn test_monthly_breakdown_is_sorted() {
        let records = mixed_records();
        let months = monthly_breakdown(&records);

        let labels: Vec<String> = months.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(labels, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);

        let january = &months[2].totals;
        assert_eq!(january.gas_cost, 41.0);
        assert_eq!(january.other_cost, 480.0);
        assert_eq!(january.gas_count, 1);
        assert_eq!(january.regular_count, 1);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = mixed_records();
        let before = records.clone();
        let _ = summarize(&records, YearMonth::new(2024, 1), date(2024, 2, 20));
        assert_eq!(records, before);
    }

    #[test]
    fn test_offset_timestamp_stays_in_local_month() {
        let records: Vec<ExpenseRecord> = serde_json::from_value(serde_json::json!([
            {"_id": "late", "category": "Gas", "cost": 30, "date": "2024-01-31T23:30:00-05:00",
             "isGasExpense": true, "milesPerGallon": 28}
        ]))
        .unwrap();

        assert_eq!(filter_by_month(&records, YearMonth::new(2024, 1)).len(), 1);
        assert!(filter_by_month(&records, YearMonth::new(2024, 2)).is_empty());

        let months: Vec<YearMonth> = monthly_breakdown(&records).iter().map(|m| m.month).collect();
        assert_eq!(months, vec![YearMonth::new(2024, 1).unwrap()]);
    }
}
