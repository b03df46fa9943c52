use crate::core::aggregation::{ExpenseSummary, Partition};
use crate::domain::model::ExpenseRecord;
use crate::report::format;
use std::fmt;

/// 簡單的等寬文字表格
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, widths: &[usize], cells: &[String]) -> fmt::Result {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| format!("{:<width$}", cells.get(i).map_or("", |c| c.as_str()), width = *w))
        .collect();
    writeln!(f, "{}", line.join(" | ").trim_end())
}

impl fmt::Display for TextTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();

        write_row(f, &widths, &self.headers)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &self.rows {
            write_row(f, &widths, row)?;
        }
        Ok(())
    }
}

pub fn gas_table(expenses: &[&ExpenseRecord]) -> TextTable {
    let mut table = TextTable::new(["Cost ($)", "Miles Traveled", "Gallons", "Miles per Gallon", "Notes"]);
    for e in expenses {
        table.push_row(vec![
            format::currency(e.cost),
            e.miles_traveled_for_gas.map(|m| m.to_string()).unwrap_or_default(),
            e.gas_gallons.map(format::gallons).unwrap_or_default(),
            format::record_mpg(e.miles_per_gallon),
            e.notes.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub fn regular_table(expenses: &[&ExpenseRecord]) -> TextTable {
    let mut table = TextTable::new(["Category", "Cost", "Notes", "Mileage", "Date"]);
    for e in expenses {
        table.push_row(vec![
            e.category.clone(),
            format::dollars(e.cost),
            e.notes.clone().unwrap_or_default(),
            e.mileage.map(|m| format!("{} miles", m)).unwrap_or_default(),
            format::date(e.date),
        ]);
    }
    table
}

pub fn render_expense_lists(expenses: &Partition<'_>) -> String {
    format!(
        "Gas Expenses\n{}\nRegular Expenses\n{}",
        gas_table(&expenses.gas),
        regular_table(&expenses.regular)
    )
}

pub fn render_summary(summary: &ExpenseSummary<'_>) -> String {
    let mut out = String::new();

    let scope = summary
        .selected_month
        .map(|m| format!("Summary for {}", m))
        .unwrap_or_else(|| "Summary (all expenses)".to_string());
    out.push_str(&scope);
    out.push('\n');

    let mut stats = TextTable::new(["Total Spent ($)", "Gallons of Gas Bought", "Miles Tracked", "Average MPG"]);
    stats.push_row(vec![
        format::currency(summary.totals.total_cost),
        format::gallons(summary.totals.gas_gallons),
        format::miles(summary.totals.miles_traveled_for_gas),
        format::mpg(summary.totals.average_mpg),
    ]);
    out.push_str(&stats.to_string());
    out.push('\n');

    let mut windows = TextTable::new(["Window", "Gas ($)", "Other ($)", "Total ($)", "Avg MPG"]);
    for w in &summary.windows {
        windows.push_row(vec![
            w.window.label().to_string(),
            format::currency(w.gas_cost),
            format::currency(w.other_cost),
            format::currency(w.total_cost),
            w.average_mpg.map(format::summary_mpg).unwrap_or_else(|| "-".to_string()),
        ]);
    }
    out.push_str(&windows.to_string());

    if !summary.monthly.is_empty() {
        out.push('\n');
        let mut monthly = TextTable::new(["Month", "Gas ($)", "Other ($)", "Total ($)", "Avg MPG"]);
        for m in &summary.monthly {
            monthly.push_row(vec![
                m.month.to_string(),
                format::currency(m.totals.gas_cost),
                format::currency(m.totals.other_cost),
                format::currency(m.totals.total_cost),
                format::mpg(m.totals.average_mpg),
            ]);
        }
        out.push_str(&monthly.to_string());
    }

    out
}
