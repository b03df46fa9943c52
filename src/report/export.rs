use crate::core::aggregation::ExpenseSummary;
use crate::domain::model::ExpenseRecord;
use crate::domain::ports::Storage;
use crate::report::format;
use crate::utils::error::{Result, TrackerError};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    pub fn parse_list(values: &[String]) -> Result<Vec<ExportFormat>> {
        values.iter().map(|v| v.parse()).collect()
    }
}

impl FromStr for ExportFormat {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(TrackerError::InvalidConfigValueError {
                field: "export.formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: csv, tsv, json".to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct GasRow<'a> {
    id: &'a str,
    date: String,
    cost: String,
    miles_traveled: Option<u64>,
    gallons: Option<f64>,
    miles_per_gallon: String,
    notes: &'a str,
}

#[derive(Debug, Serialize)]
struct RegularRow<'a> {
    id: &'a str,
    date: String,
    category: &'a str,
    cost: String,
    mileage: Option<u64>,
    notes: &'a str,
}

impl<'a> From<&'a ExpenseRecord> for GasRow<'a> {
    fn from(e: &'a ExpenseRecord) -> Self {
        Self {
            id: &e.id,
            date: e.date.to_string(),
            cost: format::currency(e.cost),
            miles_traveled: e.miles_traveled_for_gas,
            gallons: e.gas_gallons,
            miles_per_gallon: format::record_mpg(e.miles_per_gallon),
            notes: e.notes.as_deref().unwrap_or(""),
        }
    }
}

impl<'a> From<&'a ExpenseRecord> for RegularRow<'a> {
    fn from(e: &'a ExpenseRecord) -> Self {
        Self {
            id: &e.id,
            date: e.date.to_string(),
            category: &e.category,
            cost: format::currency(e.cost),
            mileage: e.mileage,
            notes: e.notes.as_deref().unwrap_or(""),
        }
    }
}

fn delimited<T: Serialize>(rows: impl IntoIterator<Item = T>, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| TrackerError::IoError(e.into_error()))
}

/// 依格式產生檔案內容，回傳 (檔名, 內容)
pub fn render_files(
    summary: &ExpenseSummary<'_>,
    formats: &[ExportFormat],
) -> Result<Vec<(String, Vec<u8>)>> {
    let mut files = Vec::new();

    for format in formats {
        match format {
            ExportFormat::Csv | ExportFormat::Tsv => {
                let delimiter = if *format == ExportFormat::Csv { b',' } else { b'\t' };
                let ext = format.extension();
                let gas = delimited(summary.expenses.gas.iter().map(|e| GasRow::from(*e)), delimiter)?;
                let regular = delimited(
                    summary.expenses.regular.iter().map(|e| RegularRow::from(*e)),
                    delimiter,
                )?;
                files.push((format!("gas_expenses.{}", ext), gas));
                files.push((format!("regular_expenses.{}", ext), regular));
            }
            ExportFormat::Json => {
                files.push(("summary.json".to_string(), serde_json::to_vec_pretty(summary)?));
            }
        }
    }

    Ok(files)
}

/// 寫入所有檔案並回傳檔名
pub async fn export_summary<S: Storage>(
    storage: &S,
    summary: &ExpenseSummary<'_>,
    formats: &[ExportFormat],
) -> Result<Vec<String>> {
    let files = render_files(summary, formats)?;
    let mut written = Vec::with_capacity(files.len());

    for (name, data) in files {
        tracing::debug!("Writing {} ({} bytes) to storage", name, data.len());
        storage.write_file(&name, &data).await?;
        written.push(name);
    }

    tracing::info!("💾 Exported {} files", written.len());
    Ok(written)
}
