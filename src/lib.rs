pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpExpenseApi, LocalStorage};
pub use app::{Dashboard, ExpenseSnapshot};
pub use config::TrackerConfig;
pub use core::aggregation::{summarize, ExpenseSummary};
pub use domain::model::{ExpenseRecord, YearMonth};
pub use domain::session::Session;
pub use utils::error::{Result, TrackerError};
