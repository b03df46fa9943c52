pub mod aggregation;
pub mod forms;
pub mod window;

pub use crate::domain::model::{ExpenseRecord, YearMonth};
pub use crate::domain::ports::{ConfigProvider, ExpenseApi, Storage};
pub use crate::utils::error::Result;
pub use aggregation::{
    average_mpg, filter_by_month, monthly_breakdown, partition, summarize, total_cost,
    ExpenseSummary, Partition, Totals, WindowTotals,
};
pub use window::TimeWindow;
