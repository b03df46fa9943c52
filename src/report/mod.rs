pub mod export;
pub mod format;
pub mod table;

pub use export::{export_summary, ExportFormat};
pub use table::{render_expense_lists, render_summary};
