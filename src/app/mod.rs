pub mod dashboard;
pub mod routes;
pub mod submit;

#[cfg(test)]
pub(crate) mod testing;

pub use dashboard::{Dashboard, ExpenseSnapshot};
pub use routes::{navigate, Navigation, Route};
pub use submit::{register_account, submit_expense};
