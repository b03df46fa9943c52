// Adapters 層：外部系統的實作 (http, storage)

pub mod http;
pub mod storage;

pub use http::HttpExpenseApi;
pub use storage::LocalStorage;
