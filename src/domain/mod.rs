// Domain 層：核心模型、登入狀態與 ports (介面)

pub mod model;
pub mod ports;
pub mod session;
