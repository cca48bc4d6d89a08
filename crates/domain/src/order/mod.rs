//! Order workflow and its commands.

mod commands;
mod service;

pub use commands::CreateOrder;
pub use service::OrderService;
