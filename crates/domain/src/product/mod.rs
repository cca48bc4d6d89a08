//! Product workflow and its commands.

mod commands;
mod service;

pub use commands::{CreateProduct, UpdateStock};
pub use service::ProductService;
