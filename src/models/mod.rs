// Module exports for models

pub mod config;
pub mod entry;
