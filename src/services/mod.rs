// Service module exports

pub mod board;
pub mod classify;
pub mod config;
pub mod parse;
pub mod select;
