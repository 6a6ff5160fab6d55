pub mod commands;
pub mod config;
pub mod dispatch;
pub mod env;
pub mod tokenizer;
