pub mod clients;
pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod processor;
