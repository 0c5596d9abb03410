pub mod budget;
pub mod categories;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod expenses;
pub mod models;
pub mod notifier;
pub mod server;
pub mod spending;
pub mod utils;

pub use server::{AppState, router, run_with_listener, spawn_with_listener};
