pub mod alerts;
pub mod config;
pub mod error;
pub mod retention;
pub mod runner;
pub mod store;
pub mod weather;
