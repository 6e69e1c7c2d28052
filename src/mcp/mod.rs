pub mod auth;
pub mod config;
pub mod server;
pub mod tools;
