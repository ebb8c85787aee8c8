pub mod auth;
pub mod backend;
pub mod client;
