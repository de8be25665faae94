pub mod config;
pub mod confirm;
pub mod directive;
pub mod exec;
pub mod extract;
pub mod session;
