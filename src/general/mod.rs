pub mod check;
pub mod config;
pub mod forwarder;
pub mod stdin_handler;
