//! Employee directory server: configuration and the HTTP surface.

pub mod config;
pub mod http;
