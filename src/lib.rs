//! Statica - Static File Server
//!
//! Core library for the HTTP/1.1 protocol layer and file serving.

pub mod config;
pub mod http;
pub mod server;
