//! HTTP server: router construction and request handlers

mod app;
pub mod routes;

pub use app::{build_app, build_state, run_server};
