//! Modgate Service
//!
//! HTTP moderation service wiring the policy engine, the keyword blacklist,
//! the content store, and the human review queue into one gatekeeper.
//!
//! Decision flow: a submission is first evaluated by the policy engine; if
//! no policy matches it falls back to the blacklist, and otherwise lands in
//! the manual review queue.

pub mod blacklist;
pub mod cli;
pub mod error;
pub mod gatekeeper;
pub mod models;
pub mod server;
pub mod state;
pub mod store;

pub use blacklist::Blacklist;
pub use error::ApiError;
pub use gatekeeper::{Decision, Gatekeeper};
pub use server::{build_app, build_state, run_server};
pub use state::AppState;
pub use store::ContentStore;
