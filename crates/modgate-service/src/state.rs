//! Shared application state

use modgate_policy::PolicyEngine;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::blacklist::Blacklist;
use crate::gatekeeper::Gatekeeper;
use crate::models::ServiceConfig;
use crate::store::ContentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<RwLock<ServiceConfig>>,

    /// The policy engine, shared by every evaluation
    pub engine: Arc<PolicyEngine>,

    /// The static keyword blacklist
    pub blacklist: Arc<Blacklist>,

    /// Content items and the review queue
    pub store: Arc<ContentStore>,
}

impl AppState {
    /// Build state with a disabled engine and the baseline blacklist.
    ///
    /// Callers load policies afterwards via `engine.load_from_file`; a
    /// missing policy path keeps the engine in its "feature off" state.
    pub fn new(config: ServiceConfig) -> Self {
        let engine = PolicyEngine::disabled().with_leniency(config.leniency);
        Self {
            config: Arc::new(RwLock::new(config)),
            engine: Arc::new(engine),
            blacklist: Arc::new(Blacklist::with_defaults()),
            store: Arc::new(ContentStore::new()),
        }
    }

    /// Decision resolver over this state's engine and blacklist
    pub fn gatekeeper(&self) -> Gatekeeper {
        Gatekeeper::new(self.engine.clone(), self.blacklist.clone())
    }
}
