//! API State Management

use divvy_core::{DividendToken, ManualClock};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state behind every handler.
///
/// All mutations go through the single `RwLock`, which is the
/// mutual-exclusion boundary that keeps fund/claim/reclaim calls
/// serialized.
#[derive(Clone)]
pub struct ApiState {
    pub token: Arc<RwLock<DividendToken>>,
    /// Present only on dev-mode nodes; enables `/clock/advance`.
    pub dev_clock: Option<Arc<ManualClock>>,
    pub network: String,
    pub start_time: std::time::Instant,
}

impl ApiState {
    pub fn new(
        token: Arc<RwLock<DividendToken>>,
        dev_clock: Option<Arc<ManualClock>>,
        network: String,
    ) -> Self {
        Self {
            token,
            dev_clock,
            network,
            start_time: std::time::Instant::now(),
        }
    }
}
