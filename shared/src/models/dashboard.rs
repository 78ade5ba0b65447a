//! Dashboard counters

use serde::{Deserialize, Serialize};

/// Totals shown on the dashboard cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    #[serde(default)]
    pub products: u64,
    #[serde(default)]
    pub category: u64,
    #[serde(default)]
    pub material: u64,
}
