//! Ticket workflow policy configuration.

use serde::{Deserialize, Serialize};

/// Who may delete a ticket.
///
/// The permissive default mirrors the historical behavior where any
/// authenticated user could delete; `OwnerOrAdmin` is the hardened
/// alternative deployments can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Any authenticated principal may delete any ticket.
    #[default]
    AnyAuthenticated,
    /// Only the ticket owner or an admin may delete.
    OwnerOrAdmin,
}

/// Ticket service policy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketsConfig {
    /// Delete authorization policy.
    #[serde(default)]
    pub delete_policy: DeletePolicy,
    /// Default listing window in days when no date range is given.
    #[serde(default = "default_window_days")]
    pub default_window_days: i64,
}

impl Default for TicketsConfig {
    fn default() -> Self {
        Self {
            delete_policy: DeletePolicy::default(),
            default_window_days: default_window_days(),
        }
    }
}

fn default_window_days() -> i64 {
    30
}
