use crate::metrics::{inventory_kpis, InventoryKpis};
use crate::models::{Notification, Product};
use crate::record::{Record, Stats};
use crate::state::AppState;
use serde::Serialize;

/// Landing screen numbers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub inventory: Stats,
    pub notifications: Stats,
    pub kpis: InventoryKpis,
    pub recent_products: Vec<Product>,
}

impl DashboardSummary {
    pub fn unread(&self) -> usize {
        self.notifications.get("unread")
    }

    pub fn action_required(&self) -> usize {
        self.notifications.get("action_required")
    }
}

/// Summarize the state, listing up to `recent` most recently updated products
pub fn summarize(state: &AppState, recent: usize) -> DashboardSummary {
    let mut recent_products = state.products.clone();
    // Newest update first, newer id breaks ties
    recent_products.sort_by(|a, b| {
        b.last_update
            .cmp(&a.last_update)
            .then_with(|| b.id.cmp(&a.id))
    });
    recent_products.truncate(recent);

    DashboardSummary {
        inventory: Product::summarize(&state.products),
        notifications: Notification::summarize(&state.notifications),
        kpis: inventory_kpis(&state.products),
        recent_products,
    }
}
