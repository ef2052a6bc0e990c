//! Application state and the reducer that moves it forward.
//!
//! Every change goes through [`reduce`], so each mutation is a plain
//! value that can be logged, replayed and tested.

use crate::models::{Notification, Product};
use crate::query::{query, Query, QueryResult};
use crate::seed;
use crate::session::Session;
use crate::settings::{NotificationSettings, Profile, SecuritySettings, Settings, SystemSettings};
use crate::validation::{NewProduct, ProductForm};
use crate::Error;
use chrono::{NaiveDate, Utc};

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Inventory,
    Notifications,
    Metrics,
    Settings,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Inventory => "Inventory",
            Section::Notifications => "Notifications",
            Section::Metrics => "Metrics",
            Section::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub session: Option<Session>,
    pub section: Section,
    pub products: Vec<Product>,
    pub notifications: Vec<Notification>,
    pub settings: Settings,
}

/// Everything that can happen to the state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Login(Session),
    Logout,
    Navigate(Section),
    AddProduct {
        id: u64,
        product: NewProduct,
        added_by: String,
        on: NaiveDate,
    },
    UpdateProduct {
        id: u64,
        product: NewProduct,
        on: NaiveDate,
    },
    DeleteProduct {
        id: u64,
    },
    MarkNotificationRead {
        id: u64,
    },
    MarkAllNotificationsRead,
    DeleteNotification {
        id: u64,
    },
    UpdateProfile(Profile),
    UpdateNotificationSettings(NotificationSettings),
    UpdateSystemSettings(SystemSettings),
    UpdateSecuritySettings(SecuritySettings),
}

impl Action {
    /// Add with a millisecond-timestamp id and today's date
    pub fn add_product(product: NewProduct, added_by: impl Into<String>) -> Self {
        let now = Utc::now();
        Action::AddProduct {
            id: now.timestamp_millis().max(0) as u64,
            product,
            added_by: added_by.into(),
            on: now.date_naive(),
        }
    }

    pub fn update_product(id: u64, product: NewProduct) -> Self {
        Action::UpdateProduct {
            id,
            product,
            on: Utc::now().date_naive(),
        }
    }
}

impl AppState {
    /// State as it looks right after start-up
    pub fn seeded() -> Self {
        Self {
            products: seed::products(),
            notifications: seed::notifications(),
            ..Self::default()
        }
    }

    pub fn apply(self, action: Action) -> Self {
        reduce(self, action)
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn product(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn require_product(&self, id: u64) -> crate::Result<&Product> {
        self.product(id)
            .ok_or_else(|| Error::NotFound(format!("product {}", id)))
    }

    /// Validate a form into the action that saves it: an update when `id`
    /// names an existing product, an add when it is `None`.
    pub fn submit_product(
        &self,
        id: Option<u64>,
        form: &ProductForm,
        user: &str,
    ) -> crate::Result<Action> {
        if let Some(id) = id {
            self.require_product(id)?;
        }
        let product = form.validate()?;

        Ok(match id {
            Some(id) => Action::update_product(id, product),
            None => Action::add_product(product, user),
        })
    }

    pub fn inventory(&self, q: &Query) -> QueryResult<'_, Product> {
        query(&self.products, q)
    }

    pub fn feed(&self, q: &Query) -> QueryResult<'_, Notification> {
        query(&self.notifications, q)
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    fn next_product_id(&self, wanted: u64) -> u64 {
        if self.product(wanted).is_none() {
            return wanted;
        }
        self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}

fn build_product(
    id: u64,
    p: NewProduct,
    added_by: String,
    added: NaiveDate,
    updated: NaiveDate,
) -> Product {
    Product {
        id,
        name: p.name,
        brand: p.brand,
        size: p.size,
        gender: p.gender,
        kind: p.kind,
        purchase_price: p.purchase_price,
        sale_price: p.sale_price,
        quantity: p.quantity,
        added_by,
        date_added: added,
        last_update: updated,
    }
}

/// `(state, action) -> state`. Actions naming an unknown id leave the
/// state as it was.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    tracing::debug!(?action, "reduce");

    match action {
        Action::Login(session) => {
            state.session = Some(session);
            state.section = Section::Dashboard;
        }
        Action::Logout => {
            state.session = None;
            state.section = Section::Dashboard;
        }
        Action::Navigate(section) => state.section = section,

        Action::AddProduct {
            id,
            product,
            added_by,
            on,
        } => {
            let id = state.next_product_id(id);
            state
                .products
                .push(build_product(id, product, added_by, on, on));
        }
        Action::UpdateProduct { id, product, on } => {
            match state.products.iter_mut().find(|p| p.id == id) {
                Some(existing) => {
                    let replacement = build_product(
                        id,
                        product,
                        existing.added_by.clone(),
                        existing.date_added,
                        on,
                    );
                    *existing = replacement;
                }
                None => tracing::warn!(id, "update for unknown product ignored"),
            }
        }
        Action::DeleteProduct { id } => {
            let before = state.products.len();
            state.products.retain(|p| p.id != id);
            if state.products.len() == before {
                tracing::warn!(id, "delete for unknown product ignored");
            }
        }

        Action::MarkNotificationRead { id } => {
            match state.notifications.iter_mut().find(|n| n.id == id) {
                Some(n) => n.read = true,
                None => tracing::warn!(id, "unknown notification"),
            }
        }
        Action::MarkAllNotificationsRead => {
            state.notifications.iter_mut().for_each(|n| n.read = true);
        }
        Action::DeleteNotification { id } => {
            let before = state.notifications.len();
            state.notifications.retain(|n| n.id != id);
            if state.notifications.len() == before {
                tracing::warn!(id, "delete for unknown notification ignored");
            }
        }

        Action::UpdateProfile(profile) => state.settings.profile = profile,
        Action::UpdateNotificationSettings(s) => state.settings.notifications = s,
        Action::UpdateSystemSettings(s) => state.settings.system = s,
        Action::UpdateSecuritySettings(s) => state.settings.security = s,
    }

    state
}
