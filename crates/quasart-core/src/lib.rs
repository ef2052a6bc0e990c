// Core back-office logic: inventory, notifications, metrics, settings
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod pricing;
pub mod query;
pub mod record;
pub mod seed;
pub mod session;
pub mod settings;
pub mod state;
pub mod validation;

pub use config::Config;
pub use dashboard::{summarize, DashboardSummary};
pub use error::Error;
pub use export::{ExportFormat, Exporter};
pub use metrics::{build_report, Report, ReportPeriod};
pub use models::{Notification, NotificationKind, Priority, Product, ProductStatus};
pub use query::{query, Query, QueryResult};
pub use record::{FieldValue, Record, Stats};
pub use session::{login, Credentials, Session};
pub use settings::Settings;
pub use state::{reduce, Action, AppState, Section};
pub use validation::{NewProduct, ProductForm, ValidationError};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
