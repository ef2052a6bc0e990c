use crate::pricing;
use crate::record::{FieldValue, Record, Stats};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An inventory item. Status is derived from quantity and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub brand: String,
    pub size: String,
    pub gender: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub quantity: u32,
    pub added_by: String,
    pub date_added: NaiveDate,
    pub last_update: NaiveDate,
}

impl Product {
    pub fn status(&self) -> ProductStatus {
        ProductStatus::from_quantity(self.quantity)
    }

    /// Margin over purchase price in percent, one decimal
    pub fn margin(&self) -> Option<f64> {
        pricing::margin_percent(self.purchase_price, self.sale_price)
    }

    pub fn unit_profit(&self) -> f64 {
        pricing::unit_profit(self.purchase_price, self.sale_price)
    }
}

impl Record for Product {
    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => FieldValue::Int(self.id as i64),
            "name" => self.name.as_str().into(),
            "brand" => self.brand.as_str().into(),
            "size" => self.size.as_str().into(),
            "gender" => self.gender.as_str().into(),
            "type" | "kind" => self.kind.as_str().into(),
            "status" => self.status().as_str().into(),
            "purchasePrice" | "purchase_price" => self.purchase_price.into(),
            "salePrice" | "sale_price" => self.sale_price.into(),
            "quantity" => self.quantity.into(),
            "addedBy" | "added_by" => self.added_by.as_str().into(),
            "dateAdded" | "date_added" => self.date_added.to_string().into(),
            "lastUpdate" | "last_update" => self.last_update.to_string().into(),
            _ => return None,
        };
        Some(value)
    }

    /// Status filters accept every label `ProductStatus` parses
    fn canonical_filter(field: &str, value: &FieldValue) -> FieldValue {
        let status = match field {
            "status" => value.as_text().and_then(|s| s.parse::<ProductStatus>().ok()),
            _ => None,
        };
        match status {
            Some(status) => status.as_str().into(),
            None => value.clone(),
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "brand"]
    }

    fn summarize(records: &[Self]) -> Stats {
        let count = |status: ProductStatus| records.iter().filter(|p| p.status() == status).count();
        Stats::new()
            .with("total", records.len())
            .with("available", count(ProductStatus::Available))
            .with("low_stock", count(ProductStatus::LowStock))
            .with("sold", count(ProductStatus::Sold))
    }
}

/// Where a product stands, purely a function of its quantity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProductStatus {
    Available,
    LowStock,
    Sold,
}

impl ProductStatus {
    /// 0 -> sold, 1 -> low stock, anything above -> available
    pub fn from_quantity(quantity: u32) -> Self {
        match quantity {
            0 => ProductStatus::Sold,
            1 => ProductStatus::LowStock,
            _ => ProductStatus::Available,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Available => "available",
            ProductStatus::LowStock => "low-stock",
            ProductStatus::Sold => "sold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductStatus::Available => "Available",
            ProductStatus::LowStock => "Low stock",
            ProductStatus::Sold => "Sold",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    /// Accepts the English names and the shop's original Spanish labels
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" | "disponible" => Ok(ProductStatus::Available),
            "low-stock" | "low_stock" | "stock-bajo" => Ok(ProductStatus::LowStock),
            "sold" | "vendido" => Ok(ProductStatus::Sold),
            other => Err(format!("unknown product status '{}'", other)),
        }
    }
}

/// Notification urgency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a notification is about, with the payload that kind carries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NotificationKind {
    StockLow {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        products: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        product: Option<String>,
        #[serde(default, rename = "lastSale", skip_serializing_if = "Option::is_none")]
        last_sale: Option<NaiveDate>,
    },
    Sale {
        product: String,
        amount: f64,
        buyer: String,
    },
    UserActivity {
        user: String,
        count: u32,
    },
    Milestone {
        milestone: String,
        target: f64,
        achieved: f64,
    },
    PriceChange {
        user: String,
        products: u32,
    },
    System {
        backup_size: String,
    },
}

impl NotificationKind {
    /// Wire tag, also what the `type` filter compares against
    pub fn tag(&self) -> &'static str {
        match self {
            NotificationKind::StockLow { .. } => "stock_low",
            NotificationKind::Sale { .. } => "sale",
            NotificationKind::UserActivity { .. } => "user_activity",
            NotificationKind::Milestone { .. } => "milestone",
            NotificationKind::PriceChange { .. } => "price_change",
            NotificationKind::System { .. } => "system",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::StockLow { .. } => "Stock",
            NotificationKind::Sale { .. } => "Sale",
            NotificationKind::UserActivity { .. } => "Activity",
            NotificationKind::Milestone { .. } => "Milestone",
            NotificationKind::PriceChange { .. } => "Prices",
            NotificationKind::System { .. } => "System",
        }
    }

    /// One-line rendering of the payload
    pub fn detail(&self) -> String {
        match self {
            NotificationKind::StockLow {
                products,
                product,
                last_sale,
            } => {
                let mut names = products.clone();
                names.extend(product.iter().cloned());
                match last_sale {
                    Some(date) => format!("{} (last sale {})", names.join(", "), date),
                    None => names.join(", "),
                }
            }
            NotificationKind::Sale {
                product,
                amount,
                buyer,
            } => format!("{} sold to {} for {:.2}", product, buyer, amount),
            NotificationKind::UserActivity { user, count } => {
                format!("{} touched {} products", user, count)
            }
            NotificationKind::Milestone {
                milestone,
                target,
                achieved,
            } => format!("{}: {:.0} of {:.0}", milestone, achieved, target),
            NotificationKind::PriceChange { user, products } => {
                format!("{} repriced {} products", user, products)
            }
            NotificationKind::System { backup_size } => format!("backup size {}", backup_size),
        }
    }

    pub fn all_tags() -> &'static [&'static str] {
        &[
            "stock_low",
            "sale",
            "user_activity",
            "milestone",
            "price_change",
            "system",
        ]
    }
}

/// A feed entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    #[serde(flatten)]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub priority: Priority,
    pub read: bool,
    pub action_required: bool,
}

impl Notification {
    pub fn relative_time(&self, now: DateTime<Utc>) -> String {
        format_relative(self.timestamp, now)
    }
}

impl Record for Notification {
    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => FieldValue::Int(self.id as i64),
            "type" | "kind" => self.kind.tag().into(),
            "title" => self.title.as_str().into(),
            "message" => self.message.as_str().into(),
            "timestamp" => self.timestamp.to_rfc3339().into(),
            "priority" => self.priority.as_str().into(),
            "read" => self.read.into(),
            "actionRequired" | "action_required" => self.action_required.into(),
            _ => return None,
        };
        Some(value)
    }

    fn search_fields() -> &'static [&'static str] {
        &["title", "message"]
    }

    fn summarize(records: &[Self]) -> Stats {
        let unread = || records.iter().filter(|n| !n.read);
        Stats::new()
            .with("total", records.len())
            .with("unread", unread().count())
            .with(
                "high_priority",
                unread().filter(|n| n.priority == Priority::High).count(),
            )
            .with(
                "action_required",
                unread().filter(|n| n.action_required).count(),
            )
    }
}

/// "5 min ago" style timestamps; a plain date once it's a week old
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - timestamp;
    let minutes = elapsed.num_minutes().max(0);
    let hours = elapsed.num_hours().max(0);
    let days = elapsed.num_days().max(0);

    if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        timestamp.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn product(quantity: u32) -> Product {
        Product {
            id: 1,
            name: "Camiseta Vintage Nike".to_string(),
            brand: "Nike".to_string(),
            size: "M".to_string(),
            gender: "Unisex".to_string(),
            kind: "Camiseta".to_string(),
            purchase_price: 12.0,
            sale_price: 25.0,
            quantity,
            added_by: "Lorena".to_string(),
            date_added: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            last_update: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        }
    }

    #[test]
    fn test_status_from_quantity() {
        assert_eq!(product(0).status(), ProductStatus::Sold);
        assert_eq!(product(1).status(), ProductStatus::LowStock);
        assert_eq!(product(5).status(), ProductStatus::Available);
    }

    #[test]
    fn test_status_parsing_accepts_spanish_labels() {
        assert_eq!("disponible".parse::<ProductStatus>(), Ok(ProductStatus::Available));
        assert_eq!("stock-bajo".parse::<ProductStatus>(), Ok(ProductStatus::LowStock));
        assert_eq!("Vendido".parse::<ProductStatus>(), Ok(ProductStatus::Sold));
        assert_eq!("low-stock".parse::<ProductStatus>(), Ok(ProductStatus::LowStock));
        assert!("gone".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_product_fields() {
        let p = product(3);
        assert_eq!(p.field("brand"), Some(FieldValue::Text("Nike".into())));
        assert_eq!(p.field("status"), Some(FieldValue::Text("available".into())));
        assert_eq!(p.field("quantity"), Some(FieldValue::Int(3)));
        assert_eq!(p.field("lastUpdate"), Some(FieldValue::Text("2024-01-20".into())));
        assert_eq!(p.field("colour"), None);
    }

    #[test]
    fn test_product_serializes_original_field_names() {
        let json = serde_json::to_value(product(2)).unwrap();
        assert_eq!(json["type"], "Camiseta");
        assert_eq!(json["purchasePrice"], 12.0);
        assert_eq!(json["dateAdded"], "2024-01-15");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_notification_serializes_type_and_data() {
        let n = Notification {
            id: 2,
            kind: NotificationKind::Sale {
                product: "Chaqueta Adidas Original".to_string(),
                amount: 55.0,
                buyer: "Cliente Vinted".to_string(),
            },
            title: "Nueva venta completada".to_string(),
            message: "Chaqueta Adidas Original - €55".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 25, 9, 15, 0).unwrap(),
            priority: Priority::Medium,
            read: false,
            action_required: false,
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "sale");
        assert_eq!(json["data"]["amount"], 55.0);
        assert_eq!(json["actionRequired"], false);
        assert_eq!(n.field("type"), Some(FieldValue::Text("sale".into())));
    }

    #[test]
    fn test_stock_low_detail_merges_product_lists() {
        let kind = NotificationKind::StockLow {
            products: vec!["A".into(), "B".into()],
            product: None,
            last_sale: None,
        };
        assert_eq!(kind.detail(), "A, B");

        let kind = NotificationKind::StockLow {
            products: Vec::new(),
            product: Some("Vestido Zara Vintage".into()),
            last_sale: NaiveDate::from_ymd_opt(2024, 1, 23),
        };
        assert_eq!(kind.detail(), "Vestido Zara Vintage (last sale 2024-01-23)");
    }

    #[test]
    fn test_all_tags_cover_every_seeded_kind() {
        let tags = NotificationKind::all_tags();
        for n in crate::seed::notifications() {
            assert!(tags.contains(&n.kind.tag()), "missing tag {}", n.kind.tag());
        }
        assert_eq!(tags.len(), 6);
    }

    #[test]
    fn test_format_relative() {
        let now = Utc.with_ymd_and_hms(2024, 1, 25, 12, 0, 0).unwrap();
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5 min ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "2 days ago");
        assert_eq!(format_relative(now - Duration::days(10), now), "15/01/2024");
    }
}
