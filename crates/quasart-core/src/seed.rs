// Start-up data. Every run begins from here; nothing is persisted.
use crate::metrics::{DailySales, MonthlySales};
use crate::models::{Notification, NotificationKind, Priority, Product};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, hour, min, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: u64,
    name: &str,
    brand: &str,
    size: &str,
    gender: &str,
    kind: &str,
    prices: (f64, f64),
    quantity: u32,
    added_by: &str,
    added: NaiveDate,
    updated: NaiveDate,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        brand: brand.to_string(),
        size: size.to_string(),
        gender: gender.to_string(),
        kind: kind.to_string(),
        purchase_price: prices.0,
        sale_price: prices.1,
        quantity,
        added_by: added_by.to_string(),
        date_added: added,
        last_update: updated,
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product(
            1,
            "Camiseta Vintage Nike",
            "Nike",
            "M",
            "Unisex",
            "Camiseta",
            (12.0, 25.0),
            3,
            "Lorena",
            date(2024, 1, 15),
            date(2024, 1, 20),
        ),
        product(
            2,
            "Sudadera Champion Retro",
            "Champion",
            "L",
            "Hombre",
            "Sudadera",
            (18.0, 35.0),
            0,
            "Admin",
            date(2024, 1, 10),
            date(2024, 1, 22),
        ),
        product(
            3,
            "Pantalones Levis 501",
            "Levis",
            "32",
            "Hombre",
            "Pantalón",
            (22.0, 45.0),
            1,
            "Lorena",
            date(2024, 1, 12),
            date(2024, 1, 19),
        ),
        product(
            4,
            "Chaqueta Adidas Original",
            "Adidas",
            "S",
            "Mujer",
            "Chaqueta",
            (25.0, 55.0),
            2,
            "Admin",
            date(2024, 1, 8),
            date(2024, 1, 18),
        ),
        product(
            5,
            "Vestido Zara Vintage",
            "Zara",
            "M",
            "Mujer",
            "Vestido",
            (15.0, 30.0),
            1,
            "Lorena",
            date(2024, 1, 14),
            date(2024, 1, 21),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn notification(
    id: u64,
    kind: NotificationKind,
    title: &str,
    message: &str,
    timestamp: DateTime<Utc>,
    priority: Priority,
    read: bool,
    action_required: bool,
) -> Notification {
    Notification {
        id,
        kind,
        title: title.to_string(),
        message: message.to_string(),
        timestamp,
        priority,
        read,
        action_required,
    }
}

pub fn notifications() -> Vec<Notification> {
    vec![
        notification(
            1,
            NotificationKind::StockLow {
                products: vec![
                    "Camiseta Nike Vintage".to_string(),
                    "Pantalones Levi's 501".to_string(),
                    "Sudadera Champion".to_string(),
                ],
                product: None,
                last_sale: None,
            },
            "Stock bajo en productos",
            "5 productos tienen stock crítico y necesitan reposición",
            at(2024, 1, 25, 10, 30),
            Priority::High,
            false,
            true,
        ),
        notification(
            2,
            NotificationKind::Sale {
                product: "Chaqueta Adidas Original".to_string(),
                amount: 55.0,
                buyer: "Cliente Vinted".to_string(),
            },
            "Nueva venta completada",
            "Chaqueta Adidas Original - €55",
            at(2024, 1, 25, 9, 15),
            Priority::Medium,
            false,
            false,
        ),
        notification(
            3,
            NotificationKind::UserActivity {
                user: "Lorena".to_string(),
                count: 3,
            },
            "Lorena añadió nuevos productos",
            "Se han añadido 3 productos al inventario",
            at(2024, 1, 25, 8, 45),
            Priority::Low,
            false,
            false,
        ),
        notification(
            4,
            NotificationKind::Milestone {
                milestone: "monthly_sales".to_string(),
                target: 2500.0,
                achieved: 2847.0,
            },
            "¡Meta alcanzada!",
            "Has superado los €2,500 en ventas este mes",
            at(2024, 1, 24, 16, 20),
            Priority::High,
            true,
            false,
        ),
        notification(
            5,
            NotificationKind::PriceChange {
                user: "Admin".to_string(),
                products: 2,
            },
            "Admin modificó precios",
            "Se actualizaron los precios de 2 productos",
            at(2024, 1, 24, 14, 10),
            Priority::Medium,
            true,
            false,
        ),
        notification(
            6,
            NotificationKind::System {
                backup_size: "2.3 MB".to_string(),
            },
            "Backup automático completado",
            "Respaldo de datos realizado correctamente",
            at(2024, 1, 24, 12, 0),
            Priority::Low,
            true,
            false,
        ),
        notification(
            7,
            NotificationKind::StockLow {
                products: Vec::new(),
                product: Some("Vestido Zara Vintage".to_string()),
                last_sale: Some(date(2024, 1, 23)),
            },
            "Producto agotado",
            "Vestido Zara Vintage se ha agotado completamente",
            at(2024, 1, 23, 18, 30),
            Priority::High,
            true,
            true,
        ),
        notification(
            8,
            NotificationKind::UserActivity {
                user: "Lorena".to_string(),
                count: 4,
            },
            "Lorena editó inventario",
            "Se actualizaron las cantidades de 4 productos",
            at(2024, 1, 23, 15, 45),
            Priority::Low,
            true,
            false,
        ),
    ]
}

/// Monthly sales, purchases and profit, oldest first
pub fn monthly_sales() -> Vec<MonthlySales> {
    [
        ("Jan", 1200.0, 800.0),
        ("Feb", 1800.0, 1100.0),
        ("Mar", 2200.0, 1400.0),
        ("Apr", 1900.0, 1200.0),
        ("May", 2400.0, 1500.0),
        ("Jun", 2800.0, 1700.0),
    ]
    .into_iter()
    .map(|(month, sales, purchases)| MonthlySales::new(month, sales, purchases))
    .collect()
}

/// Sales and shop visits per weekday
pub fn weekly_sales() -> Vec<DailySales> {
    [
        ("Mon", 120.0, 45),
        ("Tue", 180.0, 67),
        ("Wed", 240.0, 89),
        ("Thu", 160.0, 52),
        ("Fri", 300.0, 112),
        ("Sat", 280.0, 98),
        ("Sun", 200.0, 76),
    ]
    .into_iter()
    .map(|(day, sales, visits)| DailySales {
        day: day.to_string(),
        sales,
        visits,
    })
    .collect()
}
