use chrono::NaiveDate;
use quasart_core::pricing::margin_percent;
use quasart_core::{query, seed, Product, ProductStatus, Query, Record};

fn create_test_product(id: u64, name: &str, brand: &str, quantity: u32) -> Product {
    let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    Product {
        id,
        name: name.to_string(),
        brand: brand.to_string(),
        size: "M".to_string(),
        gender: "Unisex".to_string(),
        kind: "Camiseta".to_string(),
        purchase_price: 12.0,
        sale_price: 25.0,
        quantity,
        added_by: "Lorena".to_string(),
        date_added: day,
        last_update: day,
    }
}

fn sample_queries() -> Vec<Query> {
    vec![
        Query::new(),
        Query::new().search("nike"),
        Query::new().search("zzz"),
        Query::new().filter("brand", "Levis"),
        Query::new().filter("status", "low-stock"),
        Query::new().filter("gender", "Hombre").search("a"),
        Query::new().filter("brand", ""),
    ]
}

#[test]
fn test_empty_query_is_identity() {
    let products = seed::products();
    let result = query(&products, &Query::new());
    assert_eq!(result.ids(), vec![1, 2, 3, 4, 5]);

    let wildcard = Query::new().search("   ").filter("brand", "").filter("status", "");
    assert_eq!(query(&products, &wildcard).len(), products.len());
}

#[test]
fn test_matches_keep_original_order() {
    let products = seed::products();
    for q in sample_queries() {
        let ids = query(&products, &q).ids();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted, "query {:?} reordered records", q);
    }
}

#[test]
fn test_search_ignores_case() {
    let products = seed::products();
    let lower = query(&products, &Query::new().search("nike")).ids();
    let upper = query(&products, &Query::new().search("NIKE")).ids();
    let mixed = query(&products, &Query::new().search("NiKe")).ids();
    assert_eq!(lower, vec![1]);
    assert_eq!(lower, upper);
    assert_eq!(lower, mixed);
}

#[test]
fn test_stats_do_not_depend_on_query() {
    let products = seed::products();
    let expected = Product::summarize(&products);
    for q in sample_queries() {
        assert_eq!(query(&products, &q).stats, expected);
    }

    let notifications = seed::notifications();
    let feed_stats = query(&notifications, &Query::new().flag("read", false)).stats;
    assert_eq!(feed_stats, quasart_core::Notification::summarize(&notifications));
}

#[test]
fn test_nike_scenario() {
    let records = vec![
        create_test_product(1, "Camiseta Vintage Nike", "Nike", 3),
        create_test_product(2, "Sudadera Champion", "Champion", 0),
    ];

    let result = query(&records, &Query::new().search("nike"));
    assert_eq!(result.len(), 1);
    assert_eq!(result.matched[0].id, 1);
    assert_eq!(result.stats.get("available"), 1);
    assert_eq!(result.stats.get("sold"), 1);
}

#[test]
fn test_status_derivation() {
    assert_eq!(create_test_product(1, "a", "b", 0).status(), ProductStatus::Sold);
    assert_eq!(create_test_product(1, "a", "b", 1).status(), ProductStatus::LowStock);
    assert_eq!(create_test_product(1, "a", "b", 5).status(), ProductStatus::Available);
}

#[test]
fn test_status_derivation_is_idempotent() {
    for quantity in [0, 1, 2, 5, 100] {
        let product = create_test_product(1, "a", "b", quantity);
        let once = product.status();
        let twice = product.clone().status();
        assert_eq!(once, twice);
        assert_eq!(once, ProductStatus::from_quantity(quantity));
    }
}

#[test]
fn test_margin_rounds_to_one_decimal() {
    assert_eq!(margin_percent(12.0, 25.0), Some(108.3));
    assert_eq!(create_test_product(1, "a", "b", 1).margin(), Some(108.3));
    assert_eq!(margin_percent(0.0, 25.0), None);
}

#[test]
fn test_status_filter_accepts_shop_labels() {
    let records = vec![
        create_test_product(1, "Camiseta Vintage Nike", "Nike", 3),
        create_test_product(2, "Sudadera Champion", "Champion", 0),
        create_test_product(3, "Pantalones Levis 501", "Levis", 1),
    ];

    let ids = |status: &str| query(&records, &Query::new().filter("status", status)).ids();
    assert_eq!(ids("disponible"), vec![1]);
    assert_eq!(ids("vendido"), vec![2]);
    assert_eq!(ids("Stock-Bajo"), vec![3]);
    assert_eq!(ids("available"), ids("disponible"));

    let seeded = seed::products();
    let disponible = query(&seeded, &Query::new().filter("status", "disponible"));
    assert_eq!(disponible.len(), 2);
    assert!(query(&seeded, &Query::new().filter("status", "agotado")).is_empty());
}
