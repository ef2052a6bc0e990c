// Derived money figures. Nothing here is stored on a product.

/// Round half away from zero to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Markup over purchase price in percent, one decimal.
///
/// `None` for a zero purchase price (donated stock has no meaningful margin).
pub fn margin_percent(purchase_price: f64, sale_price: f64) -> Option<f64> {
    if purchase_price == 0.0 {
        return None;
    }
    Some(round_one_decimal(
        (sale_price - purchase_price) / purchase_price * 100.0,
    ))
}

pub fn unit_profit(purchase_price: f64, sale_price: f64) -> f64 {
    sale_price - purchase_price
}

/// "+108.3%", "-12.5%" or "n/a"
pub fn format_margin(margin: Option<f64>) -> String {
    match margin {
        Some(m) if m >= 0.0 => format!("+{:.1}%", m),
        Some(m) => format!("{:.1}%", m),
        None => "n/a".to_string(),
    }
}

/// Amount with two decimals and the configured currency symbol
pub fn format_money(amount: f64, symbol: &str) -> String {
    format!("{}{:.2}", symbol, amount)
}
