// KPIs, breakdowns and sales series behind the metrics screen
use crate::models::Product;
use crate::pricing::round_one_decimal;
use crate::query::distinct_values;
use crate::record::Record;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One month of trading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySales {
    pub month: String,
    pub sales: f64,
    pub purchases: f64,
    pub profit: f64,
}

impl MonthlySales {
    pub fn new(month: &str, sales: f64, purchases: f64) -> Self {
        Self {
            month: month.to_string(),
            sales,
            purchases,
            profit: sales - purchases,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySales {
    pub day: String,
    pub sales: f64,
    pub visits: u32,
}

/// Window selector for the sales charts and reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReportPeriod {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl ReportPeriod {
    pub fn months(&self) -> usize {
        match self {
            ReportPeriod::OneMonth => 1,
            ReportPeriod::ThreeMonths => 3,
            ReportPeriod::SixMonths => 6,
            ReportPeriod::OneYear => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::OneMonth => "1m",
            ReportPeriod::ThreeMonths => "3m",
            ReportPeriod::SixMonths => "6m",
            ReportPeriod::OneYear => "1y",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReportPeriod::OneMonth => "Last month",
            ReportPeriod::ThreeMonths => "Last 3 months",
            ReportPeriod::SixMonths => "Last 6 months",
            ReportPeriod::OneYear => "Last year",
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(ReportPeriod::OneMonth),
            "3m" => Ok(ReportPeriod::ThreeMonths),
            "6m" => Ok(ReportPeriod::SixMonths),
            "1y" | "12m" => Ok(ReportPeriod::OneYear),
            other => Err(format!("unknown period '{}' (use 1m, 3m, 6m or 1y)", other)),
        }
    }
}

/// Headline numbers computed from the current stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryKpis {
    pub product_count: usize,
    pub units_in_stock: u64,
    /// What the stock on hand cost to buy
    pub stock_cost: f64,
    /// What the stock on hand sells for
    pub stock_value: f64,
    pub potential_profit: f64,
    /// Mean margin over products that have one
    pub average_margin: Option<f64>,
    /// Brand with the most units in stock
    pub top_brand: Option<String>,
}

pub fn inventory_kpis(products: &[Product]) -> InventoryKpis {
    let units_in_stock: u64 = products.iter().map(|p| u64::from(p.quantity)).sum();
    let stock_cost: f64 = products
        .iter()
        .map(|p| p.purchase_price * f64::from(p.quantity))
        .sum();
    let stock_value: f64 = products
        .iter()
        .map(|p| p.sale_price * f64::from(p.quantity))
        .sum();

    let margins: Vec<f64> = products.iter().filter_map(Product::margin).collect();
    let average_margin = if margins.is_empty() {
        None
    } else {
        Some(round_one_decimal(
            margins.iter().sum::<f64>() / margins.len() as f64,
        ))
    };

    // First brand wins ties
    let mut top_brand: Option<(String, u64)> = None;
    for entry in breakdown_by(products, "brand") {
        if entry.units > 0 && top_brand.as_ref().map_or(true, |(_, u)| entry.units > *u) {
            top_brand = Some((entry.name, entry.units));
        }
    }

    InventoryKpis {
        product_count: products.len(),
        units_in_stock,
        stock_cost,
        stock_value,
        potential_profit: stock_value - stock_cost,
        average_margin,
        top_brand: top_brand.map(|(name, _)| name),
    }
}

/// Per-group slice of the stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Breakdown {
    pub name: String,
    pub products: usize,
    pub units: u64,
    /// Sale value of the units on hand
    pub value: f64,
    /// Share of total sale value, percent with one decimal
    pub share: f64,
}

/// Group products by any field and rank groups by stock value.
///
/// Groups keep first-seen order among equal values. Unknown fields give
/// no groups.
pub fn breakdown_by(products: &[Product], field: &str) -> Vec<Breakdown> {
    let total_value: f64 = products
        .iter()
        .map(|p| p.sale_price * f64::from(p.quantity))
        .sum();

    let mut groups: Vec<Breakdown> = distinct_values(products, field)
        .into_iter()
        .map(|name| {
            let members: Vec<&Product> = products
                .iter()
                .filter(|p| p.field(field).map(|v| v.to_string()).as_deref() == Some(name.as_str()))
                .collect();
            let units: u64 = members.iter().map(|p| u64::from(p.quantity)).sum();
            let value: f64 = members
                .iter()
                .map(|p| p.sale_price * f64::from(p.quantity))
                .sum();
            let share = if total_value > 0.0 {
                round_one_decimal(value / total_value * 100.0)
            } else {
                0.0
            };

            Breakdown {
                name,
                products: members.len(),
                units,
                value,
                share,
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    groups
}

pub fn brand_breakdown(products: &[Product]) -> Vec<Breakdown> {
    breakdown_by(products, "brand")
}

pub fn category_breakdown(products: &[Product]) -> Vec<Breakdown> {
    breakdown_by(products, "type")
}

/// Totals over a window of the monthly series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub period: ReportPeriod,
    pub months: Vec<MonthlySales>,
    pub total_sales: f64,
    pub total_purchases: f64,
    pub total_profit: f64,
    /// Month-over-month sales growth of the latest month, percent
    pub growth_rate: Option<f64>,
}

pub fn sales_summary(series: &[MonthlySales], period: ReportPeriod) -> SalesSummary {
    let start = series.len().saturating_sub(period.months());
    let months = series[start..].to_vec();

    let growth_rate = match series {
        [.., previous, latest] if previous.sales != 0.0 => Some(round_one_decimal(
            (latest.sales - previous.sales) / previous.sales * 100.0,
        )),
        _ => None,
    };

    SalesSummary {
        period,
        total_sales: months.iter().map(|m| m.sales).sum(),
        total_purchases: months.iter().map(|m| m.purchases).sum(),
        total_profit: months.iter().map(|m| m.profit).sum(),
        months,
        growth_rate,
    }
}

/// Weekday with the highest sales; earliest wins ties
pub fn busiest_day(week: &[DailySales]) -> Option<&DailySales> {
    week.iter().fold(None, |best: Option<&DailySales>, day| match best {
        Some(b) if b.sales >= day.sales => Some(b),
        _ => Some(day),
    })
}

/// The exported metrics report
///
/// KPIs stay nested under `kpis` and the monthly rows under
/// `salesData.months`, next to the window totals. Older report files
/// spread the KPIs at the top level and carried `salesData` as a bare
/// array; those do not deserialize into this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub period: ReportPeriod,
    pub date: NaiveDate,
    pub kpis: InventoryKpis,
    pub sales_data: SalesSummary,
    pub brand_data: Vec<Breakdown>,
}

pub fn build_report(
    products: &[Product],
    series: &[MonthlySales],
    period: ReportPeriod,
    date: NaiveDate,
) -> Report {
    Report {
        period,
        date,
        kpis: inventory_kpis(products),
        sales_data: sales_summary(series, period),
        brand_data: brand_breakdown(products),
    }
}
