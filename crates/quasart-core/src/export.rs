use crate::metrics::{brand_breakdown, Report};
use crate::models::{Product, ProductStatus};
use crate::pricing::format_margin;
use crate::settings::SettingsSnapshot;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }
}

/// A product with its derived fields spelled out, for export
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductRow<'a> {
    #[serde(flatten)]
    product: &'a Product,
    status: ProductStatus,
    margin: Option<f64>,
}

impl<'a> From<&'a Product> for ProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            product,
            status: product.status(),
            margin: product.margin(),
        }
    }
}

pub fn settings_file_name(date: NaiveDate) -> String {
    format!("quasart-settings-backup-{}.json", date.format("%Y-%m-%d"))
}

pub fn report_file_name(date: NaiveDate) -> String {
    format!("quasart-report-{}.json", date.format("%Y-%m-%d"))
}

/// Exporter for inventory, settings and reports
pub struct Exporter;

impl Exporter {
    /// Export products to a file, picking the format from the extension
    pub fn export_to_file<P: AsRef<Path>>(products: &[Product], path: P) -> Result<()> {
        let path = path.as_ref();

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ExportFormat::from_extension)
            .ok_or_else(|| {
                Error::ExportError(
                    "Could not determine export format from extension. Use .json, .csv, or .md"
                        .to_string(),
                )
            })?;

        Self::export_to_file_with_format(products, path, format)
    }

    pub fn export_to_file_with_format<P: AsRef<Path>>(
        products: &[Product],
        path: P,
        format: ExportFormat,
    ) -> Result<()> {
        let content = match format {
            ExportFormat::Json => Self::to_json(products)?,
            ExportFormat::Csv => Self::to_csv(products),
            ExportFormat::Markdown => Self::to_markdown(products),
        };

        Self::write(path.as_ref(), &content)?;
        tracing::info!(path = %path.as_ref().display(), count = products.len(), "inventory exported");
        Ok(())
    }

    /// Settings backup. `path` may be a directory, in which case the dated
    /// default file name is used.
    pub fn export_settings(snapshot: &SettingsSnapshot, path: &Path) -> Result<PathBuf> {
        let target = Self::resolve(path, || settings_file_name(snapshot.export_date.date_naive()));
        let content = serde_json::to_string_pretty(snapshot)?;
        Self::write(&target, &content)?;
        tracing::info!(path = %target.display(), "settings exported");
        Ok(target)
    }

    pub fn export_report(report: &Report, path: &Path) -> Result<PathBuf> {
        let target = Self::resolve(path, || report_file_name(report.date));
        let content = serde_json::to_string_pretty(report)?;
        Self::write(&target, &content)?;
        tracing::info!(path = %target.display(), period = %report.period, "report exported");
        Ok(target)
    }

    pub fn to_json(products: &[Product]) -> Result<String> {
        let rows: Vec<ProductRow> = products.iter().map(ProductRow::from).collect();
        Ok(serde_json::to_string_pretty(&rows)?)
    }

    pub fn to_csv(products: &[Product]) -> String {
        let mut output = String::new();

        output.push_str(
            "ID,Name,Brand,Size,Gender,Type,Status,Purchase Price,Sale Price,Margin,\
             Quantity,Added By,Date Added,Last Update\n",
        );

        for p in products {
            output.push_str(&format!(
                "{},{},{},{},{},{},{},{:.2},{:.2},{},{},{},{},{}\n",
                p.id,
                Self::escape_csv(&p.name),
                Self::escape_csv(&p.brand),
                Self::escape_csv(&p.size),
                Self::escape_csv(&p.gender),
                Self::escape_csv(&p.kind),
                p.status(),
                p.purchase_price,
                p.sale_price,
                p.margin().map(|m| format!("{:.1}", m)).unwrap_or_default(),
                p.quantity,
                Self::escape_csv(&p.added_by),
                p.date_added.format("%Y-%m-%d"),
                p.last_update.format("%Y-%m-%d"),
            ));
        }

        output
    }

    pub fn to_markdown(products: &[Product]) -> String {
        let mut output = String::new();

        output.push_str("# Inventory\n\n");
        output.push_str(&format!("Total products: {}\n\n", products.len()));
        output.push_str("| Name | Brand | Size | Status | Purchase | Sale | Margin | Qty |\n");
        output.push_str("|------|-------|------|--------|----------|------|--------|-----|\n");

        for p in products {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {:.2} | {:.2} | {} | {} |\n",
                Self::escape_markdown(&p.name),
                Self::escape_markdown(&p.brand),
                Self::escape_markdown(&p.size),
                p.status().label(),
                p.purchase_price,
                p.sale_price,
                format_margin(p.margin()),
                p.quantity,
            ));
        }

        if !products.is_empty() {
            output.push_str("\n## Brands\n\n");
            for brand in brand_breakdown(products) {
                output.push_str(&format!(
                    "- {}: {} products, {} units ({:.1}% of stock value)\n",
                    brand.name, brand.products, brand.units, brand.share
                ));
            }
        }

        output
    }

    fn resolve(path: &Path, default_name: impl FnOnce() -> String) -> PathBuf {
        if path.is_dir() {
            path.join(default_name())
        } else {
            path.to_path_buf()
        }
    }

    fn write(path: &Path, content: &str) -> Result<()> {
        let mut file = File::create(path)
            .map_err(|e| Error::ExportError(format!("Failed to create {}: {}", path.display(), e)))?;

        file.write_all(content.as_bytes())
            .map_err(|e| Error::ExportError(format!("Failed to write {}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Escape CSV special characters
    fn escape_csv(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    fn escape_markdown(s: &str) -> String {
        s.replace('|', "\\|")
    }
}
