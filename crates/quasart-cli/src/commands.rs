use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub(crate) enum InventoryCommand {
    /// List products, optionally filtered
    List(InventoryFilters),
    /// Show one product
    Show {
        id: u64,
    },
    /// Validate a new product and add it to the seeded inventory
    Add(ProductArgs),
    /// Change some fields of an existing product
    Edit(ProductEdit),
}

#[derive(Args, Default)]
pub(crate) struct InventoryFilters {
    /// Case-insensitive search over name and brand
    #[arg(long, short)]
    pub search: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    /// available, low-stock, sold (or disponible, stock-bajo, vendido); all for any
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    /// Garment type, e.g. Camiseta
    #[arg(long = "type")]
    pub kind: Option<String>,
}

/// Product form fields, taken verbatim and validated
#[derive(Args)]
pub(crate) struct ProductArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub brand: String,
    #[arg(long, default_value = "")]
    pub size: String,
    #[arg(long, default_value = "")]
    pub gender: String,
    #[arg(long = "type", default_value = "")]
    pub kind: String,
    #[arg(long, default_value = "")]
    pub purchase_price: String,
    #[arg(long, default_value = "")]
    pub sale_price: String,
    /// Defaults to 1 when left empty
    #[arg(long, default_value = "")]
    pub quantity: String,
    /// Who is adding the product
    #[arg(long, default_value = "Admin")]
    pub added_by: String,
}

/// Fields left out keep their current value
#[derive(Args)]
pub(crate) struct ProductEdit {
    pub id: u64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub size: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub purchase_price: Option<String>,
    #[arg(long)]
    pub sale_price: Option<String>,
    #[arg(long)]
    pub quantity: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ExportCommand {
    /// Inventory as .json, .csv or .md
    Inventory {
        /// Output file; the extension picks the format unless --format is given
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// json, csv or md
        #[arg(long)]
        format: Option<String>,
    },
    /// Settings backup snapshot
    Settings {
        /// File or directory; defaults to the configured export dir
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Metrics report for a period
    Report {
        /// 1m, 3m, 6m or 1y
        #[arg(long, default_value = "6m")]
        period: String,
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}
