mod commands;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use commands::{
    ConfigCommand, ExportCommand, InventoryCommand, InventoryFilters, ProductArgs, ProductEdit,
};
use quasart_core::export::{ExportFormat, Exporter};
use quasart_core::metrics::{busiest_day, category_breakdown, sales_summary};
use quasart_core::pricing::{format_margin, format_money};
use quasart_core::{
    build_report, login, seed, summarize, Action, AppState, Config, Credentials,
    NotificationKind, Product, ProductForm, ProductStatus, Query, ReportPeriod,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quasart")]
#[command(version, about = "Back office for the Quasart Style secondhand shop", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "QUASART_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in (any non-empty username and password)
    Login {
        #[arg(long, short)]
        username: String,
        #[arg(long, short)]
        password: String,
    },
    /// Stock and notification counters, KPIs, recent products
    Dashboard,
    /// Browse or add products
    Inventory {
        #[command(subcommand)]
        command: Option<InventoryCommand>,
    },
    /// Notification feed
    Notifications {
        #[arg(long, short)]
        search: Option<String>,
        /// stock_low, sale, user_activity, milestone, price_change, system or all
        #[arg(long = "type")]
        kind: Option<String>,
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// Sales and stock metrics
    Metrics {
        /// 1m, 3m, 6m or 1y
        #[arg(long, default_value = "6m")]
        period: String,
    },
    /// Write inventory, settings or a report to disk
    Export {
        #[command(subcommand)]
        command: ExportCommand,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quasart=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!(?config, "config loaded");

    // Nothing is persisted between runs
    let state = AppState::seeded();

    match cli.command {
        Some(Commands::Login { username, password }) => {
            let credentials = Credentials::new(username, password);
            let session = login(&credentials, config.auth.login_delay()).await?;
            let state = state.apply(Action::Login(session));
            if let Some(session) = &state.session {
                println!("Welcome, {} ({})", session.name, session.role);
            }
            println!("Opening {}", state.section.label());
            println!("{} unread notifications", state.unread_count());
        }
        Some(Commands::Dashboard) => print_dashboard(&state, &config),
        Some(Commands::Inventory { command }) => match command {
            Some(InventoryCommand::Show { id }) => {
                let product = state.require_product(id)?;
                print_products(&[product], &config);
            }
            Some(InventoryCommand::Add(args)) => add_product(state, args, &config)?,
            Some(InventoryCommand::Edit(edit)) => edit_product(state, edit, &config)?,
            Some(InventoryCommand::List(filters)) => list_inventory(&state, &filters, &config)?,
            None => list_inventory(&state, &InventoryFilters::default(), &config)?,
        },
        Some(Commands::Notifications {
            search,
            kind,
            unread,
        }) => {
            let mut q = Query::new();
            if let Some(term) = search {
                q = q.search(term);
            }
            if let Some(kind) = unless_all(kind.as_deref()) {
                if !NotificationKind::all_tags().contains(&kind) {
                    anyhow::bail!(
                        "unknown notification type '{}' (use {} or all)",
                        kind,
                        NotificationKind::all_tags().join(", ")
                    );
                }
                q = q.filter("type", kind);
            }
            if unread {
                q = q.flag("read", false);
            }

            let now = Utc::now();
            let result = state.feed(&q);
            for n in &result.matched {
                println!(
                    "{} [{}] {} {} - {}",
                    if n.read { " " } else { "*" },
                    n.priority,
                    n.kind.label(),
                    n.title,
                    n.relative_time(now)
                );
                println!("    {}", n.message);
                println!("    {}", n.kind.detail());
            }
            println!();
            print_stats(&result.stats);
        }
        Some(Commands::Metrics { period }) => {
            let period: ReportPeriod = period.parse().map_err(anyhow::Error::msg)?;
            print_metrics(&state, period, &config);
        }
        Some(Commands::Export { command }) => export(&state, command, &config)?,
        Some(Commands::Config { command }) => match command {
            ConfigCommand::Show => {
                let path = match &cli.config {
                    Some(path) => path.clone(),
                    None => Config::config_path()?,
                };
                println!("# {}", path.display());
                print!("{}", toml_string(&config)?);
            }
            ConfigCommand::Init { force } => {
                let path = match &cli.config {
                    Some(path) => path.clone(),
                    None => Config::config_path()?,
                };
                if path.exists() && !force {
                    anyhow::bail!("{} already exists (use --force)", path.display());
                }
                Config::default().save_to(&path)?;
                println!("Wrote {}", path.display());
            }
        },
        None => {
            println!("No command specified. Try --help");
        }
    }

    Ok(())
}

/// `all` is the "no filter" choice on the type and status pickers
fn unless_all(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().eq_ignore_ascii_case("all"))
}

fn toml_string(config: &Config) -> anyhow::Result<String> {
    toml::to_string_pretty(config).context("failed to render config")
}

fn print_stats(stats: &quasart_core::Stats) {
    let line: Vec<String> = stats
        .iter()
        .map(|(label, count)| format!("{}: {}", label, count))
        .collect();
    println!("{}", line.join("  "));
}

fn print_products(products: &[&Product], config: &Config) {
    let symbol = &config.display.currency_symbol;
    for p in products {
        println!(
            "{:>4}  {:<28} {:<10} {:<4} {:<10} {:>9} {:>9} {:>8} x{:<3} {}",
            p.id,
            p.name,
            p.brand,
            p.size,
            p.status().label(),
            format_money(p.purchase_price, symbol),
            format_money(p.sale_price, symbol),
            format_margin(p.margin()),
            p.quantity,
            p.last_update.format(&config.display.date_format),
        );
    }
}

fn list_inventory(
    state: &AppState,
    filters: &InventoryFilters,
    config: &Config,
) -> anyhow::Result<()> {
    let mut q = Query::new();
    if let Some(term) = &filters.search {
        q = q.search(term.as_str());
    }
    if let Some(brand) = &filters.brand {
        q = q.filter("brand", brand.as_str());
    }
    if let Some(status) = unless_all(filters.status.as_deref()) {
        // Fail loudly on a typo instead of listing nothing
        status.parse::<ProductStatus>().map_err(anyhow::Error::msg)?;
        q = q.filter("status", status);
    }
    if let Some(gender) = &filters.gender {
        q = q.filter("gender", gender.as_str());
    }
    if let Some(kind) = &filters.kind {
        q = q.filter("type", kind.as_str());
    }

    let result = state.inventory(&q);
    print_products(&result.matched, config);
    println!();
    print_stats(&result.stats);
    Ok(())
}

fn add_product(state: AppState, args: ProductArgs, config: &Config) -> anyhow::Result<()> {
    let form = ProductForm {
        name: args.name,
        brand: args.brand,
        size: args.size,
        gender: args.gender,
        kind: args.kind,
        purchase_price: args.purchase_price,
        sale_price: args.sale_price,
        quantity: args.quantity,
    };
    let action = state.submit_product(None, &form, &args.added_by)?;

    let state = state.apply(action);
    if let Some(added) = state.products.last() {
        println!("Added product {}", added.id);
        print_products(&[added], config);
    }
    Ok(())
}

fn edit_product(state: AppState, edit: ProductEdit, config: &Config) -> anyhow::Result<()> {
    let mut form = ProductForm::from_product(state.require_product(edit.id)?);
    let fields = [
        (&mut form.name, edit.name),
        (&mut form.brand, edit.brand),
        (&mut form.size, edit.size),
        (&mut form.gender, edit.gender),
        (&mut form.kind, edit.kind),
        (&mut form.purchase_price, edit.purchase_price),
        (&mut form.sale_price, edit.sale_price),
        (&mut form.quantity, edit.quantity),
    ];
    for (slot, value) in fields {
        if let Some(value) = value {
            *slot = value;
        }
    }

    let action = state.submit_product(Some(edit.id), &form, "")?;
    let state = state.apply(action);
    let updated = state.require_product(edit.id)?;
    println!("Updated product {}", updated.id);
    print_products(&[updated], config);
    Ok(())
}

fn print_dashboard(state: &AppState, config: &Config) {
    let summary = summarize(state, config.inventory.recent_products);
    let symbol = &config.display.currency_symbol;

    println!("Inventory");
    print_stats(&summary.inventory);
    println!(
        "Unread notifications: {}  (action required: {})",
        summary.unread(),
        summary.action_required()
    );
    println!();
    println!("Units in stock:   {}", summary.kpis.units_in_stock);
    println!("Stock value:      {}", format_money(summary.kpis.stock_value, symbol));
    println!("Potential profit: {}", format_money(summary.kpis.potential_profit, symbol));
    println!("Average margin:   {}", format_margin(summary.kpis.average_margin));
    if let Some(brand) = &summary.kpis.top_brand {
        println!("Top brand:        {}", brand);
    }
    println!();
    println!("Recently updated");
    let recent: Vec<&Product> = summary.recent_products.iter().collect();
    print_products(&recent, config);
}

fn print_metrics(state: &AppState, period: ReportPeriod, config: &Config) {
    let symbol = &config.display.currency_symbol;
    let sales = sales_summary(&seed::monthly_sales(), period);

    println!("{}", period.display_name());
    for m in &sales.months {
        println!(
            "  {:<4} sales {:>10}  purchases {:>10}  profit {:>10}",
            m.month,
            format_money(m.sales, symbol),
            format_money(m.purchases, symbol),
            format_money(m.profit, symbol)
        );
    }
    println!(
        "Total sales {}  profit {}  growth {}",
        format_money(sales.total_sales, symbol),
        format_money(sales.total_profit, symbol),
        format_margin(sales.growth_rate)
    );

    let week = seed::weekly_sales();
    if let Some(day) = busiest_day(&week) {
        println!("Busiest day: {} ({})", day.day, format_money(day.sales, symbol));
    }

    println!();
    println!("By brand");
    for b in quasart_core::metrics::brand_breakdown(&state.products) {
        println!("  {:<10} {:>2} products {:>3} units {:>5.1}%", b.name, b.products, b.units, b.share);
    }
    println!("By type");
    for c in category_breakdown(&state.products) {
        println!("  {:<10} {:>2} products {:>3} units {:>5.1}%", c.name, c.products, c.units, c.share);
    }
}

fn export(state: &AppState, command: ExportCommand, config: &Config) -> anyhow::Result<()> {
    let export_dir = &config.inventory.export_dir;
    let now = Utc::now();

    match command {
        ExportCommand::Inventory { out, format } => {
            let format = match format {
                Some(f) => Some(ExportFormat::from_extension(&f).ok_or_else(|| {
                    anyhow::anyhow!("unknown format '{}' (use json, csv or md)", f)
                })?),
                None => None,
            };
            let path = out.unwrap_or_else(|| {
                export_dir.join(format!(
                    "quasart-inventory-{}.{}",
                    now.format("%Y-%m-%d"),
                    format.unwrap_or(ExportFormat::Json).extension()
                ))
            });
            match format {
                Some(format) => {
                    Exporter::export_to_file_with_format(&state.products, &path, format)?
                }
                None => Exporter::export_to_file(&state.products, &path)?,
            }
            println!("Exported {} products to {}", state.products.len(), path.display());
        }
        ExportCommand::Settings { out } => {
            let snapshot = state.settings.snapshot(now);
            let target = Exporter::export_settings(&snapshot, &out.unwrap_or_else(|| export_dir.clone()))?;
            println!("Settings saved to {}", target.display());
        }
        ExportCommand::Report { period, out } => {
            let period: ReportPeriod = period.parse().map_err(anyhow::Error::msg)?;
            let report = build_report(
                &state.products,
                &seed::monthly_sales(),
                period,
                now.date_naive(),
            );
            let target = Exporter::export_report(&report, &out.unwrap_or_else(|| export_dir.clone()))?;
            println!("Report saved to {}", target.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_means_no_filter() {
        assert_eq!(unless_all(Some("all")), None);
        assert_eq!(unless_all(Some("ALL")), None);
        assert_eq!(unless_all(None), None);
        assert_eq!(unless_all(Some("sale")), Some("sale"));
    }

    #[test]
    fn test_all_type_lists_whole_feed() {
        let state = AppState::seeded();
        let mut q = Query::new();
        if let Some(kind) = unless_all(Some("all")) {
            q = q.filter("type", kind);
        }
        assert_eq!(state.feed(&q).len(), state.notifications.len());
    }
}
