use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use mfg_tracker::{
    config::{
        database,
        settings::{self, AppConfig},
    },
    core::{export, legacy, metrics, project, purchase_order, report, supplier, team_member},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about = "Manufacturing project tracker")]
struct Cli {
    /// Settings file
    #[clap(short, long, default_value = settings::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create tables and seed the configured team members
    Init,
    /// Print the dashboard summary
    Summary,
    /// List unfinished projects past their deadline
    Overdue,
    /// Write purchase orders as CSV
    ExportOrders {
        /// Output file; stdout when omitted
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Import legacy note deadlines and rewrite legacy order statuses
    MigrateLegacy,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();

    let cli = Cli::parse();
    let app_config = settings::load_or_default(&cli.config)
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 3. Connect and make sure every table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    match cli.command {
        Command::Init => init(&db, &app_config).await,
        Command::Summary => summary(&db, &app_config).await,
        Command::Overdue => overdue(&db).await,
        Command::ExportOrders { output } => export_orders(&db, &app_config, output).await,
        Command::MigrateLegacy => migrate_legacy(&db).await,
    }
}

async fn init(db: &DatabaseConnection, app_config: &AppConfig) -> Result<()> {
    let seeded = team_member::seed_team_members(db, &app_config.team_members).await?;
    info!("Database ready ({} team members seeded).", seeded);
    Ok(())
}

async fn summary(db: &DatabaseConnection, app_config: &AppConfig) -> Result<()> {
    let report = report::generate_dashboard_report(
        db,
        Utc::now(),
        app_config.dashboard.upcoming_window_days,
    )
    .await?;
    println!("{}", report::render_dashboard(&report));
    Ok(())
}

async fn overdue(db: &DatabaseConnection) -> Result<()> {
    let now = Utc::now();
    let projects = project::list_projects(db).await?;
    let overdue = metrics::overdue_projects(&projects, now.date_naive());
    if overdue.is_empty() {
        println!("No overdue projects.");
        return Ok(());
    }
    for p in overdue {
        let days = p
            .deadline
            .map_or(0, |deadline| metrics::days_remaining_until(deadline, now));
        println!(
            "{:<32} {:<14} {}",
            p.name,
            p.project_manager,
            report::format_days_remaining(days)
        );
    }
    Ok(())
}

async fn export_orders(
    db: &DatabaseConnection,
    app_config: &AppConfig,
    output: Option<PathBuf>,
) -> Result<()> {
    let (orders, projects, suppliers) = tokio::join!(
        purchase_order::list_purchase_orders(db),
        project::list_projects(db),
        supplier::list_suppliers(db),
    );
    let csv = export::export_purchase_orders(
        &orders?,
        &projects?,
        &suppliers?,
        app_config.export.csv_mode,
    )?;
    match output {
        Some(path) => {
            std::fs::write(&path, csv)?;
            info!("Wrote purchase orders to {}", path.display());
        }
        None => println!("{csv}"),
    }
    Ok(())
}

async fn migrate_legacy(db: &DatabaseConnection) -> Result<()> {
    let summary = legacy::migrate_purchase_orders(db).await?;
    println!(
        "Scanned {} orders: imported {} deadlines from {} orders, rewrote {} statuses.",
        summary.orders_scanned,
        summary.deadlines_imported,
        summary.orders_with_legacy_deadlines,
        summary.statuses_rewritten
    );
    Ok(())
}
