//! Dashboard report generation.
//!
//! [`build_dashboard_report`] folds already-fetched collections into one
//! structured summary; [`generate_dashboard_report`] fetches them first. The
//! `format_*` helpers render pieces of a report as text for the command line.

use super::metrics::{
    self, MonthlyVolume, RegionCount, StatusCount, days_remaining_until,
};
use crate::{
    errors::Result,
    models::{
        Milestone, Project, ProjectStatus, PurchaseOrder, PurchaseOrderStatus, StatusCategory,
        Supplier,
    },
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{debug, instrument};

/// A project past its deadline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueProject {
    /// Project id
    pub project_id: String,
    /// Display name
    pub name: String,
    /// Missed deadline
    pub deadline: NaiveDate,
    /// Negative: days since the deadline passed
    pub days_remaining: i64,
}

/// Recorded versus derived delivery performance for one supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPerformance {
    /// Supplier id
    pub supplier_id: String,
    /// Display name
    pub name: String,
    /// Rating out of 5
    pub rating: f64,
    /// On-time rate stored on the supplier
    pub recorded_on_time_rate: f64,
    /// On-time rate derived from orders
    pub derived_on_time_rate: f64,
}

/// Everything the dashboard shows, computed at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// When the report was built
    pub generated_at: DateTime<Utc>,
    /// All projects
    pub total_projects: usize,
    /// Projects not yet completed
    pub open_projects: usize,
    /// All suppliers
    pub total_suppliers: usize,
    /// All purchase orders
    pub total_orders: usize,
    /// Orders still active
    pub active_orders: usize,
    /// Projects per status
    pub project_statuses: Vec<StatusCount<ProjectStatus>>,
    /// Orders per status
    pub order_statuses: Vec<StatusCount<PurchaseOrderStatus>>,
    /// Projects per region
    pub regions: Vec<RegionCount>,
    /// Orders per month of the current year
    pub monthly_orders: Vec<MonthlyVolume>,
    /// Sum of project budgets
    pub total_budget: f64,
    /// Budget consumed by progress
    pub budget_spent: f64,
    /// Mean project progress
    pub average_progress: f64,
    /// Mean supplier rating
    pub average_supplier_rating: f64,
    /// Unfinished projects past their deadline
    pub overdue_projects: Vec<OverdueProject>,
    /// Milestones due within the window
    pub upcoming_milestones: Vec<Milestone>,
    /// Per-supplier ratings and on-time rates
    pub supplier_performance: Vec<SupplierPerformance>,
}

/// Builds a dashboard report from fetched collections.
///
/// The monthly histogram covers the calendar year of `now`; upcoming
/// milestones are those due within `window_days` of today.
#[must_use]
pub fn build_dashboard_report(
    projects: &[Project],
    suppliers: &[Supplier],
    orders: &[PurchaseOrder],
    milestones: &[Milestone],
    now: DateTime<Utc>,
    window_days: i64,
) -> DashboardReport {
    let today = now.date_naive();

    let overdue_projects = metrics::overdue_projects(projects, today)
        .into_iter()
        .filter_map(|p| {
            let deadline = p.deadline?;
            Some(OverdueProject {
                project_id: p.id.clone(),
                name: p.name.clone(),
                deadline,
                days_remaining: days_remaining_until(deadline, now),
            })
        })
        .collect();

    let supplier_performance = suppliers
        .iter()
        .map(|s| SupplierPerformance {
            supplier_id: s.id.clone(),
            name: s.name.clone(),
            rating: s.rating,
            recorded_on_time_rate: s.on_time_delivery_rate,
            derived_on_time_rate: metrics::on_time_delivery_rate(&s.id, orders),
        })
        .collect();

    DashboardReport {
        generated_at: now,
        total_projects: projects.len(),
        open_projects: projects
            .iter()
            .filter(|p| p.status != ProjectStatus::Completed)
            .count(),
        total_suppliers: suppliers.len(),
        total_orders: orders.len(),
        active_orders: orders
            .iter()
            .filter(|o| o.status == PurchaseOrderStatus::Active)
            .count(),
        project_statuses: metrics::project_status_distribution(projects),
        order_statuses: metrics::order_status_distribution(orders),
        regions: metrics::region_distribution(projects),
        monthly_orders: metrics::monthly_order_volume(orders, now.year()),
        total_budget: metrics::portfolio_budget(projects),
        budget_spent: metrics::portfolio_budget_spent(projects),
        average_progress: metrics::average_progress(projects),
        average_supplier_rating: metrics::average_supplier_rating(suppliers),
        overdue_projects,
        upcoming_milestones: metrics::upcoming_milestones(milestones, today, window_days)
            .into_iter()
            .cloned()
            .collect(),
        supplier_performance,
    }
}

/// Fetches projects, suppliers, orders and milestones concurrently and builds the report.
///
/// # Errors
/// Returns the first storage error among the four fetches.
#[instrument(skip(db))]
pub async fn generate_dashboard_report(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
    window_days: i64,
) -> Result<DashboardReport> {
    let (projects, suppliers, orders, milestones) = tokio::join!(
        super::project::list_projects(db),
        super::supplier::list_suppliers(db),
        super::purchase_order::list_purchase_orders(db),
        super::milestone::list_milestones(db),
    );
    let (projects, suppliers, orders, milestones) = (projects?, suppliers?, orders?, milestones?);
    debug!(
        "Building dashboard from {} projects, {} suppliers, {} orders",
        projects.len(),
        suppliers.len(),
        orders.len()
    );
    Ok(build_dashboard_report(
        &projects,
        &suppliers,
        &orders,
        &milestones,
        now,
        window_days,
    ))
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // clamped_progress is within [0, 100] and length is small, so the product fits.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}

/// Formats an amount as dollars with two decimals, e.g. `$1250.00`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}

/// Human wording for a days-remaining count.
#[must_use]
pub fn format_days_remaining(days: i64) -> String {
    match days {
        0 => "Due today".to_string(),
        1 => "1 day left".to_string(),
        -1 => "Overdue by 1 day".to_string(),
        d if d > 0 => format!("{d} days left"),
        d => format!("Overdue by {} days", d.unsigned_abs()),
    }
}

/// Renders a report as plain text, one section per block.
#[must_use]
pub fn render_dashboard(report: &DashboardReport) -> String {
    let mut lines = vec![
        format!("Dashboard as of {}", report.generated_at.format("%Y-%m-%d %H:%M UTC")),
        String::new(),
        format!(
            "Projects: {} ({} open)   Suppliers: {}   Orders: {} ({} active)",
            report.total_projects,
            report.open_projects,
            report.total_suppliers,
            report.total_orders,
            report.active_orders
        ),
        format!(
            "Budget: {} spent of {}",
            format_currency(report.budget_spent),
            format_currency(report.total_budget)
        ),
        format!(
            "Average progress: {}",
            format_progress_bar(report.average_progress, Some(20))
        ),
        format!("Average supplier rating: {:.1} / 5", report.average_supplier_rating),
        String::new(),
        "Project status:".to_string(),
    ];
    lines.extend(
        report
            .project_statuses
            .iter()
            .map(|b| format!("  {:<12} {}", b.status.as_str(), b.count)),
    );
    lines.push("Order status:".to_string());
    lines.extend(
        report
            .order_statuses
            .iter()
            .map(|b| format!("  {:<12} {}", b.status.as_str(), b.count)),
    );
    lines.push("Projects by region:".to_string());
    lines.extend(
        report
            .regions
            .iter()
            .map(|r| format!("  {:<14} {}", r.region.name(), r.count)),
    );
    lines.push("Orders this year:".to_string());
    lines.push(format!(
        "  {}",
        report
            .monthly_orders
            .iter()
            .map(|m| format!("{} {}", m.label, m.orders))
            .collect::<Vec<_>>()
            .join("  ")
    ));

    if !report.overdue_projects.is_empty() {
        lines.push(String::new());
        lines.push("Overdue projects:".to_string());
        lines.extend(report.overdue_projects.iter().map(|p| {
            format!(
                "  {} (due {}): {}",
                p.name,
                p.deadline,
                format_days_remaining(p.days_remaining)
            )
        }));
    }
    if !report.upcoming_milestones.is_empty() {
        lines.push(String::new());
        lines.push("Upcoming milestones:".to_string());
        lines.extend(report.upcoming_milestones.iter().map(|m| {
            let due = m
                .due_date
                .map_or_else(|| "no date".to_string(), |d| d.to_string());
            format!("  {} ({due})", m.title)
        }));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::milestone;
    use crate::models::{MilestonePatch, ProjectPatch, PurchaseOrderPatch};
    use crate::test_utils::*;
    use chrono::TimeZone;

    fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_progress_bar_full() {
        let bar = format_progress_bar(100.0, Some(10));
        assert_eq!(bar, "[██████████] 100.0%");
    }

    #[test]
    fn test_format_progress_bar_half() {
        let bar = format_progress_bar(50.0, Some(10));
        assert_eq!(bar, "[█████░░░░░] 50.0%");
    }

    #[test]
    fn test_format_progress_bar_out_of_range_is_clamped() {
        let bar = format_progress_bar(-25.0, Some(10));
        assert_eq!(bar, "[░░░░░░░░░░] -25.0%");
    }

    #[test]
    fn test_huge_window_on_empty_input() {
        let report = build_dashboard_report(&[], &[], &[], &[], noon(2025, 6, 1), 1_000_000_000);
        assert_eq!(report.total_projects, 0);
        assert!(report.upcoming_milestones.is_empty());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1250.0), "$1250.00");
        assert_eq!(format_currency(-3.5), "-$3.50");
    }

    #[test]
    fn test_format_days_remaining() {
        assert_eq!(format_days_remaining(0), "Due today");
        assert_eq!(format_days_remaining(1), "1 day left");
        assert_eq!(format_days_remaining(12), "12 days left");
        assert_eq!(format_days_remaining(-1), "Overdue by 1 day");
        assert_eq!(format_days_remaining(-9), "Overdue by 9 days");
    }

    #[test]
    fn test_build_report_from_samples() {
        let late = Project {
            id: "late".to_string(),
            name: "Late".to_string(),
            deadline: Some(date(2025, 3, 1)),
            ..sample_project()
        };
        let done = Project {
            id: "done".to_string(),
            status: ProjectStatus::Completed,
            location: "Unknown Outpost".to_string(),
            ..sample_project()
        };
        let projects = vec![late, done];
        let report = build_dashboard_report(
            &projects,
            &[sample_supplier()],
            &[sample_purchase_order()],
            &[sample_milestone()],
            noon(2025, 3, 20),
            14,
        );

        assert_eq!(report.total_projects, 2);
        assert_eq!(report.open_projects, 1);
        assert_eq!(report.active_orders, 1);
        assert_eq!(report.regions.iter().map(|r| r.count).sum::<usize>(), 1);
        assert_eq!(report.monthly_orders[0].orders, 1);
        assert_eq!(report.overdue_projects.len(), 1);
        assert_eq!(report.overdue_projects[0].days_remaining, -19);
        assert_eq!(report.upcoming_milestones.len(), 1);
        assert_eq!(report.supplier_performance[0].derived_on_time_rate, 0.0);
        assert_eq!(report.supplier_performance[0].recorded_on_time_rate, 92.5);

        let text = render_dashboard(&report);
        assert!(text.contains("Overdue projects:"));
        assert!(text.contains("Overdue by 19 days"));
        assert!(text.contains("First article inspection"));
    }

    #[tokio::test]
    async fn test_generate_report_from_database() -> Result<()> {
        let (db, supplier) = setup_with_supplier().await?;
        let project = crate::core::project::create_project(
            &db,
            ProjectPatch {
                progress: Some(50),
                budget: Some(80_000.0),
                location: Some("Osaka, Japan".to_string()),
                ..ProjectPatch::named("Gearboxes")
            },
        )
        .await?;
        milestone::create_milestone(
            &db,
            MilestonePatch {
                project_id: Some(Some(project.id.clone())),
                title: Some("Tooling ready".to_string()),
                due_date: Some(Some(date(2025, 6, 5))),
                ..MilestonePatch::default()
            },
        )
        .await?;
        crate::core::purchase_order::create_purchase_order(
            &db,
            PurchaseOrderPatch {
                supplier_id: Some(Some(supplier.id.clone())),
                date_created: Some(Some(date(2025, 5, 2))),
                ..order_patch("PO-77")
            },
        )
        .await?;

        let report = generate_dashboard_report(&db, noon(2025, 6, 1), 14).await?;
        assert_eq!(report.total_projects, 1);
        assert_eq!(report.total_suppliers, 1);
        assert_eq!(report.total_orders, 1);
        assert_eq!(report.budget_spent, 40_000.0);
        assert_eq!(report.monthly_orders[4].orders, 1);
        assert_eq!(report.upcoming_milestones.len(), 1);
        assert_eq!(
            report
                .regions
                .iter()
                .find(|r| r.region == metrics::Region::Asia)
                .map(|r| r.count),
            Some(1)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_report_on_empty_database() -> Result<()> {
        let db = setup_test_db().await?;
        let report = generate_dashboard_report(&db, noon(2025, 6, 1), 14).await?;
        assert_eq!(report.total_projects, 0);
        assert_eq!(report.average_progress, 0.0);
        assert_eq!(report.project_statuses.len(), 4);
        assert_eq!(report.monthly_orders.len(), 12);
        Ok(())
    }
}
