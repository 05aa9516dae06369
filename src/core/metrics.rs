//! Derived metrics over already-fetched collections.
//!
//! Everything here is pure and synchronous. No function returns an error:
//! unparseable input is logged and the documented fallback value returned.

use crate::models::{
    Milestone, Project, ProjectStatus, PurchaseOrder, PurchaseOrderStatus, StatusCategory,
    Supplier,
};
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use serde::Serialize;
use tracing::warn;

const MS_PER_DAY: i64 = 86_400_000;

/// Parses a date as typed into forms: `YYYY-MM-DD` (midnight UTC) or RFC 3339.
#[must_use]
pub fn parse_date_input(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whole days from `now` until `target`, rounded up. Negative means overdue.
#[must_use]
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (target - now).num_milliseconds();
    let floor = ms.div_euclid(MS_PER_DAY);
    if ms.rem_euclid(MS_PER_DAY) == 0 {
        floor
    } else {
        floor + 1
    }
}

/// Days remaining until a date given as text.
///
/// Unparseable input is logged and yields 0.
#[must_use]
pub fn days_remaining(target: &str, now: DateTime<Utc>) -> i64 {
    parse_date_input(target).map_or_else(
        || {
            warn!("Cannot compute days remaining for unparseable date '{}'", target);
            0
        },
        |date| days_until(date, now),
    )
}

/// Days remaining until a stored calendar date, counted from midnight UTC.
#[must_use]
pub fn days_remaining_until(target: NaiveDate, now: DateTime<Utc>) -> i64 {
    target
        .and_hms_opt(0, 0, 0)
        .map_or(0, |midnight| days_until(midnight.and_utc(), now))
}

/// Percentage of a supplier's completed orders that shipped on or before their
/// primary contractual deadline.
///
/// Only completed orders carrying both a deadline and a shipment date count.
/// A supplier with no such orders scores 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn on_time_delivery_rate(supplier_id: &str, orders: &[PurchaseOrder]) -> f64 {
    let (qualifying, on_time) = orders
        .iter()
        .filter(|o| o.supplier_id.as_deref() == Some(supplier_id))
        .filter(|o| o.status == PurchaseOrderStatus::Completed)
        .filter_map(|o| Some((o.primary_deadline()?, o.shipment_date?)))
        .fold((0_usize, 0_usize), |(total, hits), (deadline, shipped)| {
            (total + 1, hits + usize::from(shipped <= deadline))
        });

    if qualifying == 0 {
        return 0.0;
    }
    (on_time as f64 / qualifying as f64) * 100.0
}

/// Count of items in one status bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount<S> {
    /// Status bucket
    pub status: S,
    /// Number of items
    pub count: usize,
}

/// Counts statuses into every bucket of `S`, zero buckets included, in `S::ALL` order.
pub fn status_distribution<S, I>(statuses: I) -> Vec<StatusCount<S>>
where
    S: StatusCategory,
    I: IntoIterator<Item = S>,
{
    let mut buckets: Vec<StatusCount<S>> = S::ALL
        .iter()
        .map(|&status| StatusCount { status, count: 0 })
        .collect();
    for status in statuses {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.status == status) {
            bucket.count += 1;
        }
    }
    buckets
}

/// Projects per status, every status listed even at zero.
#[must_use]
pub fn project_status_distribution(projects: &[Project]) -> Vec<StatusCount<ProjectStatus>> {
    status_distribution(projects.iter().map(|p| p.status))
}

/// Purchase orders per canonical status, every status listed even at zero.
#[must_use]
pub fn order_status_distribution(
    orders: &[PurchaseOrder],
) -> Vec<StatusCount<PurchaseOrderStatus>> {
    status_distribution(orders.iter().map(|o| o.status))
}

/// Dashboard map regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
    /// Matched by North American country, state and city names
    NorthAmerica,
    /// Matched by a few South American country names
    SouthAmerica,
    /// Matched by European country names
    Europe,
    /// Matched by Asian country names
    Asia,
    /// Matched by African country names
    Africa,
    /// Australia and New Zealand
    Oceania,
}

impl Region {
    /// Every region, in matching order
    pub const ALL: [Self; 6] = [
        Self::NorthAmerica,
        Self::SouthAmerica,
        Self::Europe,
        Self::Asia,
        Self::Africa,
        Self::Oceania,
    ];

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::SouthAmerica => "South America",
            Self::Europe => "Europe",
            Self::Asia => "Asia",
            Self::Africa => "Africa",
            Self::Oceania => "Oceania",
        }
    }

    /// Case-sensitive substrings that place a location in this region.
    #[must_use]
    pub const fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::NorthAmerica => &[
                "USA",
                "United States",
                "Canada",
                "Mexico",
                "New York",
                "California",
                "Texas",
                "Chicago",
                "Toronto",
            ],
            Self::SouthAmerica => &["Brazil", "Argentina", "Chile", "Colombia", "Peru"],
            Self::Europe => &[
                "Germany",
                "France",
                "Italy",
                "Spain",
                "United Kingdom",
                "England",
                "Netherlands",
                "Poland",
                "Sweden",
                "Switzerland",
                "Czech",
                "Portugal",
            ],
            Self::Asia => &[
                "China",
                "Japan",
                "India",
                "Korea",
                "Vietnam",
                "Taiwan",
                "Singapore",
                "Thailand",
                "Malaysia",
                "Indonesia",
            ],
            Self::Africa => &["South Africa", "Nigeria", "Egypt", "Kenya", "Morocco"],
            Self::Oceania => &["Australia", "New Zealand"],
        }
    }
}

/// The first region (in [`Region::ALL`] order) with a pattern contained in
/// `location`, or `None` when nothing matches.
#[must_use]
pub fn region_for_location(location: &str) -> Option<Region> {
    Region::ALL.into_iter().find(|region| {
        region
            .patterns()
            .iter()
            .any(|pattern| location.contains(pattern))
    })
}

/// Project count for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionCount {
    /// Region bucket
    pub region: Region,
    /// Number of items
    pub count: usize,
}

/// Projects per region. Every region is listed; unmatched projects are not counted anywhere.
#[must_use]
pub fn region_distribution(projects: &[Project]) -> Vec<RegionCount> {
    let mut counts: Vec<RegionCount> = Region::ALL
        .into_iter()
        .map(|region| RegionCount { region, count: 0 })
        .collect();
    for region in projects
        .iter()
        .filter_map(|p| region_for_location(&p.location))
    {
        if let Some(entry) = counts.iter_mut().find(|c| c.region == region) {
            entry.count += 1;
        }
    }
    counts
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Orders created in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyVolume {
    /// 1-based month number
    pub month: u32,
    /// Short month name
    pub label: &'static str,
    /// Orders created that month
    pub orders: usize,
}

/// Twelve monthly buckets of orders created in `year`.
///
/// Orders from any other year, or without a creation date, are left out.
#[must_use]
pub fn monthly_order_volume(orders: &[PurchaseOrder], year: i32) -> Vec<MonthlyVolume> {
    let mut volumes: Vec<MonthlyVolume> = (1_u32..)
        .zip(MONTH_LABELS)
        .map(|(month, label)| MonthlyVolume {
            month,
            label,
            orders: 0,
        })
        .collect();
    for created in orders.iter().filter_map(|o| o.date_created) {
        if created.year() != year {
            continue;
        }
        if let Some(bucket) = volumes.iter_mut().find(|v| v.month == created.month()) {
            bucket.orders += 1;
        }
    }
    volumes
}

/// Budget consumed so far, approximated as `budget * progress / 100`.
#[must_use]
pub fn budget_spent(project: &Project) -> f64 {
    project.budget * (f64::from(project.progress) / 100.0)
}

/// Sum of [`budget_spent`] across a portfolio.
#[must_use]
pub fn portfolio_budget_spent(projects: &[Project]) -> f64 {
    projects.iter().map(budget_spent).sum()
}

/// Sum of project budgets.
#[must_use]
pub fn portfolio_budget(projects: &[Project]) -> f64 {
    projects.iter().map(|p| p.budget).sum()
}

/// Mean project progress, 0 for an empty portfolio.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_progress(projects: &[Project]) -> f64 {
    if projects.is_empty() {
        return 0.0;
    }
    let total: f64 = projects.iter().map(|p| f64::from(p.progress)).sum();
    total / projects.len() as f64
}

/// Mean supplier rating, 0 when there are no suppliers.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_supplier_rating(suppliers: &[Supplier]) -> f64 {
    if suppliers.is_empty() {
        return 0.0;
    }
    suppliers.iter().map(|s| s.rating).sum::<f64>() / suppliers.len() as f64
}

/// Unfinished projects whose deadline has passed, most overdue first.
#[must_use]
pub fn overdue_projects(projects: &[Project], today: NaiveDate) -> Vec<&Project> {
    let mut overdue: Vec<&Project> = projects
        .iter()
        .filter(|p| p.status != ProjectStatus::Completed)
        .filter(|p| p.deadline.is_some_and(|deadline| deadline < today))
        .collect();
    overdue.sort_by_key(|p| p.deadline);
    overdue
}

/// Incomplete milestones due between `today` and `today + window_days`, soonest first.
///
/// A negative window selects nothing; a window reaching past the calendar's
/// end is open-ended.
#[must_use]
pub fn upcoming_milestones(
    milestones: &[Milestone],
    today: NaiveDate,
    window_days: i64,
) -> Vec<&Milestone> {
    if window_days < 0 {
        return Vec::new();
    }
    let horizon = TimeDelta::try_days(window_days)
        .and_then(|window| today.checked_add_signed(window))
        .unwrap_or(NaiveDate::MAX);
    let mut upcoming: Vec<&Milestone> = milestones
        .iter()
        .filter(|m| !m.completed)
        .filter(|m| m.due_date.is_some_and(|due| due >= today && due <= horizon))
        .collect();
    upcoming.sort_by_key(|m| m.due_date);
    upcoming
}
