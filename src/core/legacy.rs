//! One-time migration of legacy purchase order data.
//!
//! Older rows kept secondary deadlines inside the notes as a line of the form
//! `Additional Deadlines: 2025-03-01, 2025-04-15`, and spelled statuses the way
//! projects do. [`migrate_purchase_orders`] moves the deadlines into the
//! deadline columns, strips the line from the notes, and rewrites statuses to
//! their canonical spelling. Normal reads never look at the notes.

use super::storage_failure;
use crate::{
    entities::{PurchaseOrder as PurchaseOrders, purchase_order},
    errors::Result,
    mapping,
    models::{PurchaseOrderStatus, StatusCategory},
};
use chrono::NaiveDate;
use sea_orm::{ActiveValue::Set, prelude::*};
use tracing::{info, instrument, warn};

const MARKER: &str = "Additional Deadlines:";

/// Deadlines pulled out of a notes field, and what is left of the notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyDeadlines {
    /// Dates found after the marker
    pub deadlines: Vec<NaiveDate>,
    /// Notes with the marker line removed
    pub remaining_notes: String,
}

/// Counts from one migration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Orders read
    pub orders_scanned: usize,
    /// Orders whose notes carried deadlines
    pub orders_with_legacy_deadlines: usize,
    /// Deadlines added to orders
    pub deadlines_imported: usize,
    /// Orders whose status was canonicalized
    pub statuses_rewritten: usize,
}

/// Extracts the `Additional Deadlines:` line from notes.
///
/// Returns `None` when the notes carry no such line. Tokens that are not
/// `YYYY-MM-DD` dates are logged and skipped.
#[must_use]
pub fn parse_legacy_deadlines(notes: &str) -> Option<LegacyDeadlines> {
    let start = notes.find(MARKER)?;
    let after_marker = &notes[start + MARKER.len()..];
    let (list, rest) = after_marker
        .split_once('\n')
        .unwrap_or((after_marker, ""));

    let deadlines = list
        .split([',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match NaiveDate::parse_from_str(token, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                warn!("Skipping unparseable legacy deadline '{}'", token);
                None
            }
        })
        .collect();

    let before = notes[..start].trim_end();
    let rest = rest.trim();
    let remaining_notes = match (before.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => before.to_string(),
        (false, false) => format!("{before}\n{rest}"),
    };

    Some(LegacyDeadlines {
        deadlines,
        remaining_notes,
    })
}

/// Appends `extra` to `existing`, skipping dates already present.
fn merge_deadlines(existing: &[NaiveDate], extra: &[NaiveDate]) -> Vec<NaiveDate> {
    let mut merged = existing.to_vec();
    for date in extra {
        if !merged.contains(date) {
            merged.push(*date);
        }
    }
    merged
}

/// Migrates every stored purchase order. Running it twice changes nothing the second time.
///
/// # Errors
/// Returns an error if a storage round trip fails; rows already migrated stay migrated.
#[instrument(skip(db))]
pub async fn migrate_purchase_orders(db: &DatabaseConnection) -> Result<MigrationSummary> {
    let rows = PurchaseOrders::find()
        .all(db)
        .await
        .map_err(storage_failure("scan purchase orders for migration"))?;

    let mut summary = MigrationSummary {
        orders_scanned: rows.len(),
        ..MigrationSummary::default()
    };

    for row in rows {
        let mut active: purchase_order::ActiveModel = row.clone().into();
        let mut changed = false;

        if let Some(raw) = row
            .status
            .as_deref()
            .filter(|raw| PurchaseOrderStatus::is_non_canonical(raw))
        {
            let canonical = PurchaseOrderStatus::from_storage_str(raw);
            active.status = Set(Some(canonical.as_str().to_string()));
            summary.statuses_rewritten += 1;
            changed = true;
        }

        if let Some(legacy) = row.notes.as_deref().and_then(parse_legacy_deadlines) {
            let order = mapping::purchase_order::from_storage(row.clone());
            let merged = merge_deadlines(&order.contractual_deadlines, &legacy.deadlines);
            summary.deadlines_imported += merged.len() - order.contractual_deadlines.len();
            summary.orders_with_legacy_deadlines += 1;

            let (primary, additional) = mapping::purchase_order::split_deadlines(&merged);
            active.contractual_deadline = Set(primary);
            active.additional_deadlines = Set(additional);
            active.notes = Set(Some(legacy.remaining_notes));
            changed = true;
        }

        if changed {
            active
                .update(db)
                .await
                .map_err(storage_failure("migrate purchase order"))?;
        }
    }

    info!(
        "Migrated purchase orders: {} scanned, {} deadlines imported, {} statuses rewritten",
        summary.orders_scanned, summary.deadlines_imported, summary.statuses_rewritten
    );
    Ok(summary)
}
