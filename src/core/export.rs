//! CSV export of purchase orders.
//!
//! Two dialects: `Legacy` joins fields with commas and escapes nothing, so
//! files match older exports byte for byte; `Quoted` goes through the `csv`
//! writer and quotes fields that need it.

use crate::{
    config::settings::CsvMode,
    errors::{Error, Result},
    models::{Project, PurchaseOrder, StatusCategory, Supplier},
};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Column headers, in output order.
pub const HEADERS: [&str; 11] = [
    "ID",
    "PO Number",
    "Project",
    "Part Name",
    "Quantity",
    "Supplier",
    "Client",
    "Date Created",
    "Contractual Deadline",
    "Status",
    "Progress",
];

const UNKNOWN: &str = "Unknown";

fn name_lookup<'a, T>(
    items: &'a [T],
    key: impl Fn(&'a T) -> (&'a str, &'a str),
) -> HashMap<&'a str, &'a str> {
    items.iter().map(key).collect()
}

fn resolve<'a>(names: &HashMap<&str, &'a str>, id: Option<&str>) -> &'a str {
    id.and_then(|id| names.get(id).copied()).unwrap_or(UNKNOWN)
}

/// Renders one order as the eleven export fields.
fn order_record(
    order: &PurchaseOrder,
    projects: &HashMap<&str, &str>,
    suppliers: &HashMap<&str, &str>,
) -> Vec<String> {
    vec![
        order.id.clone(),
        order.po_number.clone(),
        resolve(projects, order.project_id.as_deref()).to_string(),
        order.part_name.clone(),
        order.quantity.to_string(),
        resolve(suppliers, order.supplier_id.as_deref()).to_string(),
        order.client_name.clone(),
        order
            .date_created
            .map(|d| d.to_string())
            .unwrap_or_default(),
        order
            .primary_deadline()
            .map(|d| d.to_string())
            .unwrap_or_default(),
        order.status.as_str().to_string(),
        order.progress.to_string(),
    ]
}

/// Exports orders as CSV text, resolving project and supplier names.
///
/// Orders whose project or supplier cannot be found get `Unknown` in that column.
///
/// # Errors
/// Returns an error only in `Quoted` mode, if the CSV writer fails.
#[instrument(skip_all, fields(orders = orders.len(), mode = ?mode))]
pub fn export_purchase_orders(
    orders: &[PurchaseOrder],
    projects: &[Project],
    suppliers: &[Supplier],
    mode: CsvMode,
) -> Result<String> {
    let project_names = name_lookup(projects, |p| (p.id.as_str(), p.name.as_str()));
    let supplier_names = name_lookup(suppliers, |s| (s.id.as_str(), s.name.as_str()));
    let records = orders
        .iter()
        .map(|o| order_record(o, &project_names, &supplier_names));

    let output = match mode {
        CsvMode::Legacy => std::iter::once(HEADERS.join(","))
            .chain(records.map(|fields| fields.join(",")))
            .collect::<Vec<_>>()
            .join("\n"),
        CsvMode::Quoted => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(HEADERS)?;
            for fields in records {
                writer.write_record(&fields)?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| Error::Io(e.into_error()))?;
            String::from_utf8(bytes)
                .map_err(|e| Error::validation(format!("CSV output is not UTF-8: {e}")))?
        }
    };
    debug!("Exported {} purchase orders", orders.len());
    Ok(output)
}
