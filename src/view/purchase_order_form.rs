//! Edit-session state for the purchase order form.

use crate::models::{Client, PurchaseOrder, PurchaseOrderPatch, PurchaseOrderStatus};
use chrono::NaiveDate;

/// Form fields for creating or editing a purchase order.
///
/// The client id and name are private and only change together through
/// [`PurchaseOrderForm::select_client`]. The client is written back only when
/// it was selected during this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseOrderForm {
    /// Purchase order number
    pub po_number: String,
    /// Ordered part
    pub part_name: String,
    /// Ordered quantity, positive
    pub quantity: u32,
    /// Lifecycle status
    pub status: PurchaseOrderStatus,
    /// Date the order was placed
    pub date_created: Option<NaiveDate>,
    /// Deadlines in order; the first is the primary one
    pub contractual_deadlines: Vec<NaiveDate>,
    /// Actual shipment date
    pub shipment_date: Option<NaiveDate>,
    /// Who placed the order
    pub placed_by: String,
    /// Completion percentage, 0..=100
    pub progress: u8,
    /// Free-text notes
    pub notes: String,
    /// Soft reference to the project
    pub project_id: Option<String>,
    /// Soft reference to the supplier
    pub supplier_id: Option<String>,
    client_id: Option<String>,
    client_name: String,
    client_selected: bool,
}

impl PurchaseOrderForm {
    /// Empty form for a new order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an existing order for editing.
    #[must_use]
    pub fn from_order(order: &PurchaseOrder) -> Self {
        Self {
            po_number: order.po_number.clone(),
            part_name: order.part_name.clone(),
            quantity: order.quantity,
            status: order.status,
            date_created: order.date_created,
            contractual_deadlines: order.contractual_deadlines.clone(),
            shipment_date: order.shipment_date,
            placed_by: order.placed_by.clone(),
            progress: order.progress,
            notes: order.notes.clone(),
            project_id: order.project_id.clone(),
            supplier_id: order.supplier_id.clone(),
            client_id: order.client_id.clone(),
            client_name: order.client_name.clone(),
            client_selected: false,
        }
    }

    /// Selects a client, or clears the selection with `None`.
    pub fn select_client(&mut self, client: Option<&Client>) {
        self.client_id = client.map(|c| c.id.clone());
        self.client_name = client.map(|c| c.name.clone()).unwrap_or_default();
        self.client_selected = true;
    }

    /// Selected client id
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Name of the selected client, empty when none
    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Adds a deadline unless it is already listed.
    pub fn add_deadline(&mut self, deadline: NaiveDate) {
        if !self.contractual_deadlines.contains(&deadline) {
            self.contractual_deadlines.push(deadline);
        }
    }

    /// Removes the deadline at `index`, `None` when out of range.
    pub fn remove_deadline(&mut self, index: usize) -> Option<NaiveDate> {
        (index < self.contractual_deadlines.len())
            .then(|| self.contractual_deadlines.remove(index))
    }

    /// Builds a patch writing every form field, plus the client if it was
    /// selected in this session.
    ///
    /// The client name is not part of the patch; the repository derives it
    /// from the client id.
    #[must_use]
    pub fn to_patch(&self) -> PurchaseOrderPatch {
        PurchaseOrderPatch {
            po_number: Some(self.po_number.clone()),
            part_name: Some(self.part_name.clone()),
            quantity: Some(self.quantity),
            status: Some(self.status),
            date_created: Some(self.date_created),
            contractual_deadlines: Some(self.contractual_deadlines.clone()),
            shipment_date: Some(self.shipment_date),
            placed_by: Some(self.placed_by.clone()),
            progress: Some(self.progress),
            notes: Some(self.notes.clone()),
            project_id: Some(self.project_id.clone()),
            supplier_id: Some(self.supplier_id.clone()),
            client_id: self.client_selected.then(|| self.client_id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{client, purchase_order};
    use crate::errors::Result;
    use crate::test_utils::{
        create_test_client, create_test_purchase_order, date, sample_client,
        sample_purchase_order, setup_test_db,
    };

    #[test]
    fn test_select_client_keeps_name_in_sync() {
        let mut form = PurchaseOrderForm::from_order(&sample_purchase_order());
        let other = Client {
            id: "c2".to_string(),
            name: "Harbor Cranes".to_string(),
            ..sample_client()
        };

        form.select_client(Some(&other));
        assert_eq!(form.client_id(), Some("c2"));
        assert_eq!(form.client_name(), "Harbor Cranes");

        form.select_client(None);
        assert_eq!(form.client_id(), None);
        assert_eq!(form.client_name(), "");
    }

    #[test]
    fn test_to_patch_writes_every_field() {
        let mut form = PurchaseOrderForm::new();
        form.po_number = "PO-5".to_string();
        form.quantity = 4;
        form.add_deadline(date(2025, 5, 1));
        form.add_deadline(date(2025, 5, 1));
        form.select_client(Some(&sample_client()));

        let patch = form.to_patch();
        assert_eq!(patch.po_number.as_deref(), Some("PO-5"));
        assert_eq!(patch.contractual_deadlines, Some(vec![date(2025, 5, 1)]));
        assert_eq!(patch.client_id, Some(Some("c1".to_string())));
        assert_eq!(patch.shipment_date, Some(None));
    }

    #[test]
    fn test_untouched_client_is_left_out_of_patch() {
        let mut form = PurchaseOrderForm::from_order(&sample_purchase_order());
        form.quantity = 12;
        assert_eq!(form.to_patch().client_id, None);

        form.select_client(None);
        assert_eq!(form.to_patch().client_id, Some(None));
    }

    #[test]
    fn test_remove_deadline_out_of_range() {
        let mut form = PurchaseOrderForm::new();
        form.add_deadline(date(2025, 5, 1));
        assert_eq!(form.remove_deadline(3), None);
        assert_eq!(form.remove_deadline(0), Some(date(2025, 5, 1)));
    }

    #[tokio::test]
    async fn test_save_after_client_deleted() -> Result<()> {
        let db = setup_test_db().await?;
        let gone = create_test_client(&db, "Harbor Cranes").await?;
        let order = create_test_purchase_order(&db, "PO-31", None, None, Some(&gone.id)).await?;
        assert!(client::delete_client(&db, &gone.id).await?);

        let mut form = PurchaseOrderForm::from_order(&order);
        form.progress = 60;
        let saved = purchase_order::update_purchase_order(&db, &order.id, form.to_patch()).await?;

        assert_eq!(saved.progress, 60);
        assert_eq!(saved.client_id.as_deref(), Some(gone.id.as_str()));
        assert_eq!(saved.client_name, "Harbor Cranes");
        Ok(())
    }
}
