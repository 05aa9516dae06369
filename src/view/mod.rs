//! View/state composition: what a page holds between user actions.
//!
//! [`Tracker`] serves cached reads and invalidates the cache after writes,
//! [`OptimisticList`] shows tentative rows before a write resolves, and
//! [`PurchaseOrderForm`] holds one edit session of a purchase order.

pub mod cache;
pub mod optimistic;
pub mod purchase_order_form;
pub mod tracker;

pub use cache::{QueryCache, QueryKey, Scope, Table};
pub use optimistic::{Entry, LocalKey, OptimisticList};
pub use purchase_order_form::PurchaseOrderForm;
pub use tracker::Tracker;
