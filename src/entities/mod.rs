//! Entity module - Contains all SeaORM entity definitions for the storage schema.
//! These entities mirror the snake_case tables row for row. Each entity has a
//! Model struct for rows and an Entity struct for queries.

pub mod client;
pub mod external_link;
pub mod milestone;
pub mod project;
pub mod purchase_order;
pub mod supplier;
pub mod supplier_comment;
pub mod team_member;

// Re-export specific types to avoid conflicts
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use external_link::{
    Column as ExternalLinkColumn, Entity as ExternalLink, Model as ExternalLinkModel,
};
pub use milestone::{Column as MilestoneColumn, Entity as Milestone, Model as MilestoneModel};
pub use project::{Column as ProjectColumn, Entity as Project, Model as ProjectModel};
pub use purchase_order::{
    Column as PurchaseOrderColumn, Entity as PurchaseOrder, Model as PurchaseOrderModel,
};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
pub use supplier_comment::{
    Column as SupplierCommentColumn, Entity as SupplierComment, Model as SupplierCommentModel,
};
pub use team_member::{Column as TeamMemberColumn, Entity as TeamMember, Model as TeamMemberModel};
