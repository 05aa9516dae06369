//! Shared test utilities.
//!
//! Database helpers run against an in-memory `SQLite` database with every
//! table created; `sample_*` builders return fully populated domain values
//! for mapping and metrics tests.

use crate::{
    core::{client, project, purchase_order, supplier},
    errors::Result,
    models::{
        Client, ClientPatch, ExternalLink, LinkType, Milestone, Project, ProjectPatch,
        ProjectStatus, PurchaseOrder, PurchaseOrderPatch, PurchaseOrderStatus, Supplier,
        SupplierPatch, TeamMember,
    },
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a test database with one supplier already stored.
pub async fn setup_with_supplier() -> Result<(DatabaseConnection, Supplier)> {
    let db = setup_test_db().await?;
    let supplier = supplier::create_supplier(
        &db,
        SupplierPatch {
            country: Some("Germany".to_string()),
            rating: Some(4.0),
            ..SupplierPatch::named("Rheinmetall Castings")
        },
    )
    .await?;
    Ok((db, supplier))
}

pub async fn create_test_client(db: &DatabaseConnection, name: &str) -> Result<Client> {
    client::create_client(
        db,
        ClientPatch {
            name: Some(name.to_string()),
            ..ClientPatch::default()
        },
    )
    .await
}

/// Creates a pending project, optionally tied to a supplier.
pub async fn create_test_project(
    db: &DatabaseConnection,
    name: &str,
    supplier_id: Option<&str>,
) -> Result<Project> {
    let patch = ProjectPatch {
        supplier_id: Some(supplier_id.map(str::to_string)),
        budget: Some(100_000.0),
        location: Some("Lyon, France".to_string()),
        ..ProjectPatch::named(name)
    };
    project::create_project(db, patch).await
}

/// A creatable purchase order patch: number, part and a quantity of 10.
pub fn order_patch(po_number: &str) -> PurchaseOrderPatch {
    PurchaseOrderPatch {
        po_number: Some(po_number.to_string()),
        part_name: Some("Bearing housing".to_string()),
        quantity: Some(10),
        ..PurchaseOrderPatch::default()
    }
}

pub async fn create_test_purchase_order(
    db: &DatabaseConnection,
    po_number: &str,
    project_id: Option<&str>,
    supplier_id: Option<&str>,
    client_id: Option<&str>,
) -> Result<PurchaseOrder> {
    let patch = PurchaseOrderPatch {
        project_id: Some(project_id.map(str::to_string)),
        supplier_id: Some(supplier_id.map(str::to_string)),
        client_id: Some(client_id.map(str::to_string)),
        ..order_patch(po_number)
    };
    purchase_order::create_purchase_order(db, patch).await
}

/// Shorthand for a calendar date in tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn created() -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).single()
}

pub fn sample_project() -> Project {
    Project {
        id: "p1".to_string(),
        name: "Tram Bogies".to_string(),
        status: ProjectStatus::InProgress,
        progress: 45,
        start_date: Some(date(2025, 1, 6)),
        deadline: Some(date(2025, 9, 30)),
        budget: 250_000.0,
        location: "Lyon, France".to_string(),
        description: "Bogie frames for the T9 line".to_string(),
        project_manager: "Ana Costa".to_string(),
        manufacturing_manager: "Tomas Novak".to_string(),
        supplier_id: Some("s1".to_string()),
        client_id: Some("c1".to_string()),
        client_name: "Metro Lyon".to_string(),
        milestones: Vec::new(),
        created_at: created(),
    }
}

pub fn sample_milestone() -> Milestone {
    Milestone {
        id: "m1".to_string(),
        project_id: Some("p1".to_string()),
        title: "First article inspection".to_string(),
        due_date: Some(date(2025, 4, 1)),
        completed: false,
        created_at: created(),
    }
}

pub fn sample_purchase_order() -> PurchaseOrder {
    PurchaseOrder {
        id: "po1".to_string(),
        po_number: "PO-2025-001".to_string(),
        part_name: "Bearing housing".to_string(),
        quantity: 120,
        status: PurchaseOrderStatus::Active,
        date_created: Some(date(2025, 1, 10)),
        contractual_deadlines: vec![date(2025, 3, 15)],
        shipment_date: None,
        placed_by: "Ana Costa".to_string(),
        progress: 30,
        notes: "Machined from cast blanks".to_string(),
        project_id: Some("p1".to_string()),
        supplier_id: Some("s1".to_string()),
        client_id: Some("c1".to_string()),
        client_name: "Metro Lyon".to_string(),
        created_at: created(),
    }
}

pub fn sample_supplier() -> Supplier {
    Supplier {
        id: "s1".to_string(),
        name: "Rheinmetall Castings".to_string(),
        country: "Germany".to_string(),
        contact_person: "Jana Weber".to_string(),
        email: "jana@castings.example".to_string(),
        phone: "+49 30 1234".to_string(),
        rating: 4.5,
        on_time_delivery_rate: 92.5,
        location: "Essen, Germany".to_string(),
        comments: Vec::new(),
        created_at: created(),
    }
}

pub fn sample_client() -> Client {
    Client {
        id: "c1".to_string(),
        name: "Metro Lyon".to_string(),
        contact_person: "Luc Martin".to_string(),
        email: "luc@metro.example".to_string(),
        phone: "+33 4 5555".to_string(),
        address: "12 Rue de la Gare".to_string(),
        country: "France".to_string(),
        notes: "Prefers weekly reports".to_string(),
        created_at: created(),
    }
}

pub fn sample_team_member() -> TeamMember {
    TeamMember {
        id: "t1".to_string(),
        name: "Ana Costa".to_string(),
        role: "Project Manager".to_string(),
        email: "ana@tracker.example".to_string(),
        phone: "+351 21 000".to_string(),
        department: "Operations".to_string(),
        photo_url: "https://img.example/ana.png".to_string(),
        created_at: created(),
    }
}

pub fn sample_link() -> ExternalLink {
    ExternalLink {
        id: "l1".to_string(),
        title: "Week 12 report".to_string(),
        url: "https://reports.example.com/w12".to_string(),
        link_type: LinkType::WeeklyReport,
        date_added: Some(date(2025, 3, 21)),
        description: "Progress photos included".to_string(),
        project_id: Some("p1".to_string()),
        purchase_order_id: None,
        supplier_id: None,
        client_id: None,
        created_at: created(),
    }
}
