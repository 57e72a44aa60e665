//! libSQL-backed contact storage.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;
use uuid::Uuid;

use super::Contact;
use crate::error::DatabaseError;

/// Backend-agnostic contact store.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Insert a new contact. Fails with [`DatabaseError::Constraint`] when
    /// the phone number already exists.
    async fn insert(&self, name: &str, phone_number: &str) -> Result<Contact, DatabaseError>;

    /// All contacts, newest first.
    async fn list(&self) -> Result<Vec<Contact>, DatabaseError>;

    /// Delete a contact by id. Fails with [`DatabaseError::NotFound`] when
    /// no such contact exists.
    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError>;
}

/// libSQL contact store.
///
/// Holds a single connection reused for all operations;
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlContacts {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlContacts {
    /// Open (or create) a local database file and initialize the schema.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        info!(path = %path.display(), "Contact database opened");
        Ok(store)
    }

    /// Create an in-memory store (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS contacts (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL DEFAULT '',
                    phone_number TEXT NOT NULL UNIQUE,
                    created_at TEXT NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("Failed to create schema: {e}")))?;
        Ok(())
    }
}

/// Map a libsql error, turning UNIQUE violations into `Constraint`.
fn map_insert_error(e: libsql::Error) -> DatabaseError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") {
        DatabaseError::Constraint(msg)
    } else {
        DatabaseError::Query(msg)
    }
}

fn row_to_contact(row: &libsql::Row) -> Result<Contact, DatabaseError> {
    let id_str: String = row
        .get(0)
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
    let name: String = row
        .get(1)
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
    let phone_number: String = row
        .get(2)
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
    let created_str: String = row
        .get(3)
        .map_err(|e| DatabaseError::Query(e.to_string()))?;

    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DatabaseError::Query(format!("Invalid contact id {id_str}: {e}")))?;
    let created_at = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    Ok(Contact {
        id,
        name,
        phone_number,
        created_at,
    })
}

#[async_trait]
impl ContactStore for LibSqlContacts {
    async fn insert(&self, name: &str, phone_number: &str) -> Result<Contact, DatabaseError> {
        let contact = Contact {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone_number: phone_number.to_string(),
            created_at: Utc::now(),
        };

        self.conn
            .execute(
                "INSERT INTO contacts (id, name, phone_number, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    contact.id.to_string(),
                    contact.name.clone(),
                    contact.phone_number.clone(),
                    contact.created_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(map_insert_error)?;

        Ok(contact)
    }

    async fn list(&self) -> Result<Vec<Contact>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, name, phone_number, created_at FROM contacts
                 ORDER BY created_at DESC, rowid DESC",
                (),
            )
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let mut contacts = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        {
            contacts.push(row_to_contact(&row)?);
        }
        Ok(contacts)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let affected = self
            .conn
            .execute(
                "DELETE FROM contacts WHERE id = ?1",
                params![id.to_string()],
            )
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        if affected == 0 {
            return Err(DatabaseError::NotFound {
                entity: "contact".into(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────
