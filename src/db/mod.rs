//! Database module for SQLite operations
//!
//! This module handles all database interactions including:
//! - Schema creation
//! - Revenue and cost record storage per user
//!
//! Only raw records are stored. Computed analytics are never persisted.

pub mod schema;
pub mod queries;

use std::path::PathBuf;
use std::sync::Mutex;

use rusqlite::Connection;
use thiserror::Error;

use crate::analytics::RecordProvider;
use crate::models::{CostRecord, RevenueRecord};
use crate::AnalyticsError;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Lock poisoned")]
    LockPoisoned,

    #[error("Invalid stored date: {0}")]
    InvalidDate(String),
}

/// Database connection wrapper
pub struct Database {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl Database {
    /// Open (or create) a database file
    pub fn new(path: PathBuf) -> Result<Self, DbError> {
        let conn = Connection::open(&path)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: PathBuf::from(":memory:"),
        })
    }

    /// Initialize the database schema
    pub fn initialize(&self) -> Result<(), DbError> {
        self.with_connection(schema::create_tables)?;
        tracing::info!(path = ?self.path, "Record store initialized");
        Ok(())
    }

    /// Get the database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Execute a query with the database connection
    pub fn with_connection<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Connection) -> Result<T, DbError>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }

    pub fn insert_revenue(&self, user_id: &str, record: &RevenueRecord) -> Result<i64, DbError> {
        self.with_connection(|conn| queries::insert_revenue(conn, user_id, record))
    }

    pub fn insert_cost(&self, user_id: &str, record: &CostRecord) -> Result<i64, DbError> {
        self.with_connection(|conn| queries::insert_cost(conn, user_id, record))
    }

    /// All revenue records for a user, oldest first
    pub fn get_revenue_for_user(&self, user_id: &str) -> Result<Vec<RevenueRecord>, DbError> {
        self.with_connection(|conn| queries::get_revenue_for_user(conn, user_id))
    }

    /// All cost records for a user, oldest first
    pub fn get_costs_for_user(&self, user_id: &str) -> Result<Vec<CostRecord>, DbError> {
        self.with_connection(|conn| queries::get_costs_for_user(conn, user_id))
    }

    pub fn delete_records_for_user(&self, user_id: &str) -> Result<usize, DbError> {
        self.with_connection(|conn| queries::delete_records_for_user(conn, user_id))
    }
}

impl RecordProvider for Database {
    fn revenue_records(&self, user_id: &str) -> Result<Vec<RevenueRecord>, AnalyticsError> {
        Ok(self.get_revenue_for_user(user_id)?)
    }

    fn cost_records(&self, user_id: &str) -> Result<Vec<CostRecord>, AnalyticsError> {
        Ok(self.get_costs_for_user(user_id)?)
    }
}

/// Get the default database path
pub fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("finsight").join("records.db")
}
