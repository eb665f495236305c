//! Database query implementations
//!
//! Contains functions for storing and loading revenue and cost records

use rusqlite::{params, Connection};

use super::DbError;
use crate::models::record::parse_record_date;
use crate::models::{CostRecord, RevenueRecord};

fn to_date(value: String) -> Result<chrono::NaiveDate, DbError> {
    parse_record_date(&value).ok_or(DbError::InvalidDate(value))
}

/// Insert a revenue record for a user, returning its row id
pub fn insert_revenue(
    conn: &Connection,
    user_id: &str,
    record: &RevenueRecord,
) -> Result<i64, DbError> {
    conn.execute(
        r#"
        INSERT INTO revenue_records (user_id, record_date, amount, label, counterparty_name)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            user_id,
            record.date.format("%Y-%m-%d").to_string(),
            record.amount,
            record.label,
            record.counterparty_name
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a cost record for a user, returning its row id
pub fn insert_cost(conn: &Connection, user_id: &str, record: &CostRecord) -> Result<i64, DbError> {
    conn.execute(
        r#"
        INSERT INTO cost_records (user_id, record_date, amount, description)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            user_id,
            record.date.format("%Y-%m-%d").to_string(),
            record.amount,
            record.description
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Get all revenue records for a user, oldest first
pub fn get_revenue_for_user(
    conn: &Connection,
    user_id: &str,
) -> Result<Vec<RevenueRecord>, DbError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT record_date, amount, label, counterparty_name
        FROM revenue_records
        WHERE user_id = ?1
        ORDER BY record_date ASC, record_id ASC
        "#,
    )?;

    let rows = stmt.query_map(params![user_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, f64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (date, amount, label, counterparty_name) = row?;
        records.push(RevenueRecord {
            date: to_date(date)?,
            amount,
            label,
            counterparty_name,
        });
    }

    Ok(records)
}

/// Get all cost records for a user, oldest first
pub fn get_costs_for_user(conn: &Connection, user_id: &str) -> Result<Vec<CostRecord>, DbError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT record_date, amount, description
        FROM cost_records
        WHERE user_id = ?1
        ORDER BY record_date ASC, record_id ASC
        "#,
    )?;

    let rows = stmt.query_map(params![user_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, f64>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (date, amount, description) = row?;
        records.push(CostRecord {
            date: to_date(date)?,
            amount,
            description,
        });
    }

    Ok(records)
}

/// Delete every record belonging to a user, returning the number removed
pub fn delete_records_for_user(conn: &Connection, user_id: &str) -> Result<usize, DbError> {
    let revenue = conn.execute("DELETE FROM revenue_records WHERE user_id = ?1", params![user_id])?;
    let costs = conn.execute("DELETE FROM cost_records WHERE user_id = ?1", params![user_id])?;
    Ok(revenue + costs)
}
