// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::evaluator::CatchUpMode;
use crate::models::UserDocument;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use thiserror::Error;

const SESSION_KEY: &str = "logged_in_user";
const CATCH_UP_KEY: &str = "catch_up_mode";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no account named '{0}'")]
    UnknownUser(String),
    #[error("stored document for '{user}' is not valid JSON")]
    Corrupt {
        user: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub fn load_document(
    conn: &Connection,
    username: &str,
) -> Result<Option<UserDocument>, StoreError> {
    let blob: Option<String> = conn
        .query_row(
            "SELECT doc FROM documents WHERE username=?1",
            params![username],
            |r| r.get(0),
        )
        .optional()?;
    match blob {
        Some(s) => serde_json::from_str(&s)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                user: username.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

pub fn save_document(
    conn: &Connection,
    username: &str,
    doc: &UserDocument,
) -> Result<(), StoreError> {
    let blob = serde_json::to_string(doc)?;
    conn.execute(
        "INSERT INTO documents(username, doc) VALUES(?1, ?2)
         ON CONFLICT(username) DO UPDATE SET doc=excluded.doc, updated_at=datetime('now')",
        params![username, blob],
    )?;
    Ok(())
}

/// Insert a fresh document for signup. Returns false if the username is
/// already taken.
pub fn create_document(
    conn: &Connection,
    username: &str,
    doc: &UserDocument,
) -> Result<bool, StoreError> {
    let blob = serde_json::to_string(doc)?;
    let rows = conn.execute(
        "INSERT OR IGNORE INTO documents(username, doc) VALUES(?1, ?2)",
        params![username, blob],
    )?;
    Ok(rows == 1)
}

/// Read-modify-write of one account's document inside a single IMMEDIATE
/// transaction. The write lock is taken up front, so two concurrent
/// evaluations serialize instead of both reading the stale blob and
/// double-applying an occurrence. A closure error rolls everything back:
/// either the whole mutation commits or none of it does.
pub fn with_document_mut<T>(
    conn: &mut Connection,
    username: &str,
    f: impl FnOnce(&mut UserDocument) -> Result<T>,
) -> Result<T> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut doc = load_document(&tx, username)?
        .ok_or_else(|| StoreError::UnknownUser(username.to_string()))?;
    let out = f(&mut doc)?;
    save_document(&tx, username, &doc)?;
    tx.commit()?;
    Ok(out)
}

// Session key: the "logged in user" pointer, an explicit settings row rather
// than ambient process state.

pub fn current_user(conn: &Connection) -> Result<Option<String>, StoreError> {
    let v = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![SESSION_KEY],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_current_user(conn: &Connection, username: &str) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![SESSION_KEY, username],
    )?;
    Ok(())
}

pub fn clear_current_user(conn: &Connection) -> Result<(), StoreError> {
    conn.execute("DELETE FROM settings WHERE key=?1", params![SESSION_KEY])?;
    Ok(())
}

pub fn get_catch_up_mode(conn: &Connection) -> Result<CatchUpMode, StoreError> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![CATCH_UP_KEY],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.and_then(|s| s.parse().ok()).unwrap_or_default())
}

pub fn set_catch_up_mode(conn: &Connection, mode: CatchUpMode) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![CATCH_UP_KEY, mode.as_str()],
    )?;
    Ok(())
}
