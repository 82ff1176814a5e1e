// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod categories;
pub mod check;
pub mod config;
pub mod reset;
pub mod schedules;
pub mod transactions;
pub mod wallets;

use crate::store;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub(crate) fn require_login(conn: &Connection) -> Result<String> {
    store::current_user(conn)?.context("Not logged in (use 'moniledger login')")
}
