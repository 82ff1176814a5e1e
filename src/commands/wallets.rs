// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::require_login;
use crate::models::DEFAULT_WALLET;
use crate::store;
use crate::utils::{fmt_money, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user = require_login(conn)?;
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            if name.is_empty() {
                bail!("Wallet name must not be empty");
            }
            store::with_document_mut(conn, &user, |doc| {
                if !doc.add_wallet(&name) {
                    bail!("Wallet '{}' already exists", name);
                }
                Ok(())
            })?;
            println!("Added wallet '{}' (now active)", name);
        }
        Some(("list", _)) => {
            let user = require_login(conn)?;
            let doc = store::load_document(conn, &user)?
                .ok_or_else(|| store::StoreError::UnknownUser(user.clone()))?;
            let rows = doc
                .wallets
                .iter()
                .map(|w| {
                    let active = if w.name == doc.selected_wallet { "*" } else { "" };
                    vec![
                        w.name.clone(),
                        fmt_money(&w.balance),
                        w.transactions.len().to_string(),
                        active.to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Wallet", "Balance", "Transactions", "Active"], rows)
            );
        }
        Some(("select", sub)) => {
            let user = require_login(conn)?;
            let name = sub.get_one::<String>("name").unwrap().clone();
            store::with_document_mut(conn, &user, |doc| {
                if !doc.select_wallet(&name) {
                    bail!("No wallet named '{}'", name);
                }
                Ok(())
            })?;
            println!("Active wallet: {}", name);
        }
        Some(("rm", sub)) => {
            let user = require_login(conn)?;
            let name = sub.get_one::<String>("name").unwrap().clone();
            store::with_document_mut(conn, &user, |doc| {
                if name == DEFAULT_WALLET {
                    bail!("The default wallet cannot be deleted");
                }
                if !doc.remove_wallet(&name) {
                    bail!("No wallet named '{}'", name);
                }
                Ok(())
            })?;
            println!("Removed wallet '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

pub fn balance(conn: &Connection) -> Result<()> {
    let user = require_login(conn)?;
    let doc = store::load_document(conn, &user)?
        .ok_or_else(|| store::StoreError::UnknownUser(user.clone()))?;
    match doc.active_wallet() {
        Some(w) => println!("{}: {}", w.name, fmt_money(&w.balance)),
        None => println!("No active wallet"),
    }
    Ok(())
}
