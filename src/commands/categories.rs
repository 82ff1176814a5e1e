// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::require_login;
use crate::store;
use crate::utils::pretty_table;
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user = require_login(conn)?;
            let name = sub.get_one::<String>("name").unwrap().clone();
            store::with_document_mut(conn, &user, |doc| {
                if !doc.add_category(&name) {
                    bail!("Category '{}' already exists", name.trim());
                }
                Ok(())
            })?;
            println!("Added category '{}'", name.trim());
        }
        Some(("list", _)) => {
            let user = require_login(conn)?;
            let doc = store::load_document(conn, &user)?
                .ok_or_else(|| store::StoreError::UnknownUser(user.clone()))?;
            let rows = doc.categories.iter().map(|c| vec![c.clone()]).collect();
            println!("{}", pretty_table(&["Category"], rows));
        }
        Some(("rm", sub)) => {
            let user = require_login(conn)?;
            let name = sub.get_one::<String>("name").unwrap().clone();
            store::with_document_mut(conn, &user, |doc| {
                if !doc.remove_category(&name) {
                    bail!("No category named '{}'", name);
                }
                Ok(())
            })?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
